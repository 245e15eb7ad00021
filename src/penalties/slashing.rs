use tracing::debug;

use super::PenaltyResult;
use crate::{
    beacon_chain::{
        effective_balance, MIN_SLASHING_PENALTY_QUOTIENT_DENEB, PROPORTIONAL_SLASHING_MULTIPLIER,
    },
    clients::{share_ppt, ClientShares, ClientType, MAX_CORRELATION_FACTOR, PARTS_PER_TRILLION},
    errors::PenaltyError,
    units::GweiNewtype,
};

/// Penalty applied immediately when a validator gets slashed.
pub fn slashing_penalty(balance: GweiNewtype) -> GweiNewtype {
    balance / MIN_SLASHING_PENALTY_QUOTIENT_DENEB
}

/// Slashing penalty including the proportional part for all validators running the same client
/// getting slashed together.
pub fn correlated_slashing_penalty(
    client_shares: &ClientShares,
    balance: GweiNewtype,
    client_type: ClientType,
    client_name: &str,
) -> Result<PenaltyResult, PenaltyError> {
    let share = client_shares.share(client_type, client_name)?;

    let effective_balance = effective_balance(balance);
    let base = slashing_penalty(effective_balance);

    // effective_balance * min(share, 1/3) * 3, rounded down. At the cap the factor is exactly
    // one, below it the share is scaled to integer parts per trillion.
    let additional = if share >= MAX_CORRELATION_FACTOR {
        effective_balance
    } else {
        let multiplier = share_ppt(share) * PROPORTIONAL_SLASHING_MULTIPLIER;
        effective_balance
            .mul_div(multiplier, PARTS_PER_TRILLION)
            .min(effective_balance)
    };

    debug!(
        %client_type,
        client_name,
        share,
        %effective_balance,
        %base,
        %additional,
        "computed correlated slashing penalty"
    );

    Ok(PenaltyResult::new(base, additional))
}
