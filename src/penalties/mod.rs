//! Estimates of what a validator loses when it goes offline or gets slashed. Formulas use the
//! Deneb protocol constants from a single validator's point of view, they are estimates, not
//! what a client would compute for a given beacon state.

mod inactivity;
mod pipelines;
mod rewards;
mod slashing;

pub use inactivity::inactivity_penalty;
pub use pipelines::{DoubleSigningReport, OfflineReport, PenaltyReport};
pub use rewards::{base_reward, long_term_penalty, missed_attestation_rewards};
pub use slashing::{correlated_slashing_penalty, slashing_penalty};

use serde::Serialize;

use crate::{
    clients::{ClientShares, ClientType},
    errors::PenaltyError,
    units::GweiNewtype,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyResult {
    pub total: GweiNewtype,
    pub base: GweiNewtype,
    pub additional: GweiNewtype,
}

impl PenaltyResult {
    pub fn new(base: GweiNewtype, additional: GweiNewtype) -> Self {
        Self {
            total: base + additional,
            base,
            additional,
        }
    }
}

/// Holds the client share table the correlated slashing penalty is computed against. All other
/// formulas only depend on protocol constants.
#[derive(Clone, Debug, Default)]
pub struct PenaltyCalculator {
    client_shares: ClientShares,
}

impl PenaltyCalculator {
    pub fn new(client_shares: ClientShares) -> Self {
        Self { client_shares }
    }

    pub fn client_shares(&self) -> &ClientShares {
        &self.client_shares
    }

    pub fn correlated_slashing_penalty(
        &self,
        balance: GweiNewtype,
        client_type: ClientType,
        client_name: &str,
    ) -> Result<PenaltyResult, PenaltyError> {
        correlated_slashing_penalty(&self.client_shares, balance, client_type, client_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALANCE: GweiNewtype = GweiNewtype(32_000_000_000);

    #[test]
    fn total_is_base_plus_additional_test() {
        let result = PenaltyResult::new(GweiNewtype(1_000_000_000), GweiNewtype(9_600_000_000));
        assert_eq!(result.total, GweiNewtype(10_600_000_000));
    }

    #[test]
    fn calculator_uses_its_client_shares_test() {
        let client_shares: ClientShares = serde_json::from_str(
            r#"{"execution": {"geth": 0.1}, "consensus": {"prysm": 0.2}}"#,
        )
        .unwrap();
        let calculator = PenaltyCalculator::new(client_shares);

        let geth = calculator.correlated_slashing_penalty(BALANCE, ClientType::Execution, "geth");
        let besu = calculator.correlated_slashing_penalty(BALANCE, ClientType::Execution, "besu");

        assert_eq!(geth.unwrap().additional, GweiNewtype(9_600_000_000));
        assert!(besu.is_err());
    }
}
