use crate::{
    beacon_chain::{EpochCount, INACTIVITY_PENALTY_QUOTIENT_DENEB, INACTIVITY_SCORE_BIAS},
    units::GweiNewtype,
};

/// Penalty for being offline while the chain isn't finalizing. The inactivity score only grows
/// for the epochs that are both offline and without finality.
pub fn inactivity_penalty(
    balance: GweiNewtype,
    EpochCount(offline_epochs): EpochCount,
    EpochCount(epochs_since_finality): EpochCount,
) -> GweiNewtype {
    let inactivity_score = offline_epochs
        .min(epochs_since_finality)
        .saturating_mul(INACTIVITY_SCORE_BIAS);
    balance.mul_div(inactivity_score, INACTIVITY_PENALTY_QUOTIENT_DENEB)
}
