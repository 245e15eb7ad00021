use crate::{
    beacon_chain::{
        effective_balance, EpochCount, BASE_REWARDS_PER_EPOCH, BASE_REWARD_FACTOR,
        EFFECTIVE_BALANCE_INCREMENT, EPOCHS_PER_SLASHING_SPAN,
    },
    units::GweiNewtype,
};

/// Reward per effective balance increment, zero for balances under 1 ETH.
pub fn base_reward(balance: GweiNewtype) -> GweiNewtype {
    balance / EFFECTIVE_BALANCE_INCREMENT * BASE_REWARD_FACTOR
}

pub fn missed_attestation_rewards(
    balance: GweiNewtype,
    EpochCount(offline_epochs): EpochCount,
) -> GweiNewtype {
    base_reward(balance) * BASE_REWARDS_PER_EPOCH * offline_epochs
}

/// A slashed validator sits out the slashing span before it can exit, missing the rewards it
/// would have earned for every epoch of it.
pub fn long_term_penalty(balance: GweiNewtype) -> GweiNewtype {
    base_reward(effective_balance(balance)) * BASE_REWARDS_PER_EPOCH * EPOCHS_PER_SLASHING_SPAN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_reward_test() {
        assert_eq!(base_reward(GweiNewtype(32_000_000_000)), GweiNewtype(2048));
        assert_eq!(base_reward(GweiNewtype(0)), GweiNewtype(0));
        assert_eq!(base_reward(GweiNewtype(999_999_999)), GweiNewtype(0));
        assert_eq!(base_reward(GweiNewtype(1_999_999_999)), GweiNewtype(64));
    }

    #[test]
    fn base_reward_is_multiple_of_factor_test() {
        for eth in [0u64, 1, 7, 16, 31, 32, 33, 2048] {
            let balance = GweiNewtype(eth * 1_000_000_000 + 123_456_789);
            let GweiNewtype(reward) = base_reward(balance);
            assert_eq!(reward % BASE_REWARD_FACTOR, 0);
            assert_eq!(reward, eth * BASE_REWARD_FACTOR);
        }
    }

    #[test]
    fn missed_attestation_rewards_test() {
        assert_eq!(
            missed_attestation_rewards(GweiNewtype(32_000_000_000), EpochCount(225)),
            GweiNewtype(1_843_200)
        );
        assert_eq!(
            missed_attestation_rewards(GweiNewtype(32_000_000_000), EpochCount::ZERO),
            GweiNewtype::ZERO
        );
    }

    #[test]
    fn missed_attestation_rewards_uses_full_balance_test() {
        assert_eq!(
            missed_attestation_rewards(GweiNewtype(64_000_000_000), EpochCount(1)),
            GweiNewtype(64 * 64 * 4)
        );
    }

    #[test]
    fn long_term_penalty_test() {
        assert_eq!(
            long_term_penalty(GweiNewtype(32_000_000_000)),
            GweiNewtype(67_108_864)
        );
    }

    #[test]
    fn long_term_penalty_caps_balance_test() {
        assert_eq!(
            long_term_penalty(GweiNewtype(2_048_000_000_000)),
            long_term_penalty(GweiNewtype(32_000_000_000))
        );
    }
}
