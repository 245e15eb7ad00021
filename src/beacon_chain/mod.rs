mod units;

pub use units::hours_to_epochs;
pub use units::EpochCount;

use crate::units::GweiNewtype;

pub const SLOTS_PER_EPOCH: u64 = 32;
pub const SECONDS_PER_SLOT: u64 = 12;
pub const SECONDS_PER_EPOCH: u64 = SLOTS_PER_EPOCH * SECONDS_PER_SLOT;

pub const EFFECTIVE_BALANCE_INCREMENT: u64 = 1_000_000_000;
pub const MAX_EFFECTIVE_BALANCE: GweiNewtype = GweiNewtype(32_000_000_000);

pub const BASE_REWARD_FACTOR: u64 = 64;
pub const BASE_REWARDS_PER_EPOCH: u64 = 4;

pub const INACTIVITY_SCORE_BIAS: u64 = 4;
pub const INACTIVITY_PENALTY_QUOTIENT_DENEB: u64 = 1 << 26;

pub const MIN_SLASHING_PENALTY_QUOTIENT_DENEB: u64 = 32;
pub const PROPORTIONAL_SLASHING_MULTIPLIER: u64 = 3;
pub const EPOCHS_PER_SLASHING_SPAN: u64 = 8192;

/// Balance used as the basis for rewards and penalties.
pub fn effective_balance(balance: GweiNewtype) -> GweiNewtype {
    balance.min(MAX_EFFECTIVE_BALANCE)
}
