mod epoch;

pub use epoch::hours_to_epochs;
pub use epoch::EpochCount;
