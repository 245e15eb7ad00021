use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{beacon_chain::SECONDS_PER_EPOCH, errors::PenaltyError};

/// A number of whole epochs, a fraction of an epoch counts as a full one.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EpochCount(pub u64);

impl EpochCount {
    pub const ZERO: Self = Self(0);
}

impl Display for EpochCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EpochCount> for u64 {
    fn from(EpochCount(count): EpochCount) -> Self {
        count
    }
}

/// Converts a duration in hours to the number of epochs it spans, rounded up.
pub fn hours_to_epochs(hours: f64) -> Result<EpochCount, PenaltyError> {
    if hours.is_nan() {
        return Err(PenaltyError::invalid_input("hours must be a number"));
    }

    if hours < 0.0 {
        return Err(PenaltyError::invalid_input(format!(
            "hours must not be negative, got {hours}"
        )));
    }

    let epochs = (hours * 3600.0 / SECONDS_PER_EPOCH as f64).ceil();

    // Float to int casts saturate, infinite hours end up as u64::MAX epochs.
    Ok(EpochCount(epochs as u64))
}
