use std::{
    fmt,
    ops::{Add, Div, Mul},
};

use serde::Serialize;
use thiserror::Error;

use super::{EthNewtype, GWEI_PER_ETH_F64};

// Validator balances and penalties are non-negative so u64 is enough, it holds ~18B ETH. When
// serializing, it defaults to string as JSON consumers tend to parse numbers into doubles which
// lose precision above 2^53.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(into = "String")]
pub struct GweiNewtype(pub u64);

impl GweiNewtype {
    pub const ZERO: Self = Self(0);

    /// Multiplies then divides in u128 so the intermediate product can't overflow. Results too
    /// large for u64 saturate.
    pub fn mul_div(self, numerator: u64, denominator: u64) -> Self {
        let product = self.0 as u128 * numerator as u128;
        let result = product / denominator as u128;
        GweiNewtype(u64::try_from(result).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for GweiNewtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add<GweiNewtype> for GweiNewtype {
    type Output = Self;

    fn add(self, GweiNewtype(rhs): Self) -> Self::Output {
        let GweiNewtype(lhs) = self;
        GweiNewtype(lhs.saturating_add(rhs))
    }
}

impl Mul<u64> for GweiNewtype {
    type Output = Self;

    fn mul(self, rhs: u64) -> Self::Output {
        let GweiNewtype(lhs) = self;
        GweiNewtype(lhs.saturating_mul(rhs))
    }
}

impl Div<u64> for GweiNewtype {
    type Output = Self;

    fn div(self, rhs: u64) -> Self::Output {
        let GweiNewtype(lhs) = self;
        GweiNewtype(lhs / rhs)
    }
}

impl From<GweiNewtype> for f64 {
    fn from(gwei: GweiNewtype) -> Self {
        gwei.0 as f64
    }
}

impl From<GweiNewtype> for String {
    fn from(GweiNewtype(amount): GweiNewtype) -> Self {
        amount.to_string()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EthToGweiError {
    #[error("amount is not a finite number")]
    NotFinite,
    #[error("amount is negative")]
    Negative,
    #[error("amount is too large")]
    TooLarge,
}

/// Rounds to the nearest Gwei.
impl TryFrom<EthNewtype> for GweiNewtype {
    type Error = EthToGweiError;

    fn try_from(EthNewtype(amount): EthNewtype) -> Result<Self, Self::Error> {
        if !amount.is_finite() {
            return Err(EthToGweiError::NotFinite);
        }

        if amount < 0.0 {
            return Err(EthToGweiError::Negative);
        }

        let gwei = (amount * GWEI_PER_ETH_F64).round();
        if gwei >= u64::MAX as f64 {
            return Err(EthToGweiError::TooLarge);
        }

        Ok(GweiNewtype(gwei as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gwei_add_test() {
        assert_eq!(GweiNewtype(1) + GweiNewtype(1), GweiNewtype(2));
    }

    #[test]
    fn gwei_add_saturates_test() {
        let max = GweiNewtype(u64::MAX);
        assert_eq!(max + GweiNewtype(1), max);
    }

    #[test]
    fn mul_div_avoids_overflow_test() {
        let balance = GweiNewtype(32_000_000_000);
        assert_eq!(balance.mul_div(900, 1 << 26), GweiNewtype(429_153));
        let max = GweiNewtype(u64::MAX);
        assert_eq!(max.mul_div(4, 2), max);
    }

    #[test]
    fn from_eth_rounds_test() {
        assert_eq!(
            GweiNewtype::try_from(EthNewtype(32.0)),
            Ok(GweiNewtype(32_000_000_000))
        );
        assert_eq!(
            GweiNewtype::try_from(EthNewtype(0.1 + 0.2)),
            Ok(GweiNewtype(300_000_000))
        );
    }

    #[test]
    fn from_eth_rejects_invalid_test() {
        assert_eq!(
            GweiNewtype::try_from(EthNewtype(-1.0)),
            Err(EthToGweiError::Negative)
        );
        assert_eq!(
            GweiNewtype::try_from(EthNewtype(f64::NAN)),
            Err(EthToGweiError::NotFinite)
        );
        assert_eq!(
            GweiNewtype::try_from(EthNewtype(1e12)),
            Err(EthToGweiError::TooLarge)
        );
    }

    #[test]
    fn serialize_as_string_test() {
        let json = serde_json::to_string(&GweiNewtype(1_843_200)).unwrap();
        assert_eq!(json, "\"1843200\"");
    }
}
