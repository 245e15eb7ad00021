use std::{fmt::Display, num::ParseFloatError, str::FromStr};

use serde::Serialize;

use super::{GweiNewtype, GWEI_PER_ETH_F64};

/// This type tracks an amount of ETH. Penalties are computed in GweiNewtype, converting to ETH
/// only at the last moment when imprecise is fine.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EthNewtype(pub f64);

impl Display for EthNewtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let EthNewtype(amount) = self;
        match f.precision() {
            Some(precision) => write!(f, "{amount:.precision$}"),
            None => write!(f, "{amount}"),
        }
    }
}

/// NOTE: this loses precision.
impl From<GweiNewtype> for EthNewtype {
    fn from(GweiNewtype(amount): GweiNewtype) -> Self {
        EthNewtype(amount as f64 / GWEI_PER_ETH_F64)
    }
}

impl FromStr for EthNewtype {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<f64>().map(EthNewtype)
    }
}
