mod eth;
mod gwei;

pub use eth::EthNewtype;
pub use gwei::{EthToGweiError, GweiNewtype};

pub const GWEI_PER_ETH_F64: f64 = 1_000_000_000_f64;
