pub mod beacon_chain;
pub mod clients;
mod env;
pub mod errors;
mod form_codecs;
mod health;
pub mod input;
pub mod log;
pub mod penalties;
mod serve;
pub mod units;

pub use beacon_chain::{hours_to_epochs, EpochCount};
pub use clients::{ClientShares, ClientSharesError, ClientType};
pub use env::{EnvConfig, EnvError};
pub use errors::PenaltyError;
pub use input::{PenaltyInput, PenaltyRequest, PenaltyType};
pub use penalties::{DoubleSigningReport, OfflineReport, PenaltyCalculator, PenaltyReport};
pub use serve::{router, start_server, ServeHealth, State};
pub use units::{EthNewtype, GweiNewtype};
