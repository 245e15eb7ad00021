//! Client software validators run, and how much of the network runs each of them. A bug in a
//! popular client can make many validators misbehave at once, which the correlated slashing
//! penalty punishes in proportion to the share of the network affected.

mod shares;

pub use shares::correlation_factor;
pub use shares::share_ppt;
pub use shares::ClientShares;
pub use shares::ClientSharesError;
pub use shares::MAX_CORRELATION_FACTOR;
pub use shares::PARTS_PER_TRILLION;

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::PenaltyError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    Execution,
    Consensus,
}

impl ClientType {
    pub const ALL: [ClientType; 2] = [ClientType::Execution, ClientType::Consensus];
}

impl Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientType::Execution => write!(f, "execution"),
            ClientType::Consensus => write!(f, "consensus"),
        }
    }
}

impl FromStr for ClientType {
    type Err = PenaltyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "execution" => Ok(ClientType::Execution),
            "consensus" => Ok(ClientType::Consensus),
            unknown => Err(PenaltyError::invalid_input(format!(
                "Unknown correlation cause: {unknown}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_client_type_test() {
        let execution = "execution".parse::<ClientType>();
        let consensus = " Consensus".parse::<ClientType>();
        assert_eq!(execution, Ok(ClientType::Execution));
        assert_eq!(consensus, Ok(ClientType::Consensus));
        assert!(matches!(
            "mev-boost".parse::<ClientType>(),
            Err(PenaltyError::InvalidInput(_))
        ));
    }

    #[test]
    fn display_round_trips_test() {
        for client_type in ClientType::ALL {
            let parsed = client_type.to_string().parse::<ClientType>();
            assert_eq!(parsed, Ok(client_type));
        }
    }
}
