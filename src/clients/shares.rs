use std::{collections::BTreeMap, fs, path::Path};

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

use super::ClientType;
use crate::errors::PenaltyError;

/// Once a third of the network misbehaves together the correlated penalty burns the full
/// effective balance, larger shares don't make it worse.
pub const MAX_CORRELATION_FACTOR: f64 = 1.0 / 3.0;

pub const PARTS_PER_TRILLION: u64 = 1_000_000_000_000;

pub fn correlation_factor(share: f64) -> f64 {
    share.min(MAX_CORRELATION_FACTOR)
}

/// Share in parts per trillion, lets the correlated penalty stay in integer Gwei.
pub fn share_ppt(share: f64) -> u64 {
    (share * PARTS_PER_TRILLION as f64).round() as u64
}

#[derive(Debug, Error)]
pub enum ClientSharesError {
    #[error("failed to read client shares file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse client shares file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no {0} clients in client shares")]
    Empty(ClientType),
    #[error("share of {client_type} client {client_name} should be within [0, 1], got {share}")]
    OutOfRange {
        client_type: ClientType,
        client_name: String,
        share: f64,
    },
}

// Lookups normalize the requested name, so the table keys are normalized the same way.
fn normalized_client_names<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let shares = BTreeMap::<String, f64>::deserialize(deserializer)?;

    let mut normalized = BTreeMap::new();
    for (client_name, share) in shares {
        let client_name = client_name.trim().to_lowercase();
        if normalized.insert(client_name.clone(), share).is_some() {
            let message = format!("client {client_name} is listed more than once");
            return Err(de::Error::custom(message));
        }
    }

    Ok(normalized)
}

/// Market share per client, per client type, as a fraction of all validators.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ClientShares {
    #[serde(deserialize_with = "normalized_client_names")]
    execution: BTreeMap<String, f64>,
    #[serde(deserialize_with = "normalized_client_names")]
    consensus: BTreeMap<String, f64>,
}

impl Default for ClientShares {
    fn default() -> Self {
        let execution = [
            ("geth", 0.55),
            ("nethermind", 0.28),
            ("besu", 0.14),
            ("erigon", 0.03),
        ];
        let consensus = [
            ("nimbus", 0.11),
            ("lighthouse", 0.30),
            ("prysm", 0.38),
            ("teku", 0.1963),
            ("lodestar", 0.01),
        ];

        Self {
            execution: execution
                .into_iter()
                .map(|(name, share)| (name.to_string(), share))
                .collect(),
            consensus: consensus
                .into_iter()
                .map(|(name, share)| (name.to_string(), share))
                .collect(),
        }
    }
}

impl ClientShares {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientSharesError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading client shares");
        let bytes = fs::read(path)?;
        let client_shares: Self = serde_json::from_slice(&bytes)?;
        client_shares.validate()?;
        Ok(client_shares)
    }

    pub fn validate(&self) -> Result<(), ClientSharesError> {
        for client_type in ClientType::ALL {
            let shares = self.shares_for(client_type);

            if shares.is_empty() {
                return Err(ClientSharesError::Empty(client_type));
            }

            for (client_name, share) in shares {
                if !(0.0..=1.0).contains(share) {
                    return Err(ClientSharesError::OutOfRange {
                        client_type,
                        client_name: client_name.clone(),
                        share: *share,
                    });
                }
            }
        }

        Ok(())
    }

    fn shares_for(&self, client_type: ClientType) -> &BTreeMap<String, f64> {
        match client_type {
            ClientType::Execution => &self.execution,
            ClientType::Consensus => &self.consensus,
        }
    }

    pub fn client_names(&self, client_type: ClientType) -> impl Iterator<Item = &str> {
        self.shares_for(client_type).keys().map(String::as_str)
    }

    pub fn share(&self, client_type: ClientType, client_name: &str) -> Result<f64, PenaltyError> {
        let normalized_name = client_name.trim().to_lowercase();
        self.shares_for(client_type)
            .get(&normalized_name)
            .copied()
            .ok_or_else(|| PenaltyError::UnknownClient {
                client_type,
                client_name: client_name.to_string(),
            })
    }
}
