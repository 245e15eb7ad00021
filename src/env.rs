//! Fns to read variables from the environment more conveniently, and the configuration the
//! server reads from it.

use std::{env, net::Ipv4Addr, path::PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum EnvError {
    #[error("env var {key} is not valid unicode")]
    NotUnicode { key: String },
    #[error("invalid bool value {value} for {key}")]
    InvalidBool { key: String, value: String },
    #[error("invalid port {value} for {key}")]
    InvalidPort { key: String, value: String },
}

/// Get an environment variable, encoding found or missing as Option.
pub fn get_env_var(key: &str) -> Result<Option<String>, EnvError> {
    let var = match env::var(key) {
        Err(env::VarError::NotPresent) => None,
        Err(env::VarError::NotUnicode(_)) => {
            return Err(EnvError::NotUnicode {
                key: key.to_string(),
            })
        }
        Ok(var) => Some(var),
    };

    if let Some(ref existing_var) = var {
        debug!("env var {key}: {existing_var}");
    } else {
        debug!("env var {key} requested but not found")
    };

    Ok(var)
}

pub fn get_env_bool(key: &str) -> Result<Option<bool>, EnvError> {
    get_env_var(key)?
        .map(|var| match var.to_lowercase().as_str() {
            "true" | "t" | "1" => Ok(true),
            "false" | "f" | "0" => Ok(false),
            _ => Err(EnvError::InvalidBool {
                key: key.to_string(),
                value: var,
            }),
        })
        .transpose()
}

const DEFAULT_PORT: u16 = 3002;

#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    pub bind_public_interface: bool,
    /// Replaces the built-in client share table when set.
    pub client_shares_path: Option<PathBuf>,
    pub log_json: bool,
    pub log_perf: bool,
    pub port: u16,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, EnvError> {
        let port = match get_env_var("PORT")? {
            None => DEFAULT_PORT,
            Some(port) => port.parse().map_err(|_| EnvError::InvalidPort {
                key: "PORT".to_string(),
                value: port,
            })?,
        };

        Ok(Self {
            bind_public_interface: get_env_bool("BIND_PUBLIC_INTERFACE")?.unwrap_or(true),
            client_shares_path: get_env_var("CLIENT_SHARES_PATH")?.map(PathBuf::from),
            log_json: get_env_bool("LOG_JSON")?.unwrap_or(false),
            log_perf: get_env_bool("LOG_PERF")?.unwrap_or(false),
            port,
        })
    }

    pub fn bind_address(&self) -> Ipv4Addr {
        if self.bind_public_interface {
            Ipv4Addr::UNSPECIFIED
        } else {
            Ipv4Addr::LOCALHOST
        }
    }
}
