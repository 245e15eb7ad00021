//! Turns raw calculator input, as submitted by the HTML form, the JSON API or the CLI, into a
//! typed request. Every check happens here so no formula runs on a request that will end up
//! rejected.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    clients::{ClientShares, ClientType},
    errors::PenaltyError,
    form_codecs,
    units::{EthNewtype, EthToGweiError, GweiNewtype},
};

const OFFLINE_FORM_LABEL: &str = "Node goes offline";
const DOUBLE_SIGNING_FORM_LABEL: &str = "Double Signing - by redundant validator";

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PenaltyType {
    Offline,
    DoubleSigning,
}

impl PenaltyType {
    pub fn form_label(&self) -> &'static str {
        match self {
            PenaltyType::Offline => OFFLINE_FORM_LABEL,
            PenaltyType::DoubleSigning => DOUBLE_SIGNING_FORM_LABEL,
        }
    }
}

impl Display for PenaltyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PenaltyType::Offline => write!(f, "offline"),
            PenaltyType::DoubleSigning => write!(f, "doubleSigning"),
        }
    }
}

impl FromStr for PenaltyType {
    type Err = PenaltyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "offline" | OFFLINE_FORM_LABEL => Ok(PenaltyType::Offline),
            "doubleSigning" | "double_signing" | DOUBLE_SIGNING_FORM_LABEL => {
                Ok(PenaltyType::DoubleSigning)
            }
            unknown => Err(PenaltyError::UnsupportedPenaltyType(unknown.to_string())),
        }
    }
}

/// Calculator input as submitted. Field names follow the JSON API, the aliases are the names
/// used by the HTML form.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyInput {
    #[serde(default, alias = "penalty_type")]
    pub penalty_type: Option<String>,
    #[serde(
        default,
        alias = "balance",
        deserialize_with = "form_codecs::optional_decimal_string"
    )]
    pub balance_eth: Option<String>,
    #[serde(
        default,
        alias = "offline_hours",
        deserialize_with = "form_codecs::optional_decimal_string"
    )]
    pub offline_hours: Option<String>,
    #[serde(
        default,
        alias = "hours_since_finality",
        deserialize_with = "form_codecs::optional_decimal_string"
    )]
    pub hours_since_finality: Option<String>,
    #[serde(
        default,
        alias = "include_correlated_penalty",
        deserialize_with = "form_codecs::optional_flag"
    )]
    pub include_correlated_penalty: Option<bool>,
    #[serde(default, alias = "correlation_cause")]
    pub correlation_cause: Option<String>,
    #[serde(default, alias = "client_name")]
    pub client_name: Option<String>,
    #[serde(default, alias = "execution_client")]
    pub execution_client: Option<String>,
    #[serde(default, alias = "consensus_client")]
    pub consensus_client: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OfflineRequest {
    pub balance: GweiNewtype,
    pub offline_hours: f64,
    /// When missing the chain is assumed to have stopped finalizing when the validator went
    /// offline.
    pub hours_since_finality: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Correlation {
    pub client_type: ClientType,
    pub client_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DoubleSigningRequest {
    pub balance: GweiNewtype,
    pub correlation: Option<Correlation>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PenaltyRequest {
    Offline(OfflineRequest),
    DoubleSigning(DoubleSigningRequest),
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_balance(balance_eth: &Option<String>) -> Result<GweiNewtype, PenaltyError> {
    let balance_eth = non_empty(balance_eth)
        .ok_or_else(|| PenaltyError::invalid_input("Validator Balance is required"))?;

    // A balance that isn't a number counts as missing, the form only has one message for both.
    let eth = balance_eth
        .parse::<EthNewtype>()
        .map_err(|_| PenaltyError::invalid_input("Validator Balance is required"))?;

    GweiNewtype::try_from(eth).map_err(|error| match error {
        EthToGweiError::NotFinite => {
            PenaltyError::invalid_input("Validator Balance must be a finite number")
        }
        EthToGweiError::Negative => {
            PenaltyError::invalid_input("Validator Balance must not be negative")
        }
        EthToGweiError::TooLarge => PenaltyError::invalid_input("Validator Balance is too large"),
    })
}

fn parse_hours(hours: &str, field_name: &str) -> Result<f64, PenaltyError> {
    let hours = hours
        .parse::<f64>()
        .map_err(|_| PenaltyError::invalid_input(format!("{field_name} must be a number")))?;

    if !hours.is_finite() {
        return Err(PenaltyError::invalid_input(format!(
            "{field_name} must be a finite number"
        )));
    }

    if hours < 0.0 {
        return Err(PenaltyError::invalid_input(format!(
            "{field_name} must not be negative"
        )));
    }

    Ok(hours)
}

impl PenaltyInput {
    /// The balance is checked first, a missing balance is reported whatever else is wrong.
    pub fn validate(&self, client_shares: &ClientShares) -> Result<PenaltyRequest, PenaltyError> {
        let balance = parse_balance(&self.balance_eth)?;

        let penalty_type = non_empty(&self.penalty_type)
            .ok_or_else(|| PenaltyError::invalid_input("Penalty type is required"))?
            .parse::<PenaltyType>()?;

        let request = match penalty_type {
            PenaltyType::Offline => PenaltyRequest::Offline(self.validate_offline(balance)?),
            PenaltyType::DoubleSigning => {
                let request = self.validate_double_signing(balance, client_shares)?;
                PenaltyRequest::DoubleSigning(request)
            }
        };

        debug!(?request, "validated penalty input");

        Ok(request)
    }

    fn validate_offline(&self, balance: GweiNewtype) -> Result<OfflineRequest, PenaltyError> {
        let offline_hours = non_empty(&self.offline_hours)
            .ok_or_else(|| PenaltyError::invalid_input("Offline Duration is required"))?;
        let offline_hours = parse_hours(offline_hours, "Offline Duration")?;

        let hours_since_finality = non_empty(&self.hours_since_finality)
            .map(|hours| parse_hours(hours, "Time Since Finality"))
            .transpose()?;

        Ok(OfflineRequest {
            balance,
            offline_hours,
            hours_since_finality,
        })
    }

    fn validate_double_signing(
        &self,
        balance: GweiNewtype,
        client_shares: &ClientShares,
    ) -> Result<DoubleSigningRequest, PenaltyError> {
        if !self.include_correlated_penalty.unwrap_or(false) {
            return Ok(DoubleSigningRequest {
                balance,
                correlation: None,
            });
        }

        let client_type = non_empty(&self.correlation_cause)
            .ok_or_else(|| {
                PenaltyError::invalid_input(
                    "Correlation cause is required when including correlated penalty",
                )
            })?
            .parse::<ClientType>()?;

        let client_for_type = match client_type {
            ClientType::Execution => &self.execution_client,
            ClientType::Consensus => &self.consensus_client,
        };

        let client_name = non_empty(&self.client_name)
            .or_else(|| non_empty(client_for_type))
            .ok_or_else(|| {
                PenaltyError::invalid_input(format!(
                    "The {client_type} client is required when including correlated penalty"
                ))
            })?;

        // Unknown clients are rejected here rather than halfway through the calculation.
        client_shares.share(client_type, client_name)?;

        Ok(DoubleSigningRequest {
            balance,
            correlation: Some(Correlation {
                client_type,
                client_name: client_name.to_lowercase(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_input(balance: &str, hours: &str) -> PenaltyInput {
        PenaltyInput {
            penalty_type: Some("offline".to_string()),
            balance_eth: Some(balance.to_string()),
            offline_hours: Some(hours.to_string()),
            ..Default::default()
        }
    }

    fn correlated_input(cause: &str, client: &str) -> PenaltyInput {
        PenaltyInput {
            penalty_type: Some("doubleSigning".to_string()),
            balance_eth: Some("32".to_string()),
            include_correlated_penalty: Some(true),
            correlation_cause: Some(cause.to_string()),
            client_name: Some(client.to_string()),
            ..Default::default()
        }
    }

    fn validate(input: &PenaltyInput) -> Result<PenaltyRequest, PenaltyError> {
        input.validate(&ClientShares::default())
    }

    fn invalid_input(message: &str) -> Result<PenaltyRequest, PenaltyError> {
        Err(PenaltyError::invalid_input(message))
    }

    #[test]
    fn parse_penalty_type_test() {
        let offline = Ok(PenaltyType::Offline);
        let double_signing = Ok(PenaltyType::DoubleSigning);

        assert_eq!("offline".parse::<PenaltyType>(), offline);
        assert_eq!(OFFLINE_FORM_LABEL.parse::<PenaltyType>(), offline);
        assert_eq!("doubleSigning".parse::<PenaltyType>(), double_signing);
        assert_eq!(DOUBLE_SIGNING_FORM_LABEL.parse::<PenaltyType>(), double_signing);

        let unsupported = "surround voting".parse::<PenaltyType>();
        let expected = PenaltyError::UnsupportedPenaltyType("surround voting".to_string());
        assert_eq!(unsupported, Err(expected));
    }

    #[test]
    fn form_labels_test() {
        assert_eq!(PenaltyType::Offline.form_label(), "Node goes offline");
        assert_eq!(
            PenaltyType::DoubleSigning.form_label(),
            "Double Signing - by redundant validator"
        );
    }

    #[test]
    fn validate_offline_test() {
        let request = validate(&offline_input("32", "24")).unwrap();

        assert_eq!(
            request,
            PenaltyRequest::Offline(OfflineRequest {
                balance: GweiNewtype(32_000_000_000),
                offline_hours: 24.0,
                hours_since_finality: None,
            })
        );
    }

    #[test]
    fn validate_offline_with_finality_test() {
        let input = PenaltyInput {
            hours_since_finality: Some("6".to_string()),
            ..offline_input("32", "24")
        };

        assert_eq!(
            validate(&input),
            Ok(PenaltyRequest::Offline(OfflineRequest {
                balance: GweiNewtype(32_000_000_000),
                offline_hours: 24.0,
                hours_since_finality: Some(6.0),
            }))
        );
    }

    #[test]
    fn empty_balance_wins_over_other_errors_test() {
        let input = PenaltyInput {
            penalty_type: Some("surround voting".to_string()),
            balance_eth: Some("  ".to_string()),
            offline_hours: Some("-4".to_string()),
            ..Default::default()
        };

        let required = invalid_input("Validator Balance is required");
        assert_eq!(validate(&input), required);
        assert_eq!(validate(&PenaltyInput::default()), required);
    }

    #[test]
    fn malformed_balance_test() {
        let not_a_number = validate(&offline_input("lots", "24"));
        let negative = validate(&offline_input("-1", "24"));

        assert_eq!(not_a_number, invalid_input("Validator Balance is required"));
        assert_eq!(negative, invalid_input("Validator Balance must not be negative"));
    }

    #[test]
    fn missing_offline_hours_test() {
        let result = validate(&offline_input("32", ""));
        assert_eq!(result, invalid_input("Offline Duration is required"));
    }

    #[test]
    fn negative_offline_hours_test() {
        let result = validate(&offline_input("32", "-1"));
        assert_eq!(result, invalid_input("Offline Duration must not be negative"));
    }

    #[test]
    fn unsupported_penalty_type_test() {
        let input = PenaltyInput {
            penalty_type: Some("proposer equivocation".to_string()),
            ..offline_input("32", "1")
        };

        let result = validate(&input);
        assert!(matches!(result, Err(PenaltyError::UnsupportedPenaltyType(_))));
    }

    #[test]
    fn double_signing_without_correlation_test() {
        let input = PenaltyInput {
            penalty_type: Some("doubleSigning".to_string()),
            balance_eth: Some("32".to_string()),
            correlation_cause: Some("execution".to_string()),
            ..Default::default()
        };

        assert_eq!(
            validate(&input),
            Ok(PenaltyRequest::DoubleSigning(DoubleSigningRequest {
                balance: GweiNewtype(32_000_000_000),
                correlation: None,
            }))
        );
    }

    #[test]
    fn correlation_requires_cause_test() {
        let input = PenaltyInput {
            correlation_cause: None,
            ..correlated_input("execution", "geth")
        };

        assert_eq!(
            validate(&input),
            invalid_input(
                "Correlation cause is required when including correlated penalty"
            )
        );
    }

    #[test]
    fn correlation_picks_client_for_cause_test() {
        let input = PenaltyInput {
            client_name: None,
            execution_client: Some("Nethermind".to_string()),
            consensus_client: Some("teku".to_string()),
            ..correlated_input("execution", "geth")
        };

        assert_eq!(
            validate(&input),
            Ok(PenaltyRequest::DoubleSigning(DoubleSigningRequest {
                balance: GweiNewtype(32_000_000_000),
                correlation: Some(Correlation {
                    client_type: ClientType::Execution,
                    client_name: "nethermind".to_string(),
                }),
            }))
        );
    }

    #[test]
    fn correlation_requires_client_test() {
        let input = PenaltyInput {
            client_name: None,
            execution_client: Some("geth".to_string()),
            ..correlated_input("consensus", "")
        };

        assert_eq!(
            validate(&input),
            invalid_input(
                "The consensus client is required when including correlated penalty"
            )
        );
    }

    #[test]
    fn unknown_client_test() {
        assert_eq!(
            validate(&correlated_input("consensus", "geth")),
            Err(PenaltyError::UnknownClient {
                client_type: ClientType::Consensus,
                client_name: "geth".to_string(),
            })
        );
    }

    #[test]
    fn unknown_cause_test() {
        let result = validate(&correlated_input("relay", "geth"));
        assert!(matches!(result, Err(PenaltyError::InvalidInput(_))));
    }

    #[test]
    fn deserialize_form_field_names_test() {
        let input: PenaltyInput = serde_json::from_str(
            r#"{
                "penalty_type": "Double Signing - by redundant validator",
                "balance": "32",
                "include_correlated_penalty": "true",
                "correlation_cause": "consensus",
                "consensus_client": "prysm"
            }"#,
        )
        .unwrap();

        assert_eq!(input.balance_eth.as_deref(), Some("32"));
        assert_eq!(input.include_correlated_penalty, Some(true));
        assert_eq!(input.consensus_client.as_deref(), Some("prysm"));
    }

    #[test]
    fn deserialize_api_field_names_test() {
        let input: PenaltyInput = serde_json::from_str(
            r#"{
                "penaltyType": "offline",
                "balanceEth": 32,
                "offlineHours": "24"
            }"#,
        )
        .unwrap();

        assert_eq!(input.penalty_type.as_deref(), Some("offline"));
        assert_eq!(input.balance_eth.as_deref(), Some("32"));
        assert_eq!(input.offline_hours.as_deref(), Some("24"));
    }
}
