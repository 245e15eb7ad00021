use serde::Serialize;
use tracing::debug;

use super::{
    inactivity_penalty, long_term_penalty, missed_attestation_rewards, slashing_penalty,
    PenaltyCalculator,
};
use crate::{
    beacon_chain::{hours_to_epochs, EpochCount},
    clients::{correlation_factor, ClientType},
    errors::PenaltyError,
    input::{DoubleSigningRequest, OfflineRequest, PenaltyInput, PenaltyRequest},
    units::{EthNewtype, GweiNewtype},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineReport {
    pub offline_epochs: EpochCount,
    pub epochs_since_finality: EpochCount,
    pub inactivity_penalty_gwei: GweiNewtype,
    pub inactivity_penalty_eth: EthNewtype,
    pub missed_rewards_gwei: GweiNewtype,
    pub missed_rewards_eth: EthNewtype,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubleSigningReport {
    pub include_correlated_penalty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_cause: Option<ClientType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_factor: Option<f64>,
    pub base_slashing_penalty_gwei: GweiNewtype,
    pub base_slashing_penalty_eth: EthNewtype,
    pub additional_correlated_penalty_gwei: GweiNewtype,
    pub additional_correlated_penalty_eth: EthNewtype,
    pub long_term_penalty_gwei: GweiNewtype,
    pub long_term_penalty_eth: EthNewtype,
    pub total_penalty_gwei: GweiNewtype,
    pub total_penalty_eth: EthNewtype,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "penaltyType", rename_all = "camelCase")]
pub enum PenaltyReport {
    Offline(OfflineReport),
    DoubleSigning(DoubleSigningReport),
}

impl PenaltyCalculator {
    /// Validates raw input and runs the pipeline for its penalty type.
    pub fn estimate(&self, input: &PenaltyInput) -> Result<PenaltyReport, PenaltyError> {
        let request = input.validate(self.client_shares()).map_err(|error| {
            debug!(%error, "rejected penalty input");
            error
        })?;

        self.calculate(&request)
    }

    pub fn calculate(&self, request: &PenaltyRequest) -> Result<PenaltyReport, PenaltyError> {
        match request {
            PenaltyRequest::Offline(request) => {
                let report = self.offline(request)?;
                Ok(PenaltyReport::Offline(report))
            }
            PenaltyRequest::DoubleSigning(request) => {
                let report = self.double_signing(request)?;
                Ok(PenaltyReport::DoubleSigning(report))
            }
        }
    }

    pub fn offline(&self, request: &OfflineRequest) -> Result<OfflineReport, PenaltyError> {
        let offline_epochs = hours_to_epochs(request.offline_hours)?;
        let epochs_since_finality = match request.hours_since_finality {
            Some(hours) => hours_to_epochs(hours)?,
            None => offline_epochs,
        };

        let inactivity_penalty =
            inactivity_penalty(request.balance, offline_epochs, epochs_since_finality);
        let missed_rewards = missed_attestation_rewards(request.balance, offline_epochs);

        debug!(
            balance = %request.balance,
            %offline_epochs,
            %epochs_since_finality,
            %inactivity_penalty,
            %missed_rewards,
            "computed offline penalties"
        );

        Ok(OfflineReport {
            offline_epochs,
            epochs_since_finality,
            inactivity_penalty_gwei: inactivity_penalty,
            inactivity_penalty_eth: inactivity_penalty.into(),
            missed_rewards_gwei: missed_rewards,
            missed_rewards_eth: missed_rewards.into(),
        })
    }

    pub fn double_signing(
        &self,
        request: &DoubleSigningRequest,
    ) -> Result<DoubleSigningReport, PenaltyError> {
        let base_penalty = slashing_penalty(request.balance);
        let correlation = request.correlation.as_ref();

        let (slashing_total, additional_penalty, correlation_factor) = match correlation {
            Some(correlation) => {
                let share = self
                    .client_shares()
                    .share(correlation.client_type, &correlation.client_name)?;
                let result = self.correlated_slashing_penalty(
                    request.balance,
                    correlation.client_type,
                    &correlation.client_name,
                )?;
                (
                    result.total,
                    result.additional,
                    Some(correlation_factor(share)),
                )
            }
            None => (base_penalty, GweiNewtype::ZERO, None),
        };

        let long_term_penalty = long_term_penalty(request.balance);
        let total_penalty = slashing_total + long_term_penalty;

        debug!(
            balance = %request.balance,
            %base_penalty,
            %additional_penalty,
            %long_term_penalty,
            %total_penalty,
            "computed double signing penalties"
        );

        Ok(DoubleSigningReport {
            include_correlated_penalty: correlation.is_some(),
            correlation_cause: correlation.map(|c| c.client_type),
            client_name: correlation.map(|c| c.client_name.clone()),
            correlation_factor,
            base_slashing_penalty_gwei: base_penalty,
            base_slashing_penalty_eth: base_penalty.into(),
            additional_correlated_penalty_gwei: additional_penalty,
            additional_correlated_penalty_eth: additional_penalty.into(),
            long_term_penalty_gwei: long_term_penalty,
            long_term_penalty_eth: long_term_penalty.into(),
            total_penalty_gwei: total_penalty,
            total_penalty_eth: total_penalty.into(),
        })
    }
}
