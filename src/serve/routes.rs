use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    response::{Html, IntoResponse, Response},
    Extension, Form, Json,
};
use tracing::{debug, instrument};

use super::{html, StateExtension};
use crate::{
    errors::PenaltyError, health::HealthCheckable, input::PenaltyInput, penalties::PenaltyReport,
};

pub async fn index(Extension(state): StateExtension) -> Html<String> {
    Html(html::index_page(state.calculator.client_shares()))
}

#[instrument(skip_all)]
pub async fn calculate_form(
    Extension(state): StateExtension,
    form: Result<Form<PenaltyInput>, FormRejection>,
) -> Response {
    let report = form
        .map_err(|rejection| PenaltyError::invalid_input(rejection.body_text()))
        .and_then(|Form(input)| state.calculator.estimate(&input));

    match report {
        Ok(PenaltyReport::Offline(report)) => {
            Html(html::offline_result_page(&report)).into_response()
        }
        Ok(PenaltyReport::DoubleSigning(report)) => {
            Html(html::double_signing_result_page(&report)).into_response()
        }
        Err(error) => {
            debug!(%error, "calculator form rejected");
            (error.status_code(), Html(html::error_page(&error))).into_response()
        }
    }
}

#[instrument(skip_all)]
pub async fn calculate_json(
    Extension(state): StateExtension,
    input: Result<Json<PenaltyInput>, JsonRejection>,
) -> Result<Json<PenaltyReport>, PenaltyError> {
    let Json(input) =
        input.map_err(|rejection| PenaltyError::invalid_input(rejection.body_text()))?;
    let report = state.calculator.estimate(&input)?;
    Ok(Json(report))
}

pub async fn client_shares(Extension(state): StateExtension) -> impl IntoResponse {
    Json(state.calculator.client_shares().clone())
}

pub async fn healthz(Extension(state): StateExtension) -> impl IntoResponse {
    state.health.health_status().into_response()
}
