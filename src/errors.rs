use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::clients::ClientType;

#[derive(Debug, Error, PartialEq)]
pub enum PenaltyError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("unknown {client_type} client: {client_name}")]
    UnknownClient {
        client_type: ClientType,
        client_name: String,
    },
    #[error("unsupported penalty type: {0}")]
    UnsupportedPenaltyType(String),
}

impl PenaltyError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::UnknownClient { .. } => StatusCode::BAD_REQUEST,
            Self::UnsupportedPenaltyType(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for PenaltyError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (self.status_code(), Json(body)).into_response()
    }
}
