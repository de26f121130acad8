// ABOUTME: Shared API response types and error handling
// ABOUTME: Maps validation and storage failures onto HTTP status codes with an error body

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use cmdvault_core::ValidationError;
use cmdvault_storage::StorageError;

/// Acknowledgement body returned by delete and health endpoints
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> ResponseJson<Ack> {
        ResponseJson(Ack { ok: true })
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} required")]
    MissingFilter(&'static str),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::MissingFilter(_)
            | ApiError::InvalidBody(_)
            | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            ApiError::Storage(StorageError::NotFound) => self.to_string(),
            ApiError::Storage(e @ StorageError::Sqlx(_)) => {
                if e.is_foreign_key_violation() {
                    warn!("Rejected write referencing a missing parent: {}", e);
                } else {
                    error!("Storage failure: {}", e);
                }
                "Database error".to_string()
            }
            ApiError::Storage(e) => {
                error!("Storage failure: {}", e);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, ResponseJson(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
