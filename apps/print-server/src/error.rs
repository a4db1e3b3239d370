//! # Service Errors
//!
//! Maps request failures to HTTP responses.
//!
//! ```text
//! ┌──────────────────────────────┬────────┬──────────────────┐
//! │ Cause                        │ Status │ code             │
//! ├──────────────────────────────┼────────┼──────────────────┤
//! │ Malformed JSON / bad entries │ 400    │ VALIDATION_ERROR │
//! │ Closeout of an empty ledger  │ 422    │ EMPTY_LEDGER     │
//! │ Anything else                │ 500    │ INTERNAL         │
//! └──────────────────────────────┴────────┴──────────────────┘
//! ```
//! The body is always `{ "code": ..., "message": ... }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tally_core::CoreError;

/// Request-level failure.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Closeout requested for an empty ledger")]
    EmptyLedger,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::EmptyLedger => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "VALIDATION_ERROR",
            ServiceError::EmptyLedger => "EMPTY_LEDGER",
            ServiceError::Internal(_) => "INTERNAL",
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyLedger => ServiceError::EmptyLedger,
            other => ServiceError::BadRequest(other.to_string()),
        }
    }
}

/// Every JSON rejection is the caller's fault here, including failed domain
/// validation inside the deserializer, so all of them become 400.
impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
