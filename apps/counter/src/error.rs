//! # API Error Type
//!
//! Unified error type for counter commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Counter                            │
//! │                                                                         │
//! │  Operator                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  > add 7 120                                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Core Error? ──── CoreError::Validation(..) ───────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Database Error? ── DbError::Busy(..) ─────────── ApiError ────►│  │
//! │  │         │                                          ▲            │  │
//! │  │         ▼                                          │            │  │
//! │  │  Print Error? ───── PrintError::Transport(..) ─────┘            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  [ValidationError] quantity must be between 1 and 100                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these errors end the session. Validation, limit and index errors
//! leave the working sale untouched; a transport failure leaves the ledger
//! as committed.

use serde::Serialize;
use tally_core::CoreError;
use tally_db::DbError;

use crate::print::PrintError;

/// API error returned from counter commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "LIMIT_EXCEEDED",
///   "message": "Ticket 07 would reach 110 units (current 100, requested 10, max 100)"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad shape or range on input
    ValidationError,

    /// Per-number cap breached
    LimitExceeded,

    /// No entry or sale at the given position
    IndexOutOfRange,

    /// Closeout attempted with nothing recorded
    EmptyLedger,

    /// Print server unreachable or returned a non-success status
    TransportFailure,

    /// Database operation failed
    DatabaseError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Positions are shown to the operator starting at 1.
    pub fn position_out_of_range(index: usize, len: usize, what: &str) -> Self {
        ApiError::new(
            ErrorCode::IndexOutOfRange,
            format!("No {} at position {} ({} recorded)", what, index + 1, len),
        )
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Busy(e) => {
                tracing::warn!("Ledger database busy: {}", e);
                ApiError::new(
                    ErrorCode::DatabaseError,
                    "Another counter is writing the ledger, try again",
                )
            }
            DbError::CorruptPayload { slot, reason } => {
                tracing::error!(slot = %slot, "Stored ledger is corrupt: {}", reason);
                ApiError::new(
                    ErrorCode::DatabaseError,
                    format!("Stored ledger '{}' could not be read", slot),
                )
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            e @ CoreError::LimitExceeded { .. } => {
                ApiError::new(ErrorCode::LimitExceeded, e.to_string())
            }
            CoreError::IndexOutOfRange { index, len } => {
                ApiError::position_out_of_range(index, len, "entry")
            }
            e @ CoreError::EmptyLedger => ApiError::new(ErrorCode::EmptyLedger, e.to_string()),
        }
    }
}

/// Converts print errors to API errors.
impl From<PrintError> for ApiError {
    fn from(err: PrintError) -> Self {
        match err {
            e @ PrintError::Transport(_) => {
                ApiError::new(ErrorCode::TransportFailure, e.to_string())
            }
            e @ PrintError::Output { .. } => {
                tracing::error!("Printed document could not be saved: {}", e);
                ApiError::internal(e.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
