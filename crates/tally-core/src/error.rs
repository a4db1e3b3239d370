//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Sales-ledger rule violations                   │
//! │  └── ValidationError  - Input shape / range failures                   │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  └── DbError          - Ledger slot read/write failures                │
//! │                                                                         │
//! │  counter errors (in app)                                               │
//! │  ├── PrintError       - Print server unreachable / non-success         │
//! │  └── ApiError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Operator               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recoverability
//! Every variant here is recoverable at the call site. Operations that fail
//! with one of these errors leave the working sale and the ledger untouched.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Sales-ledger rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Merging an entry would push one ticket number past its cap.
    ///
    /// ## User Workflow
    /// ```text
    /// Working sale has 07 × 60
    ///      │
    ///      ▼
    /// add 07 × 50
    ///      │
    ///      ▼
    /// LimitExceeded { number: 7, current: 60, requested: 50, max: 100 }
    ///      │
    ///      ▼
    /// Operator sees the message, entry stays at 60
    /// ```
    #[error(
        "Ticket {number:02} would reach {total} units (current {current}, requested {requested}, max {max})",
        total = current + requested
    )]
    LimitExceeded {
        number: u8,
        current: i64,
        requested: i64,
        max: i64,
    },

    /// Removal target does not exist in the working sale.
    #[error("No entry at position {index} (sale has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Closeout attempted with nothing recorded for the day.
    #[error("The day ledger is empty, nothing to close out")]
    EmptyLedger,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input or an inbound payload doesn't meet
/// requirements. Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric total, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_exceeded_message() {
        let err = CoreError::LimitExceeded {
            number: 7,
            current: 60,
            requested: 50,
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "Ticket 07 would reach 110 units (current 60, requested 50, max 100)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer".to_string(),
        };
        assert_eq!(err.to_string(), "customer is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 100,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "customer".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
