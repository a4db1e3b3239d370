//! # Validation Module
//!
//! Input validation for ticket entries, sales and inbound payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Counter command parsing                                      │
//! │  ├── Argument types (clap)                                             │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Wire boundary (print server, ledger slot payloads)           │
//! │  ├── JSON shape (serde)                                                │
//! │  └── Non-numeric totals rejected                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE: range and presence rules                        │
//! │  ├── Ticket number 00-99                                               │
//! │  ├── Quantity 1-100                                                    │
//! │  └── Customer and date present                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_quantity, validate_ticket_number};
//!
//! validate_ticket_number(42).unwrap();
//! validate_quantity(5).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_QUANTITY_PER_NUMBER, MAX_TICKET_NUMBER, MIN_TICKET_NUMBER};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a ticket number.
///
/// ## Rules
/// - Must be between 0 and 99 inclusive
pub fn validate_ticket_number(number: i64) -> ValidationResult<()> {
    if !(MIN_TICKET_NUMBER..=MAX_TICKET_NUMBER).contains(&number) {
        return Err(ValidationError::OutOfRange {
            field: "number".to_string(),
            min: MIN_TICKET_NUMBER,
            max: MAX_TICKET_NUMBER,
        });
    }

    Ok(())
}

/// Validates the quantity of a single entry.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_QUANTITY_PER_NUMBER (100)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Counter: add 07 25                                                     │
/// │                                                                         │
/// │  validate_quantity(25) ← THIS FUNCTION                                 │
/// │       │                                                                 │
/// │       ├── qty <= 0?  → Error: "quantity must be positive"              │
/// │       │                                                                 │
/// │       ├── qty > 100? → Error: "quantity must be between 1 and 100"     │
/// │       │                                                                 │
/// │       └── OK → WorkingSale::add_entry merges into the sale             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_QUANTITY_PER_NUMBER {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY_PER_NUMBER,
        });
    }

    Ok(())
}

/// Validates a caller-supplied total.
///
/// Totals arriving from outside are never used, but a present total must at
/// least be a JSON number. `null` counts as absent.
pub fn validate_supplied_total(field: &str, value: &serde_json::Value) -> ValidationResult<()> {
    if value.is_null() || value.is_number() {
        return Ok(());
    }

    Err(ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("expected a number, got {}", json_kind(value)),
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty or whitespace-only
/// - No length limit; stored ledgers must always load back
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }

    Ok(name.to_string())
}

/// Validates a business date and returns it trimmed.
///
/// Dates are opaque display strings (for example `18/10/2026`); only
/// presence and the absence of control characters are checked.
pub fn validate_date(date: &str) -> ValidationResult<String> {
    let date = date.trim();

    if date.is_empty() {
        return Err(ValidationError::Required {
            field: "date".to_string(),
        });
    }

    if date.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "contains control characters".to_string(),
        });
    }

    Ok(date.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_ticket_number() {
        assert!(validate_ticket_number(0).is_ok());
        assert!(validate_ticket_number(42).is_ok());
        assert!(validate_ticket_number(99).is_ok());

        assert!(validate_ticket_number(-1).is_err());
        assert!(validate_ticket_number(100).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());

        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_quantity(-3).is_err());
        assert!(matches!(
            validate_quantity(101),
            Err(ValidationError::OutOfRange { max: 100, .. })
        ));
    }

    #[test]
    fn test_validate_customer_name() {
        assert_eq!(validate_customer_name("  Ana  ").unwrap(), "Ana");
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   \t").is_err());
        let long = "x".repeat(500);
        assert_eq!(validate_customer_name(&long).unwrap(), long);
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(validate_date("18/10/2026").unwrap(), "18/10/2026");
        assert!(validate_date(" ").is_err());
        assert!(validate_date("18/10\n2026").is_err());
    }

    #[test]
    fn test_validate_supplied_total() {
        assert!(validate_supplied_total("totalUnits", &json!(13)).is_ok());
        assert!(validate_supplied_total("totalDue", &json!(3.25)).is_ok());
        assert!(validate_supplied_total("totalUnits", &json!(null)).is_ok());

        let err = validate_supplied_total("totalUnits", &json!("13")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "totalUnits has invalid format: expected a number, got a string"
        );
    }
}
