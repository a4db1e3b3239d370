//! # Finalized Sale
//!
//! Turns a [`WorkingSale`] into an immutable record with computed totals.
//!
//! ## Totals Are Always Recomputed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WorkingSale ──finalize()──► FinalizedSale                             │
//! │                                                                         │
//! │  SaleRecord (JSON) ──TryFrom──► WorkingSale ──finalize()──► Finalized  │
//! │        │                                                                │
//! │        └── totalUnits / totalDueCents: checked numeric, then dropped   │
//! │                                                                         │
//! │  There is no constructor that accepts a total.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::ticket::WorkingSale;
use crate::types::TicketEntry;
use crate::validation::{validate_customer_name, validate_date, validate_supplied_total};
use crate::wire::SaleRecord;

// =============================================================================
// Finalized Sale
// =============================================================================

/// A committed transaction.
///
/// ## Invariants
/// - `customer` is non-empty and trimmed
/// - `entries` is non-empty with one entry per ticket number
/// - `total_units` is the sum of entry quantities
/// - `total_due` is `total_units × UNIT_PRICE`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FinalizedSale {
    date: String,
    customer: String,
    entries: Vec<TicketEntry>,
    total_units: i64,
    #[serde(rename = "totalDueCents")]
    total_due: Money,
}

impl FinalizedSale {
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn entries(&self) -> &[TicketEntry] {
        &self.entries
    }

    pub fn total_units(&self) -> i64 {
        self.total_units
    }

    pub fn total_due(&self) -> Money {
        self.total_due
    }
}

impl WorkingSale {
    /// Closes the working sale into a [`FinalizedSale`].
    ///
    /// ## Errors
    /// - `Validation` if the sale has no entries (checked first, so an empty
    ///   sale fails whatever the customer name)
    /// - `Validation` if `customer` is empty or whitespace-only
    /// - `Validation` if `date` is empty
    ///
    /// The working sale is left as is; resetting it is the caller's job.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::WorkingSale;
    ///
    /// let mut working = WorkingSale::new();
    /// working.add_entry(5, 3).unwrap();
    /// working.add_entry(7, 10).unwrap();
    ///
    /// let sale = working.finalize("18/10/2026", "  Ana ").unwrap();
    /// assert_eq!(sale.customer(), "Ana");
    /// assert_eq!(sale.total_units(), 13);
    /// assert_eq!(sale.total_due().to_string(), "$3.25");
    /// ```
    pub fn finalize(&self, date: &str, customer: &str) -> CoreResult<FinalizedSale> {
        if self.is_empty() {
            return Err(ValidationError::Required {
                field: "entries".to_string(),
            }
            .into());
        }
        let customer = validate_customer_name(customer)?;
        let date = validate_date(date)?;

        Ok(FinalizedSale {
            date,
            customer,
            entries: self.entries().to_vec(),
            total_units: self.total_units(),
            total_due: self.total_due(),
        })
    }
}

// =============================================================================
// Boundary Conversion
// =============================================================================

/// Rebuilds a sale from an untrusted record.
///
/// Entries are replayed through [`WorkingSale::add_entry`], so duplicates
/// merge and a merged quantity past the cap is rejected. Supplied totals must
/// be numeric and are otherwise ignored.
impl TryFrom<SaleRecord> for FinalizedSale {
    type Error = crate::error::CoreError;

    fn try_from(record: SaleRecord) -> CoreResult<Self> {
        if let Some(value) = &record.total_units {
            validate_supplied_total("totalUnits", value)?;
        }
        if let Some(value) = &record.total_due_cents {
            validate_supplied_total("totalDueCents", value)?;
        }
        if let Some(value) = &record.total_due {
            validate_supplied_total("totalDue", value)?;
        }

        let mut working = WorkingSale::new();
        for entry in &record.entries {
            working.add_entry(entry.number, entry.quantity)?;
        }
        working.finalize(&record.date, &record.customer)
    }
}

impl<'de> Deserialize<'de> for FinalizedSale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = SaleRecord::deserialize(deserializer)?;
        FinalizedSale::try_from(record).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use serde_json::json;

    fn sample_working() -> WorkingSale {
        let mut working = WorkingSale::new();
        working.add_entry(5, 3).unwrap();
        working.add_entry(7, 10).unwrap();
        working
    }

    #[test]
    fn test_finalize_computes_totals() {
        let sale = sample_working().finalize("18/10/2026", "Ana").unwrap();
        assert_eq!(sale.total_units(), 13);
        assert_eq!(sale.total_due(), Money::from_cents(325));
        assert_eq!(sale.entries().len(), 2);
        assert_eq!(sale.date(), "18/10/2026");
    }

    #[test]
    fn test_finalize_empty_sale_fails_for_any_customer() {
        let empty = WorkingSale::new();
        for customer in ["Ana", "", "   ", "Someone Else"] {
            let err = empty.finalize("18/10/2026", customer).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{customer:?}");
        }
    }

    #[test]
    fn test_finalize_rejects_blank_customer() {
        let working = sample_working();
        for customer in ["", "  ", "\t\n"] {
            assert!(matches!(
                working.finalize("18/10/2026", customer),
                Err(CoreError::Validation(ValidationError::Required { .. }))
            ));
        }
    }

    #[test]
    fn test_long_customer_names_finalize_and_load() {
        let customer = "A".repeat(121);
        let sale = sample_working().finalize("18/10/2026", &customer).unwrap();
        assert_eq!(sale.customer(), customer);

        let stored = serde_json::to_value(&sale).unwrap();
        let loaded: FinalizedSale = serde_json::from_value(stored).unwrap();
        assert_eq!(loaded, sale);
    }

    #[test]
    fn test_finalize_does_not_mutate_working_sale() {
        let working = sample_working();
        let before = working.clone();
        working.finalize("18/10/2026", "Ana").unwrap();
        assert_eq!(working, before);
    }

    #[test]
    fn test_wire_shape() {
        let sale = sample_working().finalize("18/10/2026", "Ana").unwrap();
        let value = serde_json::to_value(&sale).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "18/10/2026",
                "customer": "Ana",
                "entries": [
                    { "number": 5, "quantity": 3 },
                    { "number": 7, "quantity": 10 }
                ],
                "totalUnits": 13,
                "totalDueCents": 325
            })
        );
    }

    #[test]
    fn test_supplied_totals_are_recomputed() {
        let payload = json!({
            "date": "18/10/2026",
            "customer": "Ana",
            "entries": [{ "number": 5, "quantity": 3 }],
            "totalUnits": 9999,
            "totalDueCents": 1,
            "totalDue": 12.5
        });
        let sale: FinalizedSale = serde_json::from_value(payload).unwrap();
        assert_eq!(sale.total_units(), 3);
        assert_eq!(sale.total_due(), Money::from_cents(75));
    }

    #[test]
    fn test_non_numeric_total_rejected() {
        let payload = json!({
            "date": "18/10/2026",
            "customer": "Ana",
            "entries": [{ "number": 5, "quantity": 3 }],
            "totalUnits": "lots"
        });
        let err = serde_json::from_value::<FinalizedSale>(payload).unwrap_err();
        assert!(err.to_string().contains("totalUnits"));
    }

    #[test]
    fn test_inbound_duplicates_merge_and_cap() {
        let merged = json!({
            "date": "18/10/2026",
            "customer": "Ana",
            "entries": [
                { "number": 5, "quantity": 30 },
                { "number": 5, "quantity": 20 }
            ]
        });
        let sale: FinalizedSale = serde_json::from_value(merged).unwrap();
        assert_eq!(sale.entries().len(), 1);
        assert_eq!(sale.entries()[0].quantity(), 50);

        let over = json!({
            "date": "18/10/2026",
            "customer": "Ana",
            "entries": [
                { "number": 5, "quantity": 60 },
                { "number": 5, "quantity": 60 }
            ]
        });
        assert!(serde_json::from_value::<FinalizedSale>(over).is_err());
    }

    #[test]
    fn test_malformed_entries_rejected() {
        for entries in [
            json!("not a list"),
            json!([{ "number": 5 }]),
            json!([{ "number": "5", "quantity": 1 }]),
            json!([{ "number": 5.5, "quantity": 1 }]),
            json!([]),
        ] {
            let payload = json!({ "date": "18/10/2026", "customer": "Ana", "entries": entries });
            assert!(serde_json::from_value::<FinalizedSale>(payload).is_err());
        }
    }
}
