//! # Domain Types
//!
//! The small value types every other module is built from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────────┐                    │
//! │  │  TicketNumber   │◄───────│    TicketEntry      │                    │
//! │  │  ─────────────  │        │  ─────────────────  │                    │
//! │  │  u8, 00..=99    │        │  number             │                    │
//! │  └─────────────────┘        │  quantity 1..=100   │                    │
//! │                             └─────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both types can only be built through validation, so holding one is proof
//! that it is in range. Deserialization goes through the same checks.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_quantity, validate_ticket_number, ValidationResult};
use crate::wire::EntryRecord;
use crate::UNIT_PRICE;

// =============================================================================
// Ticket Number
// =============================================================================

/// A ticket number between 00 and 99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct TicketNumber(u8);

impl TicketNumber {
    /// Returns the number as a plain integer.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the number as an array index into per-number tables.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Iterates all ticket numbers in ascending order.
    pub fn all() -> impl Iterator<Item = TicketNumber> {
        (0..=crate::MAX_TICKET_NUMBER as u8).map(TicketNumber)
    }
}

impl TryFrom<i64> for TicketNumber {
    type Error = crate::error::ValidationError;

    fn try_from(value: i64) -> ValidationResult<Self> {
        validate_ticket_number(value)?;
        Ok(TicketNumber(value as u8))
    }
}

/// Two-digit display, the way numbers are printed on tickets.
impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl<'de> Deserialize<'de> for TicketNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        TicketNumber::try_from(raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Ticket Entry
// =============================================================================

/// Units of one ticket number sold within a single sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct TicketEntry {
    number: TicketNumber,
    quantity: i64,
}

impl TicketEntry {
    /// Creates a validated entry.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::TicketEntry;
    ///
    /// let entry = TicketEntry::new(7, 10).unwrap();
    /// assert_eq!(entry.number().to_string(), "07");
    /// assert!(TicketEntry::new(100, 1).is_err());
    /// assert!(TicketEntry::new(7, 0).is_err());
    /// ```
    pub fn new(number: i64, quantity: i64) -> ValidationResult<Self> {
        let number = TicketNumber::try_from(number)?;
        validate_quantity(quantity)?;
        Ok(TicketEntry { number, quantity })
    }

    pub fn number(&self) -> TicketNumber {
        self.number
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Line subtotal at the fixed unit price.
    pub fn subtotal(&self) -> Money {
        UNIT_PRICE.multiply_quantity(self.quantity)
    }

    /// Replaces the quantity after the caller has checked the cap.
    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

impl<'de> Deserialize<'de> for TicketEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = EntryRecord::deserialize(deserializer)?;
        TicketEntry::new(raw.number, raw.quantity).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_number_range() {
        assert_eq!(TicketNumber::try_from(0).unwrap().value(), 0);
        assert_eq!(TicketNumber::try_from(99).unwrap().value(), 99);
        assert!(TicketNumber::try_from(100).is_err());
        assert!(TicketNumber::try_from(-1).is_err());
    }

    #[test]
    fn test_ticket_number_display_is_zero_padded() {
        assert_eq!(TicketNumber::try_from(5).unwrap().to_string(), "05");
        assert_eq!(TicketNumber::try_from(42).unwrap().to_string(), "42");
    }

    #[test]
    fn test_all_numbers() {
        let all: Vec<u8> = TicketNumber::all().map(|n| n.value()).collect();
        assert_eq!(all.len(), crate::TICKET_NUMBER_COUNT);
        assert_eq!(all.first(), Some(&0));
        assert_eq!(all.last(), Some(&99));
    }

    #[test]
    fn test_entry_subtotal() {
        let entry = TicketEntry::new(5, 3).unwrap();
        assert_eq!(entry.subtotal().cents(), 75);
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = TicketEntry::new(7, 10).unwrap();
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json, serde_json::json!({ "number": 7, "quantity": 10 }));
    }

    #[test]
    fn test_entry_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<TicketEntry>(r#"{"number":7,"quantity":10}"#).is_ok());
        assert!(serde_json::from_str::<TicketEntry>(r#"{"number":100,"quantity":1}"#).is_err());
        assert!(serde_json::from_str::<TicketEntry>(r#"{"number":7,"quantity":0}"#).is_err());
        assert!(serde_json::from_str::<TicketEntry>(r#"{"number":"7","quantity":1}"#).is_err());
    }
}
