//! # Working Sale
//!
//! Accumulates `(ticket number, quantity)` entries for the customer
//! currently being served.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Working Sale Operations                              │
//! │                                                                         │
//! │  Operator Action         Method                 State Change            │
//! │  ───────────────         ──────                 ────────────            │
//! │                                                                         │
//! │  add 07 10 ─────────────► add_entry() ────────► push or merge          │
//! │                                                                         │
//! │  remove 2 ──────────────► remove_entry() ─────► entries.remove(i)      │
//! │                                                                         │
//! │  customer Ana ──────────► set_customer() ─────► customer = "Ana"       │
//! │                                                                         │
//! │  finalize ──────────────► finalize() ─────────► (read only)            │
//! │                                                                         │
//! │  NOTE: A failed operation never changes the working sale.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! ```text
//!        new()
//!          │
//!          ▼
//!     ┌─────────┐   finalize()    ┌───────────┐
//!     │  Open   │ ───────────────►│ Finalized │  (FinalizedSale, immutable)
//!     └────┬────┘                 └───────────┘
//!          │ abandon (drop / reset)
//!          ▼
//!     ┌───────────┐
//!     │ Abandoned │
//!     └───────────┘
//! ```
//! There is no way back from `Finalized`: the next customer gets a fresh
//! `WorkingSale`.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{TicketEntry, TicketNumber};
use crate::validation::validate_quantity;
use crate::{MAX_QUANTITY_PER_NUMBER, UNIT_PRICE};

/// The in-progress transaction.
///
/// ## Invariants
/// - At most one entry per ticket number (duplicates merge)
/// - Every entry quantity is within 1..=100
/// - Entries keep the order in which their number was first added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingSale {
    entries: Vec<TicketEntry>,
    customer: String,
}

impl WorkingSale {
    /// Creates a new empty working sale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds units of a ticket number, merging with an existing entry.
    ///
    /// ## Behavior
    /// - Number already present: quantity increases by `quantity`
    /// - Number not present: a new entry is appended
    ///
    /// ## Errors
    /// - `Validation` if `number` is outside 0..=99 or `quantity` outside 1..=100
    /// - `LimitExceeded` if the merged quantity would pass 100; the existing
    ///   entry keeps its quantity
    ///
    /// ## Returns
    /// The entry as it stands after the addition.
    pub fn add_entry(&mut self, number: i64, quantity: i64) -> CoreResult<TicketEntry> {
        let number = TicketNumber::try_from(number)?;
        validate_quantity(quantity)?;

        if let Some(entry) = self.entries.iter_mut().find(|e| e.number() == number) {
            let merged = entry.quantity() + quantity;
            if merged > MAX_QUANTITY_PER_NUMBER {
                return Err(CoreError::LimitExceeded {
                    number: number.value(),
                    current: entry.quantity(),
                    requested: quantity,
                    max: MAX_QUANTITY_PER_NUMBER,
                });
            }
            entry.set_quantity(merged);
            return Ok(*entry);
        }

        let entry = TicketEntry::new(number.value() as i64, quantity)?;
        self.entries.push(entry);
        Ok(entry)
    }

    /// Removes the entry at `index`.
    ///
    /// Later entries shift down by one, so positions shown to the operator
    /// before a removal are stale afterwards.
    pub fn remove_entry(&mut self, index: usize) -> CoreResult<TicketEntry> {
        if index >= self.entries.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Records the customer name as typed; it is validated at finalization.
    pub fn set_customer(&mut self, customer: impl Into<String>) {
        self.customer = customer.into();
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[TicketEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of entry quantities.
    pub fn total_units(&self) -> i64 {
        self.entries.iter().map(TicketEntry::quantity).sum()
    }

    /// Total units at the fixed unit price.
    pub fn total_due(&self) -> Money {
        UNIT_PRICE.multiply_quantity(self.total_units())
    }

    /// Discards every entry and the customer name.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.customer.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
