//! # Day Ledger
//!
//! Ordered collection of the day's finalized sales.
//!
//! This type is the in-memory view only. Durability lives in tally-db's
//! `LedgerRepository`; the counter replaces its `DayLedger` from the
//! repository's result after each committed write, so the two never stay
//! apart past the next successful write.

use serde::{Deserialize, Serialize};

use crate::sale::FinalizedSale;

/// Append-only list of finalized sales, in insertion (chronological) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayLedger {
    sales: Vec<FinalizedSale>,
}

impl DayLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from sales already in chronological order.
    pub fn from_sales(sales: Vec<FinalizedSale>) -> Self {
        DayLedger { sales }
    }

    /// Adds a sale at the end.
    pub fn append(&mut self, sale: FinalizedSale) {
        self.sales.push(sale);
    }

    /// Removes every sale. Irreversible; confirmation is the caller's job.
    pub fn clear(&mut self) {
        self.sales.clear();
    }

    /// Read-only view of every sale, oldest first.
    pub fn all(&self) -> &[FinalizedSale] {
        &self.sales
    }

    /// The sale at `index`, as numbered in the history view.
    pub fn get(&self, index: usize) -> Option<&FinalizedSale> {
        self.sales.get(index)
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn into_sales(self) -> Vec<FinalizedSale> {
        self.sales
    }
}
