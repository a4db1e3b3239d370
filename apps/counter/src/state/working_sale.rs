//! # Working Sale State
//!
//! The one in-progress sale of the session.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Working Sale Lifecycle                                │
//! │                                                                         │
//! │  1. OPEN ─────────────────────────────────────────────────────────────► │
//! │     add 5 3     → entries: [05 × 3]                                     │
//! │     add 7 10    → entries: [05 × 3, 07 × 10]                            │
//! │     add 5 2     → entries: [05 × 5, 07 × 10]   (merged)                 │
//! │     remove 2    → entries: [05 × 5]                                     │
//! │     customer Ana                                                        │
//! │                                                                         │
//! │  2a. FINALIZE ────────────────────────────────────────────────────────► │
//! │     snapshot → ledger append (committed) → reset                        │
//! │                                                                         │
//! │  2b. ABANDON ─────────────────────────────────────────────────────────► │
//! │     reset, nothing recorded                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tally_core::WorkingSale;

/// Shared handle to the working sale.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<WorkingSale>>`; every operation is short and synchronous,
/// so the lock is never held across an await point.
#[derive(Debug, Clone, Default)]
pub struct WorkingSaleState {
    sale: Arc<Mutex<WorkingSale>>,
}

impl WorkingSaleState {
    /// Creates a new empty working sale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the working sale.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let units = working.with_sale(|sale| sale.total_units());
    /// ```
    pub fn with_sale<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&WorkingSale) -> R,
    {
        let sale = self.sale.lock().unwrap_or_else(PoisonError::into_inner);
        f(&sale)
    }

    /// Executes a function with write access to the working sale.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// working.with_sale_mut(|sale| sale.add_entry(5, 3))?;
    /// ```
    pub fn with_sale_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut WorkingSale) -> R,
    {
        let mut sale = self.sale.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut sale)
    }
}
