//! # tally-core: Pure Business Logic for Ticket Tally
//!
//! This crate is the **heart** of Ticket Tally. It contains the sales-ledger
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ticket Tally Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Counter (operator loop)                      │   │
//! │  │    add ──► remove ──► finalize ──► history ──► closeout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  ticket   │  │   sale    │  │  ledger   │  │ closeout  │  │   │
//! │  │   │ Working   │  │ Finalized │  │ DayLedger │  │ Closeout  │  │   │
//! │  │   │   Sale    │  │   Sale    │  │           │  │  Summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          tally-db (ledger slot)    print-server (documents)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Ticket numbers and entries
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`ticket`] - Working sale: accumulates entries per ticket number
//! - [`sale`] - Finalized sale: immutable record with recomputed totals
//! - [`ledger`] - Day ledger: ordered finalized sales of the business day
//! - [`closeout`] - End-of-day cross-tabulation
//! - [`demo`] - Demo sales from any `rand::Rng`
//! - [`wire`] - Request shapes and boundary validation for untrusted JSON
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{summarize, DayLedger, WorkingSale};
//!
//! let mut working = WorkingSale::new();
//! working.add_entry(5, 3).unwrap();
//! working.add_entry(7, 10).unwrap();
//!
//! let sale = working.finalize("18/10/2026", "Ana").unwrap();
//! assert_eq!(sale.total_units(), 13);
//! assert_eq!(sale.total_due().cents(), 325);
//!
//! let mut ledger = DayLedger::new();
//! ledger.append(sale);
//!
//! let summary = summarize(ledger.all()).unwrap();
//! assert_eq!(summary.grand_total(), 13);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod closeout;
pub mod demo;
pub mod error;
pub mod ledger;
pub mod money;
pub mod sale;
pub mod ticket;
pub mod types;
pub mod validation;
pub mod wire;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use closeout::{summarize, CloseoutSummary, GRID_COLUMNS, GRID_ROWS};
pub use demo::demo_sales;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::DayLedger;
pub use money::Money;
pub use sale::FinalizedSale;
pub use ticket::WorkingSale;
pub use types::{TicketEntry, TicketNumber};
pub use wire::{
    closeout_filename, receipt_filename, sanitize_file_stem, CloseoutRequest, EntryRecord,
    ReceiptRequest, SaleRecord,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lowest ticket number on sale.
pub const MIN_TICKET_NUMBER: i64 = 0;

/// Highest ticket number on sale.
pub const MAX_TICKET_NUMBER: i64 = 99;

/// How many distinct ticket numbers exist (00 through 99).
pub const TICKET_NUMBER_COUNT: usize = 100;

/// Maximum units of one ticket number within a single sale.
///
/// ## Business Reason
/// Applies both to a single entry and to the merged quantity when the same
/// number is entered more than once for the same customer.
pub const MAX_QUANTITY_PER_NUMBER: i64 = 100;

/// Fixed price of one ticket unit ($0.25).
pub const UNIT_PRICE: Money = Money::from_cents(25);

/// Name of the persistence slot holding the current day's ledger.
pub const DEFAULT_LEDGER_SLOT: &str = "day_ledger";
