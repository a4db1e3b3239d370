//! # Commands Module
//!
//! Everything the operator can do, as plain functions over session state.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── ticket.rs    ◄─── Working sale entries and customer
//! ├── sale.rs      ◄─── Finalize, history, reprint lookup
//! ├── ledger.rs    ◄─── Clear, demo seed, reload
//! ├── closeout.rs  ◄─── End-of-day summary
//! └── config.rs    ◄─── Show and save configuration
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the working sale
//! fn add_ticket(working: &WorkingSaleState, number: i64, quantity: i64)
//!
//! // Only needs the ledger
//! async fn list_sales(ledger: &LedgerState)
//!
//! // Needs both
//! async fn finalize_sale(working: &WorkingSaleState, ledger: &LedgerState, date: &str)
//! ```
//!
//! Printing is not a command of its own: the shell hands finalized sales
//! and closeouts to the `PrintQueue`.

pub mod closeout;
pub mod config;
pub mod ledger;
pub mod sale;
pub mod ticket;
