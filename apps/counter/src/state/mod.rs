//! # State Module
//!
//! Session state owned by the command loop.
//!
//! ## Why Multiple State Types?
//! Each command takes only the state it needs, so the ticket commands never
//! wait on the ledger lock and the print jobs never see the working sale.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         Session                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │          │                  │                  │               │        │
//! │          ▼                  ▼                  ▼               ▼        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │ WorkingSale  │  │ LedgerState  │  │ ConfigState  │  │ PrintQueue │  │
//! │  │ State        │  │              │  │              │  │            │  │
//! │  │ Arc<Mutex<   │  │ Database +   │  │ counter.toml │  │ reqwest +  │  │
//! │  │ WorkingSale  │  │ tokio Mutex< │  │ (read-only)  │  │ spawned    │  │
//! │  │ >>           │  │ DayLedger>   │  │              │  │ jobs       │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • WorkingSaleState: std Mutex, never held across an await             │
//! │  • LedgerState: tokio Mutex, held across the database write            │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod ledger;
mod working_sale;

pub use config::ConfigState;
pub use ledger::LedgerState;
pub use working_sale::WorkingSaleState;

use crate::print::PrintQueue;

/// Everything one operator session owns.
#[derive(Debug)]
pub struct Session {
    pub working: WorkingSaleState,
    pub ledger: LedgerState,
    pub config: ConfigState,
    pub printer: PrintQueue,
}

impl Session {
    pub fn new(ledger: LedgerState, config: ConfigState, printer: PrintQueue) -> Self {
        Session {
            working: WorkingSaleState::new(),
            ledger,
            config,
            printer,
        }
    }
}
