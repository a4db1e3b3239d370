//! # Ticket Tally Counter
//!
//! The operator's side of Ticket Tally: an interactive command loop that
//! owns the working sale and the day ledger and sends documents to the
//! print server.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ticket Tally Counter                             │
//! │                                                                         │
//! │  main.rs ────► Sets up logging, config, database, session              │
//! │                                                                         │
//! │  shell.rs ───► Parses lines, confirms clear, formats replies           │
//! │                                                                         │
//! │  commands/ ──► add_ticket, finalize_sale, list_sales, prepare_closeout │
//! │                                                                         │
//! │  state/ ─────► WorkingSaleState, LedgerState, ConfigState, Session     │
//! │                                                                         │
//! │  print/ ─────► PrintClient (reqwest), PrintQueue (spawned jobs)        │
//! │                                                                         │
//! │  config.rs ──► CounterConfig (counter.toml + TALLY_* + flags)          │
//! │                                                                         │
//! │                           │                     │                       │
//! │                           ▼                     ▼                       │
//! │                 ┌──────────────────┐  ┌──────────────────────┐          │
//! │                 │ SQLite ledger    │  │ print server (HTTP)  │          │
//! │                 │ (tally-db)       │  │ /receipts /closeouts │          │
//! │                 └──────────────────┘  └──────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration
//! 3. Connect to database & run migrations
//! 4. Load the day ledger slot
//! 5. Build the print client and queue
//! 6. Read commands until `quit` or end of input

pub mod commands;
pub mod config;
pub mod error;
pub mod print;
pub mod shell;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use config::{CliArgs, ConfigError, CounterConfig};
pub use error::{ApiError, ErrorCode};
pub use print::{PrintClient, PrintError, PrintJob, PrintOutcome, PrintQueue};
pub use shell::{Reply, Shell};
pub use state::{ConfigState, LedgerState, Session, WorkingSaleState};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never mix with command replies.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: `info,tally=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
