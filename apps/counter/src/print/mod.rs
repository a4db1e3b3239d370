//! # Print Transport
//!
//! Moves finalized sales to the print server and stores the documents it
//! returns. Failures here never undo ledger state.

mod client;
mod queue;

use std::path::PathBuf;

use thiserror::Error;

pub use client::{PrintClient, PrintedDocument};
pub use queue::{PrintJob, PrintOutcome, PrintQueue};

/// Print transport errors.
#[derive(Debug, Clone, Error)]
pub enum PrintError {
    /// Print server unreachable, timed out, or answered with a non-success status.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The document arrived but could not be written locally.
    #[error("Failed to save {}: {reason}", path.display())]
    Output { path: PathBuf, reason: String },
}

pub type PrintResult<T> = Result<T, PrintError>;
