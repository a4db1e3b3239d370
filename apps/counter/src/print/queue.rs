//! # Background Print Jobs
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shell ── submit(job) ──► tokio::spawn ──► PrintClient ──► print server │
//! │    │                                            │                       │
//! │    │ (keeps reading commands)                   ▼                       │
//! │    └◄────────── mpsc::Receiver<PrintOutcome> ◄──┘                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - A job owns a copy of what it prints; the ledger is never touched.
//! - Every submitted job produces exactly one outcome.

use std::fmt;
use std::sync::Arc;

use tally_core::FinalizedSale;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{PrintClient, PrintError, PrintedDocument};

const OUTCOME_BUFFER: usize = 100;

/// What to print.
#[derive(Debug, Clone)]
pub enum PrintJob {
    Receipt(FinalizedSale),
    Closeout(Vec<FinalizedSale>),
}

impl PrintJob {
    pub fn label(&self) -> String {
        match self {
            PrintJob::Receipt(sale) => format!("receipt for {}", sale.customer()),
            PrintJob::Closeout(sales) => format!("closeout of {} sales", sales.len()),
        }
    }
}

/// Result of one background print job.
#[derive(Debug)]
pub struct PrintOutcome {
    pub label: String,
    pub result: Result<PrintedDocument, PrintError>,
}

impl fmt::Display for PrintOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(doc) => write!(f, "Printed {} -> {}", self.label, doc.path.display()),
            Err(e) => write!(
                f,
                "Printing {} failed: {}. The sale stays recorded; use reprint to retry.",
                self.label, e
            ),
        }
    }
}

/// Spawns print jobs and reports their outcomes on a channel.
#[derive(Debug, Clone)]
pub struct PrintQueue {
    client: Arc<PrintClient>,
    outcomes: mpsc::Sender<PrintOutcome>,
}

impl PrintQueue {
    /// Creates the queue and the receiver its outcomes arrive on.
    pub fn new(client: PrintClient) -> (Self, mpsc::Receiver<PrintOutcome>) {
        let (tx, rx) = mpsc::channel(OUTCOME_BUFFER);
        let queue = PrintQueue {
            client: Arc::new(client),
            outcomes: tx,
        };
        (queue, rx)
    }

    pub fn client(&self) -> &PrintClient {
        &self.client
    }

    /// Runs `job` in the background.
    pub fn submit(&self, job: PrintJob) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let outcomes = self.outcomes.clone();

        tokio::spawn(async move {
            let label = job.label();
            let result = match &job {
                PrintJob::Receipt(sale) => client.print_receipt(sale).await,
                PrintJob::Closeout(sales) => client.print_closeout(sales).await,
            };

            match &result {
                Ok(doc) => info!(job = %label, path = %doc.path.display(), "Print job finished"),
                Err(e) => warn!(job = %label, error = %e, "Print job failed"),
            }

            if outcomes.send(PrintOutcome { label, result }).await.is_err() {
                warn!("Print outcome dropped, receiver closed");
            }
        })
    }
}
