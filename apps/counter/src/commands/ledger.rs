//! # Ledger Commands

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::LedgerState;
use tally_core::demo_sales;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse {
    pub appended: usize,
    pub ledger_len: usize,
}

/// Wipes the day ledger. Irreversible; the caller confirms first.
pub async fn clear_ledger(ledger: &LedgerState) -> Result<usize, ApiError> {
    debug!("clear_ledger command");
    Ok(ledger.clear().await?)
}

/// Appends `count` generated sales, one committed write per sale.
///
/// The same `seed` over the same ledger yields the same sales.
pub async fn seed_demo_sales(
    ledger: &LedgerState,
    count: usize,
    date: &str,
    seed: u64,
) -> Result<SeedResponse, ApiError> {
    debug!(count, seed, "seed_demo_sales command");

    let mut ledger_len = ledger.with_ledger(|l| l.len()).await;
    let mut rng = StdRng::seed_from_u64(seed);
    for sale in demo_sales(&mut rng, count, ledger_len, date)? {
        ledger_len = ledger.append(&sale).await? + 1;
    }

    info!(appended = count, ledger_len, "Demo sales appended");
    Ok(SeedResponse {
        appended: count,
        ledger_len,
    })
}

/// Re-reads the ledger from the database.
pub async fn reload_ledger(ledger: &LedgerState) -> Result<usize, ApiError> {
    debug!("reload_ledger command");
    Ok(ledger.reload().await?)
}
