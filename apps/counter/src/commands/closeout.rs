//! # Closeout Commands
//!
//! The end-of-day summary is computed here first, so an empty ledger is
//! refused before anything is sent to the print server.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::LedgerState;
use tally_core::{summarize, FinalizedSale, GRID_COLUMNS};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseoutPreview {
    pub date: String,
    pub sale_count: usize,
    pub column_totals: [i64; GRID_COLUMNS],
    pub grand_total: i64,
    pub total_due_cents: i64,
}

/// Summarizes the ledger and returns the sales to send with the closeout.
///
/// ## Errors
/// `EMPTY_LEDGER` when no sale has been recorded.
pub async fn prepare_closeout(
    ledger: &LedgerState,
) -> Result<(CloseoutPreview, Vec<FinalizedSale>), ApiError> {
    debug!("prepare_closeout command");

    let sales = ledger.snapshot().await;
    let summary = summarize(&sales)?;

    let preview = CloseoutPreview {
        date: summary.date().to_string(),
        sale_count: summary.sale_count(),
        column_totals: summary.column_totals(),
        grand_total: summary.grand_total(),
        total_due_cents: summary.total_due().cents(),
    };

    info!(
        sales = preview.sale_count,
        grand_total = preview.grand_total,
        "Closeout prepared"
    );
    Ok((preview, sales))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tally_core::WorkingSale;
    use tally_db::{Database, DbConfig};

    fn sale(entries: &[(i64, i64)]) -> FinalizedSale {
        let mut working = WorkingSale::new();
        for &(number, quantity) in entries {
            working.add_entry(number, quantity).unwrap();
        }
        working.finalize("18/10/2026", "Ana").unwrap()
    }

    #[tokio::test]
    async fn test_empty_ledger_is_refused() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ledger = LedgerState::load(db, "day_ledger").await.unwrap();

        let err = prepare_closeout(&ledger).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyLedger);
    }

    #[tokio::test]
    async fn test_preview_totals() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ledger = LedgerState::load(db, "day_ledger").await.unwrap();
        ledger.append(&sale(&[(0, 2), (1, 3)])).await.unwrap();
        ledger.append(&sale(&[(0, 1), (80, 4)])).await.unwrap();

        let (preview, sales) = prepare_closeout(&ledger).await.unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(preview.sale_count, 2);
        assert_eq!(preview.column_totals, [6, 0, 0, 4]);
        assert_eq!(preview.grand_total, 10);
        assert_eq!(preview.total_due_cents, 250);
    }
}
