//! # Sale Commands
//!
//! ## Finalize Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  working sale ── finalize(date, customer) ──► FinalizedSale             │
//! │       │                                            │                    │
//! │       │                                            ▼                    │
//! │       │                                   ledger append (commit)        │
//! │       │                                            │                    │
//! │       ◄──────────────── reset ◄────────────────────┘                    │
//! │                                                                         │
//! │  Validation or database failure: the working sale is kept as is.       │
//! │  Printing happens afterwards and cannot undo the commit.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{LedgerState, WorkingSaleState};
use tally_core::{FinalizedSale, Money};

/// Business date as recorded on sales.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Today's business date.
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
    /// Starts at 1.
    pub position: usize,
    pub sale: FinalizedSale,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryLine {
    pub position: usize,
    pub date: String,
    pub customer: String,
    pub total_units: i64,
    pub total_due_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub sales: Vec<HistoryLine>,
    pub total_units: i64,
    pub total_due_cents: i64,
}

/// Closes the working sale into the day ledger.
pub async fn finalize_sale(
    working: &WorkingSaleState,
    ledger: &LedgerState,
    date: &str,
) -> Result<FinalizeResponse, ApiError> {
    debug!(date = %date, "finalize_sale command");

    let sale = working.with_sale(|s| s.finalize(date, s.customer()))?;
    let index = ledger.append(&sale).await?;
    working.with_sale_mut(|s| s.reset());

    info!(
        position = index + 1,
        customer = %sale.customer(),
        total_units = sale.total_units(),
        total_due = %sale.total_due(),
        "Sale finalized"
    );

    Ok(FinalizeResponse {
        position: index + 1,
        sale,
    })
}

/// Every sale of the day, in order.
pub async fn list_sales(ledger: &LedgerState) -> HistoryResponse {
    ledger
        .with_ledger(|ledger| {
            let total_due: Money = ledger.all().iter().map(FinalizedSale::total_due).sum();
            let sales: Vec<HistoryLine> = ledger
                .all()
                .iter()
                .enumerate()
                .map(|(i, sale)| HistoryLine {
                    position: i + 1,
                    date: sale.date().to_string(),
                    customer: sale.customer().to_string(),
                    total_units: sale.total_units(),
                    total_due_cents: sale.total_due().cents(),
                })
                .collect();

            HistoryResponse {
                total_units: sales.iter().map(|s| s.total_units).sum(),
                total_due_cents: total_due.cents(),
                sales,
            }
        })
        .await
}

/// The sale at `index` (starting at 0), for reprinting.
pub async fn get_sale(ledger: &LedgerState, index: usize) -> Result<FinalizedSale, ApiError> {
    ledger
        .with_ledger(|ledger| {
            ledger
                .get(index)
                .cloned()
                .ok_or_else(|| ApiError::position_out_of_range(index, ledger.len(), "sale"))
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ticket::{add_ticket, get_working_sale, set_customer};
    use crate::error::ErrorCode;
    use tally_db::{Database, DbConfig};

    async fn ledger() -> LedgerState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        LedgerState::load(db, "day_ledger").await.unwrap()
    }

    #[tokio::test]
    async fn test_finalize_records_and_resets() {
        let ledger = ledger().await;
        let working = WorkingSaleState::new();
        add_ticket(&working, 5, 3).unwrap();
        add_ticket(&working, 7, 10).unwrap();
        set_customer(&working, "Ana");

        let response = finalize_sale(&working, &ledger, "18/10/2026").await.unwrap();
        assert_eq!(response.position, 1);
        assert_eq!(response.sale.total_units(), 13);
        assert_eq!(response.sale.total_due().cents(), 325);
        assert!(get_working_sale(&working).entries.is_empty());

        let history = list_sales(&ledger).await;
        assert_eq!(history.sales.len(), 1);
        assert_eq!(history.sales[0].customer, "Ana");
        assert_eq!(history.total_due_cents, 325);
    }

    #[tokio::test]
    async fn test_finalize_validation_keeps_working_sale() {
        let ledger = ledger().await;
        let working = WorkingSaleState::new();

        set_customer(&working, "Ana");
        let err = finalize_sale(&working, &ledger, "18/10/2026").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        add_ticket(&working, 1, 1).unwrap();
        set_customer(&working, "   ");
        let err = finalize_sale(&working, &ledger, "18/10/2026").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(get_working_sale(&working).entries.len(), 1);
        assert!(list_sales(&ledger).await.sales.is_empty());
    }

    #[tokio::test]
    async fn test_finalize_database_failure_keeps_working_sale() {
        let ledger = ledger().await;
        let working = WorkingSaleState::new();
        add_ticket(&working, 1, 1).unwrap();
        set_customer(&working, "Ana");

        ledger.database().close().await;
        let err = finalize_sale(&working, &ledger, "18/10/2026").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(get_working_sale(&working).entries.len(), 1);
    }

    #[tokio::test]
    async fn test_get_sale() {
        let ledger = ledger().await;
        let working = WorkingSaleState::new();
        add_ticket(&working, 9, 2).unwrap();
        set_customer(&working, "Luis");
        finalize_sale(&working, &ledger, "18/10/2026").await.unwrap();

        assert_eq!(get_sale(&ledger, 0).await.unwrap().customer(), "Luis");
        let err = get_sale(&ledger, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::IndexOutOfRange);
        assert_eq!(err.message, "No sale at position 2 (1 recorded)");
    }

    #[test]
    fn test_today_format() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert_eq!(date.matches('/').count(), 2);
    }
}
