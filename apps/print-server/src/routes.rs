//! # Route Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use serde::Deserialize;
use serde_json::Value;
use tally_core::{
    closeout_filename, receipt_filename, summarize, CloseoutRequest, FinalizedSale,
};
use tracing::{debug, error, info};

use crate::backup::write_backup;
use crate::error::{ServiceError, ServiceResult};
use crate::render::{CloseoutDocument, ReceiptDocument};
use crate::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// `POST /receipts`
pub async fn print_receipt(
    payload: Result<Json<FinalizedSale>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let Json(sale) = payload?;
    debug!(customer = %sale.customer(), entries = sale.entries().len(), "Receipt requested");

    let body = ReceiptDocument(&sale).to_string();
    Ok(document(receipt_filename(sale.customer()), body))
}

/// `POST /closeouts`
///
/// The body is validated into a [`CloseoutRequest`] for the report, while the
/// backup stores the submitted `sales` exactly as received. The backup is
/// written before rendering; a failed backup is logged and the document is
/// still returned.
pub async fn print_closeout(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ServiceResult<impl IntoResponse> {
    let Json(submitted) = payload?;
    let request = CloseoutRequest::deserialize(&submitted)
        .map_err(|e| ServiceError::BadRequest(format!("Invalid closeout request: {e}")))?;
    let summary = summarize(&request.sales)?;
    info!(
        sales = summary.sale_count(),
        grand_total = summary.grand_total(),
        "Closeout requested"
    );

    let now = Local::now().time();
    if let Err(e) = write_backup(&state.backup_dir, summary.date(), now, &submitted["sales"]).await {
        error!(error = %e, dir = %state.backup_dir.display(), "Closeout backup failed");
    }

    let body = CloseoutDocument(&summary).to_string();
    Ok(document(closeout_filename(summary.date()), body))
}

fn document(filename: String, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, TEXT_PLAIN.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

// =============================================================================
// Router Tests
// =============================================================================
