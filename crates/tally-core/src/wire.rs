//! # Wire Types
//!
//! Request bodies exchanged between the counter and the print server, and
//! the raw records untrusted JSON is parsed into before any domain type is
//! built.
//!
//! ## Request Shapes
//! ```text
//! POST /receipts    body: FinalizedSale
//!                   { date, customer, entries: [{number, quantity}],
//!                     totalUnits, totalDueCents }
//!
//! POST /closeouts   body: CloseoutRequest
//!                   { sales: [FinalizedSale, ...] }
//! ```
//!
//! Inbound payloads pass through [`SaleRecord`] first; see
//! [`FinalizedSale`]'s `TryFrom<SaleRecord>` for the rebuild rules.
//!
//! ## Document Names
//! Both sides name documents the same way: `receipt_<customer>.txt` and
//! `closeout_<date>.txt`, reduced by [`sanitize_file_stem`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::sale::FinalizedSale;

/// Body of a receipt request: exactly one finalized sale.
pub type ReceiptRequest = FinalizedSale;

/// Body of a closeout request: the full day ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CloseoutRequest {
    pub sales: Vec<FinalizedSale>,
}

/// An entry exactly as it arrived, before range checks.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRecord {
    pub number: i64,
    pub quantity: i64,
}

/// A sale exactly as it arrived, before validation.
///
/// Totals are kept as raw JSON so a non-numeric value can be reported as a
/// validation failure. `totalDue` is the decimal form older clients send.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub customer: String,
    pub entries: Vec<EntryRecord>,
    #[serde(default)]
    pub total_units: Option<serde_json::Value>,
    #[serde(default)]
    pub total_due_cents: Option<serde_json::Value>,
    #[serde(default)]
    pub total_due: Option<serde_json::Value>,
}

/// `receipt_<customer>.txt`.
pub fn receipt_filename(customer: &str) -> String {
    format!("receipt_{}.txt", sanitize_file_stem(customer))
}

/// `closeout_<date>.txt`.
pub fn closeout_filename(date: &str) -> String {
    format!("closeout_{}.txt", sanitize_file_stem(date))
}

/// Reduces `raw` to characters safe in a file name and a header value.
///
/// ASCII letters, digits, `-` and `_` are kept, `/` becomes `-` and
/// everything else becomes `_`. An empty input yields `document`.
pub fn sanitize_file_stem(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            '/' => '-',
            _ => '_',
        })
        .collect();
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}
