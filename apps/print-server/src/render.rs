//! # Document Rendering
//!
//! Plain-text documents for the receipt printer.
//!
//! ## Receipt
//! ```text
//! ========================================
//!              SALE RECEIPT
//!            Date: 18/10/2026
//!            Customer: Ana
//! ========================================
//! Purchase detail
//! Number    Quantity            Subtotal
//! ----------------------------------------
//! 05               3               $0.75
//! 07              10               $2.50
//! ----------------------------------------
//! Total tickets: 13
//! Total due: $3.25
//! ```
//!
//! ## Closeout
//! Title, date of the first sale, the 25 × 4 number grid with one
//! `number  count` pair per cell, a column-totals row and the grand total.

use std::fmt;

use tally_core::{CloseoutSummary, FinalizedSale, GRID_COLUMNS};

const RECEIPT_WIDTH: usize = 40;
const CLOSEOUT_WIDTH: usize = 64;
const CELL_WIDTH: usize = 15;

/// A single sale laid out for printing.
pub struct ReceiptDocument<'a>(pub &'a FinalizedSale);

impl fmt::Display for ReceiptDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sale = self.0;
        let rule = "=".repeat(RECEIPT_WIDTH);
        let thin = "-".repeat(RECEIPT_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "{:^w$}", "SALE RECEIPT", w = RECEIPT_WIDTH)?;
        writeln!(f, "{:^w$}", format!("Date: {}", sale.date()), w = RECEIPT_WIDTH)?;
        writeln!(f, "{:^w$}", format!("Customer: {}", sale.customer()), w = RECEIPT_WIDTH)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Purchase detail")?;
        writeln!(f, "{:<10}{:>8}{:>22}", "Number", "Quantity", "Subtotal")?;
        writeln!(f, "{thin}")?;
        for entry in sale.entries() {
            writeln!(
                f,
                "{:<10}{:>8}{:>22}",
                entry.number().to_string(),
                entry.quantity(),
                entry.subtotal().to_string()
            )?;
        }
        writeln!(f, "{thin}")?;
        writeln!(f, "Total tickets: {}", sale.total_units())?;
        writeln!(f, "Total due: {}", sale.total_due())
    }
}

/// The end-of-day cross-tabulation laid out for printing.
pub struct CloseoutDocument<'a>(pub &'a CloseoutSummary);

impl fmt::Display for CloseoutDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        let rule = "=".repeat(CLOSEOUT_WIDTH);
        let thin = "-".repeat(CLOSEOUT_WIDTH);

        writeln!(f, "{rule}")?;
        writeln!(f, "{:^w$}", "END OF DAY CLOSEOUT REPORT", w = CLOSEOUT_WIDTH)?;
        writeln!(f, "{:^w$}", format!("Date: {}", summary.date()), w = CLOSEOUT_WIDTH)?;
        writeln!(f, "{:^w$}", format!("Sales: {}", summary.sale_count()), w = CLOSEOUT_WIDTH)?;
        writeln!(f, "{rule}")?;

        for _ in 0..GRID_COLUMNS {
            write!(f, "{:<4}{:>7}    ", "No.", "Count")?;
        }
        writeln!(f)?;
        writeln!(f, "{thin}")?;

        for row in summary.grid() {
            let line: String = row
                .iter()
                .map(|(number, count)| format!("{:<4}{:>7}    ", number.to_string(), count))
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }

        writeln!(f, "{thin}")?;
        let totals: String = summary
            .column_totals()
            .iter()
            .map(|total| format!("{:<4}{:>7}    ", "Tot", total))
            .collect();
        writeln!(f, "{}", totals.trim_end())?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:>w$}", format!("GRAND TOTAL: {}", summary.grand_total()), w = CLOSEOUT_WIDTH)?;
        writeln!(f, "{:>w$}", format!("TOTAL DUE: {}", summary.total_due()), w = CLOSEOUT_WIDTH)
    }
}
