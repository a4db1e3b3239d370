//! # Ticket Commands
//!
//! Add, remove and review entries of the working sale.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::WorkingSaleState;
use tally_core::WorkingSale;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryLine {
    /// Starts at 1.
    pub position: usize,
    pub number: String,
    pub quantity: i64,
    pub subtotal_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingSaleView {
    pub customer: String,
    pub entries: Vec<EntryLine>,
    pub total_units: i64,
    pub total_due_cents: i64,
}

impl From<&WorkingSale> for WorkingSaleView {
    fn from(sale: &WorkingSale) -> Self {
        WorkingSaleView {
            customer: sale.customer().to_string(),
            entries: sale
                .entries()
                .iter()
                .enumerate()
                .map(|(i, entry)| EntryLine {
                    position: i + 1,
                    number: entry.number().to_string(),
                    quantity: entry.quantity(),
                    subtotal_cents: entry.subtotal().cents(),
                })
                .collect(),
            total_units: sale.total_units(),
            total_due_cents: sale.total_due().cents(),
        }
    }
}

pub fn add_ticket(
    working: &WorkingSaleState,
    number: i64,
    quantity: i64,
) -> Result<WorkingSaleView, ApiError> {
    debug!(number, quantity, "add_ticket command");
    working.with_sale_mut(|sale| -> Result<WorkingSaleView, ApiError> {
        sale.add_entry(number, quantity)?;
        Ok(WorkingSaleView::from(&*sale))
    })
}

/// `index` starts at 0.
pub fn remove_ticket(working: &WorkingSaleState, index: usize) -> Result<WorkingSaleView, ApiError> {
    debug!(index, "remove_ticket command");
    working.with_sale_mut(|sale| -> Result<WorkingSaleView, ApiError> {
        sale.remove_entry(index)?;
        Ok(WorkingSaleView::from(&*sale))
    })
}

pub fn set_customer(working: &WorkingSaleState, customer: &str) -> WorkingSaleView {
    debug!(customer = %customer, "set_customer command");
    working.with_sale_mut(|sale| {
        sale.set_customer(customer.trim());
        WorkingSaleView::from(&*sale)
    })
}

pub fn get_working_sale(working: &WorkingSaleState) -> WorkingSaleView {
    working.with_sale(|sale| WorkingSaleView::from(sale))
}

/// Discards the working sale and returns how many entries were dropped.
pub fn abandon_sale(working: &WorkingSaleState) -> usize {
    let dropped = working.with_sale_mut(|sale| {
        let n = sale.entries().len();
        sale.reset();
        n
    });
    debug!(dropped, "abandon_sale command");
    dropped
}
