//! # Closeout Aggregator
//!
//! Reduces the day ledger to per-number totals for the end-of-day report.
//!
//! ## Report Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The 100 ticket numbers print as a 25 × 4 grid:                        │
//! │                                                                         │
//! │   row  │ col 0      col 1      col 2      col 3                        │
//! │   ─────┼───────────────────────────────────────────                     │
//! │    0   │ 00         25         50         75                           │
//! │    1   │ 01         26         51         76                           │
//! │   ...  │                                                                │
//! │   24   │ 24         49         74         99                           │
//! │   ─────┼───────────────────────────────────────────                     │
//! │  total │ Σ col 0    Σ col 1    Σ col 2    Σ col 3   → grand total      │
//! │                                                                         │
//! │  cell (row i, column j) holds ticket number i + 25·j                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! `grand_total == Σ per_number_counts == Σ sale.total_units()`.
//! Accumulation is commutative, so neither the order of sales nor the order
//! of entries within a sale changes the summary.

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::sale::FinalizedSale;
use crate::types::TicketNumber;
use crate::{TICKET_NUMBER_COUNT, UNIT_PRICE};

/// Rows in the printed closeout grid.
pub const GRID_ROWS: usize = 25;

/// Columns in the printed closeout grid.
pub const GRID_COLUMNS: usize = 4;

// =============================================================================
// Closeout Summary
// =============================================================================

/// Derived end-of-day totals. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CloseoutSummary {
    date: String,
    sale_count: usize,
    per_number_counts: Vec<i64>,
    grand_total: i64,
}

impl CloseoutSummary {
    /// Business date of the report, taken from the first sale.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn sale_count(&self) -> usize {
        self.sale_count
    }

    /// Units sold per ticket number, indexed 0..=99.
    pub fn per_number_counts(&self) -> &[i64] {
        &self.per_number_counts
    }

    /// Units sold of one ticket number.
    pub fn count(&self, number: TicketNumber) -> i64 {
        self.per_number_counts[number.index()]
    }

    pub fn grand_total(&self) -> i64 {
        self.grand_total
    }

    /// Grand total at the fixed unit price.
    pub fn total_due(&self) -> Money {
        UNIT_PRICE.multiply_quantity(self.grand_total)
    }

    /// Sum of each grid column; the four values add up to the grand total.
    pub fn column_totals(&self) -> [i64; GRID_COLUMNS] {
        let mut totals = [0; GRID_COLUMNS];
        for (index, count) in self.per_number_counts.iter().enumerate() {
            totals[index / GRID_ROWS] += count;
        }
        totals
    }

    /// The report grid: `GRID_ROWS` rows of `(number, count)` cells.
    pub fn grid(&self) -> Vec<[(TicketNumber, i64); GRID_COLUMNS]> {
        let numbers: Vec<TicketNumber> = TicketNumber::all().collect();
        (0..GRID_ROWS)
            .map(|row| {
                std::array::from_fn(|column| {
                    let number = numbers[row + GRID_ROWS * column];
                    (number, self.count(number))
                })
            })
            .collect()
    }
}

// =============================================================================
// Summarize
// =============================================================================

/// Cross-tabulates every entry of every sale.
///
/// ## Errors
/// - `EmptyLedger` if `sales` is empty; callers check before offering a
///   closeout
///
/// ## Example
/// ```rust
/// use tally_core::{summarize, WorkingSale};
///
/// let mut a = WorkingSale::new();
/// a.add_entry(0, 2).unwrap();
/// a.add_entry(1, 3).unwrap();
/// let mut b = WorkingSale::new();
/// b.add_entry(0, 1).unwrap();
///
/// let sales = vec![
///     a.finalize("18/10/2026", "A").unwrap(),
///     b.finalize("18/10/2026", "B").unwrap(),
/// ];
/// let summary = summarize(&sales).unwrap();
/// assert_eq!(summary.per_number_counts()[0], 3);
/// assert_eq!(summary.per_number_counts()[1], 3);
/// assert_eq!(summary.grand_total(), 6);
/// ```
pub fn summarize(sales: &[FinalizedSale]) -> CoreResult<CloseoutSummary> {
    let first = sales.first().ok_or(CoreError::EmptyLedger)?;

    let mut per_number_counts = vec![0_i64; TICKET_NUMBER_COUNT];
    let mut grand_total = 0;
    for sale in sales {
        for entry in sale.entries() {
            per_number_counts[entry.number().index()] += entry.quantity();
            grand_total += entry.quantity();
        }
    }

    Ok(CloseoutSummary {
        date: first.date().to_string(),
        sale_count: sales.len(),
        per_number_counts,
        grand_total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::WorkingSale;

    fn sale(customer: &str, entries: &[(i64, i64)]) -> FinalizedSale {
        let mut working = WorkingSale::new();
        for &(number, quantity) in entries {
            working.add_entry(number, quantity).unwrap();
        }
        working.finalize("18/10/2026", customer).unwrap()
    }

    #[test]
    fn test_two_sale_example() {
        let sales = vec![sale("A", &[(0, 2), (1, 3)]), sale("B", &[(0, 1)])];
        let summary = summarize(&sales).unwrap();

        assert_eq!(summary.per_number_counts()[0], 3);
        assert_eq!(summary.per_number_counts()[1], 3);
        assert!(summary.per_number_counts()[2..].iter().all(|&c| c == 0));
        assert_eq!(summary.grand_total(), 6);
        assert_eq!(summary.sale_count(), 2);
    }

    #[test]
    fn test_sale_order_does_not_matter() {
        let a = sale("A", &[(0, 2), (1, 3), (50, 7)]);
        let b = sale("B", &[(50, 1), (0, 1)]);
        let forward = summarize(&[a.clone(), b.clone()]).unwrap();
        let backward = summarize(&[b, a]).unwrap();
        assert_eq!(forward.per_number_counts(), backward.per_number_counts());
        assert_eq!(forward.grand_total(), 14);
    }

    #[test]
    fn test_grand_total_matches_sale_totals() {
        let sales = vec![
            sale("A", &[(3, 100), (99, 1)]),
            sale("B", &[(3, 4), (24, 8), (25, 9)]),
            sale("C", &[(74, 10), (75, 11)]),
        ];
        let summary = summarize(&sales).unwrap();

        let from_sales: i64 = sales.iter().map(|s| s.total_units()).sum();
        let from_counts: i64 = summary.per_number_counts().iter().sum();
        assert_eq!(summary.grand_total(), from_sales);
        assert_eq!(summary.grand_total(), from_counts);
        assert_eq!(summary.total_due(), Money::from_cents(from_sales * 25));
    }

    #[test]
    fn test_empty_ledger() {
        assert_eq!(summarize(&[]).unwrap_err(), CoreError::EmptyLedger);
    }

    #[test]
    fn test_grid_layout_and_column_totals() {
        let sales = vec![sale("A", &[(0, 1), (24, 2), (25, 3), (49, 4), (50, 5), (99, 6)])];
        let summary = summarize(&sales).unwrap();

        let grid = summary.grid();
        assert_eq!(grid.len(), GRID_ROWS);
        assert_eq!(grid[0][0].0.value(), 0);
        assert_eq!(grid[0][1].0.value(), 25);
        assert_eq!(grid[0][3].0.value(), 75);
        assert_eq!(grid[24][3].0.value(), 99);
        assert_eq!(grid[24][0], (TicketNumber::try_from(24).unwrap(), 2));

        assert_eq!(summary.column_totals(), [3, 7, 5, 6]);
        assert_eq!(
            summary.column_totals().iter().sum::<i64>(),
            summary.grand_total()
        );
    }

    #[test]
    fn test_date_comes_from_first_sale() {
        let mut later = WorkingSale::new();
        later.add_entry(1, 1).unwrap();
        let sales = vec![
            sale("A", &[(0, 1)]),
            later.finalize("19/10/2026", "B").unwrap(),
        ];
        assert_eq!(summarize(&sales).unwrap().date(), "18/10/2026");
    }
}
