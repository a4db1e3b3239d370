//! # Demo Sales
//!
//! Pseudo-random sales for trying out the counter and for seeding a
//! development database.
//!
//! ## Generated Sales
//! - Customer: `Demo Customer <k>`, numbered on from the sales already
//!   recorded, so repeated seeding never reuses a name
//! - For every ticket number 00-99: 0 to 10 units
//! - Numbers that rolled 0 units are left out
//!
//! Every sale goes through [`WorkingSale::add_entry`] and
//! [`WorkingSale::finalize`], the same path as an operator-entered sale.
//! Callers pick the generator; a `StdRng::seed_from_u64` makes runs
//! reproducible.

use rand::Rng;

use crate::error::CoreResult;
use crate::sale::FinalizedSale;
use crate::ticket::WorkingSale;
use crate::types::TicketNumber;
use crate::{MAX_TICKET_NUMBER, MIN_TICKET_NUMBER};

/// Highest unit count a demo sale rolls for one number.
pub const DEMO_MAX_UNITS: i64 = 10;

/// Generates `count` demo sales dated `date`.
///
/// `recorded` is how many sales the ledger already holds; the first
/// generated customer is `Demo Customer <recorded + 1>`.
///
/// ## Example
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use tally_core::demo_sales;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let sales = demo_sales(&mut rng, 2, 3, "18/10/2026").unwrap();
/// assert_eq!(sales[0].customer(), "Demo Customer 4");
/// assert_eq!(sales[1].customer(), "Demo Customer 5");
/// ```
pub fn demo_sales<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    recorded: usize,
    date: &str,
) -> CoreResult<Vec<FinalizedSale>> {
    let mut sales = Vec::with_capacity(count);

    for k in recorded + 1..=recorded + count {
        let mut working = WorkingSale::new();
        for number in TicketNumber::all() {
            let units = rng.gen_range(0..=DEMO_MAX_UNITS);
            if units > 0 {
                working.add_entry(number.value() as i64, units)?;
            }
        }
        if working.is_empty() {
            let number = rng.gen_range(MIN_TICKET_NUMBER..=MAX_TICKET_NUMBER);
            working.add_entry(number, 1)?;
        }
        sales.push(working.finalize(date, &format!("Demo Customer {k}"))?);
    }

    Ok(sales)
}
