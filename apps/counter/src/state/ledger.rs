//! # Ledger State
//!
//! The day ledger of the session, kept in step with its database slot.
//!
//! ## Rules
//! - Every mutation is written to the database before it is visible here
//! - After a write, the in-memory ledger is replaced by what was committed,
//!   which includes sales appended by other counters sharing the file
//! - The async lock is held across the write, so two commands of this
//!   session never interleave their read-modify-write

use tally_core::{DayLedger, FinalizedSale};
use tally_db::{Database, DbResult};
use tokio::sync::Mutex;
use tracing::info;

/// Day ledger backed by one database slot.
#[derive(Debug)]
pub struct LedgerState {
    db: Database,
    slot: String,
    ledger: Mutex<DayLedger>,
}

impl LedgerState {
    /// Loads `slot` from the database. An absent slot is an empty ledger.
    pub async fn load(db: Database, slot: impl Into<String>) -> DbResult<Self> {
        let slot = slot.into();
        let sales = db.ledger().load(&slot).await?;
        info!(slot = %slot, sales = sales.len(), "Day ledger loaded");

        Ok(LedgerState {
            db,
            slot,
            ledger: Mutex::new(DayLedger::from_sales(sales)),
        })
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Appends `sale` and returns its position in the committed ledger.
    pub async fn append(&self, sale: &FinalizedSale) -> DbResult<usize> {
        let mut ledger = self.ledger.lock().await;
        let committed = self.db.ledger().append(&self.slot, sale).await?;
        *ledger = DayLedger::from_sales(committed);
        Ok(ledger.len().saturating_sub(1))
    }

    /// Empties the ledger and returns how many sales were removed.
    pub async fn clear(&self) -> DbResult<usize> {
        let mut ledger = self.ledger.lock().await;
        self.db.ledger().clear(&self.slot).await?;
        let removed = ledger.len();
        ledger.clear();
        info!(slot = %self.slot, removed, "Day ledger cleared");
        Ok(removed)
    }

    /// Re-reads the slot, picking up writes from other sessions.
    pub async fn reload(&self) -> DbResult<usize> {
        let mut ledger = self.ledger.lock().await;
        let sales = self.db.ledger().load(&self.slot).await?;
        *ledger = DayLedger::from_sales(sales);
        Ok(ledger.len())
    }

    /// Executes a function with read access to the ledger.
    pub async fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&DayLedger) -> R,
    {
        let ledger = self.ledger.lock().await;
        f(&ledger)
    }

    /// Copy of every sale, in order.
    pub async fn snapshot(&self) -> Vec<FinalizedSale> {
        self.with_ledger(|ledger| ledger.all().to_vec()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::WorkingSale;
    use tally_db::DbConfig;

    fn sale(customer: &str, number: i64, quantity: i64) -> FinalizedSale {
        let mut working = WorkingSale::new();
        working.add_entry(number, quantity).unwrap();
        working.finalize("18/10/2026", customer).unwrap()
    }

    #[tokio::test]
    async fn test_append_clear_and_reload() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = LedgerState::load(db.clone(), "day_ledger").await.unwrap();
        assert!(state.snapshot().await.is_empty());

        assert_eq!(state.append(&sale("Ana", 5, 3)).await.unwrap(), 0);
        assert_eq!(state.append(&sale("Luis", 7, 10)).await.unwrap(), 1);

        let persisted = db.ledger().load("day_ledger").await.unwrap();
        assert_eq!(persisted, state.snapshot().await);

        assert_eq!(state.clear().await.unwrap(), 2);
        assert!(state.snapshot().await.is_empty());
        assert!(db.ledger().load("day_ledger").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_picks_up_other_sessions() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = LedgerState::load(db.clone(), "day_ledger").await.unwrap();

        db.ledger().append("day_ledger", &sale("Elsewhere", 1, 1)).await.unwrap();
        assert_eq!(state.append(&sale("Here", 2, 2)).await.unwrap(), 1);

        let customers: Vec<String> = state
            .snapshot()
            .await
            .iter()
            .map(|s| s.customer().to_string())
            .collect();
        assert_eq!(customers, vec!["Elsewhere", "Here"]);
    }

    #[tokio::test]
    async fn test_reload() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = LedgerState::load(db.clone(), "day_ledger").await.unwrap();
        db.ledger().append("day_ledger", &sale("Ana", 1, 1)).await.unwrap();

        assert_eq!(state.reload().await.unwrap(), 1);
    }
}
