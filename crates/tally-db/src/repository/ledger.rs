//! # Ledger Repository
//!
//! Stores each day ledger as one JSON array in a named slot.
//!
//! ## Read-Modify-Write Under One Lock
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   append("day_ledger", sale)                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   SINGLE TRANSACTION                            │   │
//! │  │                                                                 │   │
//! │  │  1. INSERT .. ON CONFLICT DO NOTHING   ← takes the write lock   │   │
//! │  │  2. SELECT payload                     ← current ledger         │   │
//! │  │  3. push sale                                                   │   │
//! │  │  4. UPDATE payload, updated_at                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ← caller's in-memory ledger is replaced only after this        │
//! │                                                                         │
//! │  A second session doing the same waits at step 1 (busy timeout),      │
//! │  then reads the ledger including the first session's sale.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Payloads read back go through `FinalizedSale`'s validating
//! deserializer, so totals are recomputed on load as well.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use tally_core::FinalizedSale;

/// Repository for ledger slots.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Loads the ledger stored in `slot`.
    ///
    /// An absent slot is an empty ledger, not an error.
    pub async fn load(&self, slot: &str) -> DbResult<Vec<FinalizedSale>> {
        let mut conn = self.pool.acquire().await?;
        let sales = read_slot(&mut conn, slot).await?;
        debug!(slot = %slot, sales = sales.len(), "Ledger loaded");
        Ok(sales)
    }

    /// Appends `sale` and returns the full ledger as committed.
    pub async fn append(&self, slot: &str, sale: &FinalizedSale) -> DbResult<Vec<FinalizedSale>> {
        let sale = sale.clone();
        let sales = self
            .modify(slot, move |mut sales| {
                sales.push(sale);
                sales
            })
            .await?;
        info!(slot = %slot, sales = sales.len(), "Sale appended to ledger");
        Ok(sales)
    }

    /// Empties the ledger, leaving an empty array in the slot.
    pub async fn clear(&self, slot: &str) -> DbResult<()> {
        let cleared = self.modify(slot, |_| Vec::new()).await?;
        debug_assert!(cleared.is_empty());
        info!(slot = %slot, "Ledger cleared");
        Ok(())
    }

    /// Overwrites the slot with `sales`.
    pub async fn save(&self, slot: &str, sales: &[FinalizedSale]) -> DbResult<()> {
        let sales = sales.to_vec();
        let count = sales.len();
        self.modify(slot, move |_| sales).await?;
        debug!(slot = %slot, sales = count, "Ledger saved");
        Ok(())
    }

    /// Runs `change` on the stored ledger inside one write transaction.
    async fn modify<F>(&self, slot: &str, change: F) -> DbResult<Vec<FinalizedSale>>
    where
        F: FnOnce(Vec<FinalizedSale>) -> Vec<FinalizedSale>,
    {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO ledger_slots (slot, payload, updated_at)
            VALUES (?1, '[]', ?2)
            ON CONFLICT(slot) DO NOTHING
            "#,
        )
        .bind(slot)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let current = read_slot(&mut tx, slot).await?;
        let updated = change(current);
        let payload = serde_json::to_string(&updated)?;

        sqlx::query(
            r#"
            UPDATE ledger_slots
            SET payload = ?2, updated_at = ?3
            WHERE slot = ?1
            "#,
        )
        .bind(slot)
        .bind(&payload)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }
}

async fn read_slot(conn: &mut SqliteConnection, slot: &str) -> DbResult<Vec<FinalizedSale>> {
    let payload: Option<String> =
        sqlx::query_scalar("SELECT payload FROM ledger_slots WHERE slot = ?1")
            .bind(slot)
            .fetch_optional(&mut *conn)
            .await?;

    match payload {
        None => Ok(Vec::new()),
        Some(payload) => {
            serde_json::from_str(&payload).map_err(|e| DbError::CorruptPayload {
                slot: slot.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tally_core::{demo_sales, WorkingSale};

    const SLOT: &str = "day_ledger";

    async fn repo() -> LedgerRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().ledger()
    }

    fn sale(customer: &str, entries: &[(i64, i64)]) -> FinalizedSale {
        let mut working = WorkingSale::new();
        for &(number, quantity) in entries {
            working.add_entry(number, quantity).unwrap();
        }
        working.finalize("18/10/2026", customer).unwrap()
    }

    #[tokio::test]
    async fn test_absent_slot_is_empty() {
        let repo = repo().await;
        assert!(repo.load("never_written").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_then_reload_preserves_order_and_content() {
        let repo = repo().await;
        let mut rng = StdRng::seed_from_u64(11);
        let sales = demo_sales(&mut rng, 6, 0, "18/10/2026").unwrap();

        for (i, s) in sales.iter().enumerate() {
            let committed = repo.append(SLOT, s).await.unwrap();
            assert_eq!(committed.len(), i + 1);
        }

        assert_eq!(repo.load(SLOT).await.unwrap(), sales);
    }

    #[tokio::test]
    async fn test_clear_persists_empty_array() {
        let repo = repo().await;
        repo.append(SLOT, &sale("A", &[(1, 1)])).await.unwrap();
        repo.append(SLOT, &sale("B", &[(2, 2)])).await.unwrap();

        repo.clear(SLOT).await.unwrap();
        assert!(repo.load(SLOT).await.unwrap().is_empty());

        let raw: String = sqlx::query_scalar("SELECT payload FROM ledger_slots WHERE slot = ?1")
            .bind(SLOT)
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(raw, "[]");
    }

    #[tokio::test]
    async fn test_clear_absent_slot() {
        let repo = repo().await;
        repo.clear(SLOT).await.unwrap();
        assert!(repo.load(SLOT).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let repo = repo().await;
        repo.append("monday", &sale("A", &[(1, 1)])).await.unwrap();
        repo.append("tuesday", &sale("B", &[(2, 2)])).await.unwrap();

        assert_eq!(repo.load("monday").await.unwrap().len(), 1);
        assert_eq!(repo.load("tuesday").await.unwrap()[0].customer(), "B");
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let repo = repo().await;
        repo.append(SLOT, &sale("A", &[(1, 1)])).await.unwrap();

        let replacement = vec![sale("B", &[(2, 2)]), sale("C", &[(3, 3)])];
        repo.save(SLOT, &replacement).await.unwrap();
        assert_eq!(repo.load(SLOT).await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn test_stored_totals_are_recomputed_on_load() {
        let repo = repo().await;
        sqlx::query("INSERT INTO ledger_slots (slot, payload, updated_at) VALUES (?1, ?2, ?3)")
            .bind(SLOT)
            .bind(
                r#"[{"date":"18/10/2026","customer":"A","entries":[{"number":4,"quantity":2}],"totalUnits":50,"totalDueCents":9}]"#,
            )
            .bind("2026-10-18T00:00:00Z")
            .execute(&repo.pool)
            .await
            .unwrap();

        let sales = repo.load(SLOT).await.unwrap();
        assert_eq!(sales[0].total_units(), 2);
        assert_eq!(sales[0].total_due().cents(), 50);
    }

    #[tokio::test]
    async fn test_corrupt_payload_reported() {
        let repo = repo().await;
        sqlx::query("INSERT INTO ledger_slots (slot, payload, updated_at) VALUES (?1, ?2, ?3)")
            .bind(SLOT)
            .bind("{not json")
            .bind("2026-10-18T00:00:00Z")
            .execute(&repo.pool)
            .await
            .unwrap();

        assert!(matches!(
            repo.load(SLOT).await,
            Err(DbError::CorruptPayload { .. })
        ));
    }

    #[tokio::test]
    async fn test_long_customer_name_loads_back() {
        let repo = repo().await;
        let long = sale(&"A".repeat(200), &[(8, 2)]);
        repo.append(SLOT, &long).await.unwrap();

        assert_eq!(repo.load(SLOT).await.unwrap(), vec![long]);
    }

    #[tokio::test]
    async fn test_concurrent_sessions_do_not_lose_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.db");

        let first = Database::new(DbConfig::new(&path)).await.unwrap();
        let second = Database::new(DbConfig::new(&path)).await.unwrap();

        let mut handles = Vec::new();
        for (i, db) in [first.clone(), second.clone()].into_iter().cycle().take(20).enumerate() {
            let s = sale(&format!("Customer {i}"), &[(i as i64, 1)]);
            handles.push(tokio::spawn(async move {
                db.ledger().append(SLOT, &s).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = first.ledger().load(SLOT).await.unwrap();
        assert_eq!(stored.len(), 20);
        assert_eq!(second.ledger().load(SLOT).await.unwrap(), stored);
    }
}
