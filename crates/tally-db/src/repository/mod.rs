//! # Repository Module
//!
//! Database repository implementations for Ticket Tally.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Counter command                                                        │
//! │       │                                                                 │
//! │       │  db.ledger().append("day_ledger", &sale)                        │
//! │       ▼                                                                 │
//! │  LedgerRepository                                                      │
//! │  ├── load(&self, slot)                                                 │
//! │  ├── append(&self, slot, sale)                                         │
//! │  ├── clear(&self, slot)                                                │
//! │  └── save(&self, slot, sales)                                          │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod ledger;
