//! # Seed Data Generator
//!
//! Appends demo sales to a ledger slot for development.
//!
//! ## Usage
//! ```bash
//! # Append 20 demo sales (default)
//! cargo run -p tally-db --bin seed
//!
//! # Custom amount, slot and database
//! cargo run -p tally-db --bin seed -- --count 50 --slot day_ledger --db ./tally.db
//! ```
//!
//! ## Generated Sales
//! - Customer `Demo Customer <k>`, numbered on from the sales in the slot
//! - 0 to 10 units of every ticket number (zero-unit numbers skipped)
//! - Dated today

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use tally_core::{demo_sales, FinalizedSale, Money, DEFAULT_LEDGER_SLOT};
use tally_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 20;
    let mut db_path = String::from("./tally_dev.db");
    let mut slot = String::from(DEFAULT_LEDGER_SLOT);
    let mut seed: u64 = rand::random();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--slot" | "-s" => {
                if i + 1 < args.len() {
                    slot = args[i + 1].clone();
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    seed = args[i + 1].parse().unwrap_or(seed);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Ticket Tally Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of sales to generate (default: 20)");
                println!("  -d, --db <PATH>    Database file path (default: ./tally_dev.db)");
                println!("  -s, --slot <NAME>  Ledger slot (default: {DEFAULT_LEDGER_SLOT})");
                println!("      --seed <N>     Generator seed (default: random)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Ticket Tally Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!("Slot:     {}", slot);
    println!("Sales:    {}", count);
    println!("Seed:     {}", seed);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.ledger().load(&slot).await?.len();
    if existing > 0 {
        println!("  Slot already holds {} sales, appending", existing);
    }

    let date = Local::now().format("%d/%m/%Y").to_string();
    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let sales = demo_sales(&mut rng, count, existing, &date)?;
    let units: i64 = sales.iter().map(FinalizedSale::total_units).sum();
    let due: Money = sales.iter().map(FinalizedSale::total_due).sum();

    for (generated, sale) in sales.iter().enumerate() {
        db.ledger().append(&slot, sale).await?;

        if (generated + 1) % 10 == 0 {
            println!("  Generated {} sales...", generated + 1);
        }
    }

    println!();
    println!(
        "✓ Generated {} sales ({} units, {}) in {:?}",
        count,
        units,
        due,
        start.elapsed()
    );
    println!("  Slot now holds {} sales", db.ledger().load(&slot).await?.len());
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
