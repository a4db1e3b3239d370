//! # Ticket Tally Counter Entry Point
//!
//! ```bash
//! # Defaults, or counter.toml in the platform config dir
//! cargo run -p tally-counter
//!
//! # Explicit database and print server
//! cargo run -p tally-counter -- --db ./tally_dev.db --print-url http://127.0.0.1:3000
//! ```

use std::io::Write;

use clap::Parser;
use tally_counter::config::default_config_path;
use tally_counter::{
    init_tracing, CliArgs, ConfigState, CounterConfig, LedgerState, PrintClient, PrintQueue,
    Reply, Session, Shell,
};
use tally_db::{Database, DbConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    info!("Starting Ticket Tally counter...");

    let config = CounterConfig::load(&args)?;
    let source = args.config.clone().or_else(default_config_path);
    let config_state = ConfigState::new(config.clone(), source);
    if args.save_config {
        let path = config_state.save()?;
        println!("Configuration saved to {}", path.display());
    }
    info!(
        db = %config.db_path.display(),
        slot = %config.ledger_slot,
        print_url = %config.print_url,
        "Configuration loaded"
    );

    if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::new(DbConfig::new(&config.db_path)).await?;
    let ledger = LedgerState::load(db.clone(), config.ledger_slot.clone()).await?;

    let (printer, mut outcomes) = PrintQueue::new(PrintClient::new(&config)?);
    let mut shell = Shell::new(Session::new(ledger, config_state, printer));

    let sales = shell.session().ledger.with_ledger(|l| l.len()).await;
    println!("Ticket Tally counter. {sales} sales recorded today. Type 'help' for commands.");
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match shell.handle_line(&line).await {
                    Reply::Text(text) => println!("{text}"),
                    Reply::Silent => {}
                    Reply::Quit => break,
                }
                prompt();
            }
            Some(outcome) = outcomes.recv() => {
                println!("\n{outcome}");
                prompt();
            }
        }
    }

    // Let in-flight print jobs report before leaving.
    drop(shell);
    while let Some(outcome) = outcomes.recv().await {
        println!("{outcome}");
    }

    db.close().await;
    info!("Counter shutdown complete");
    Ok(())
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
