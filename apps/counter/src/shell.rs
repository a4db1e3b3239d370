//! # Command Shell
//!
//! Turns operator input lines into commands and commands into replies.
//!
//! ## User Workflow
//! ```text
//! > add 5 3
//! > add 7 10
//! > customer Ana María
//! > finalize --print
//! Sale #1 recorded: Ana María, 13 tickets, $3.25
//! Printing receipt for Ana María in the background.
//! > history
//! > closeout
//! ```
//!
//! ## Rules
//! - Positions shown to the operator start at 1
//! - `clear` asks for confirmation unless given `--yes`; the next line
//!   answers it and is not run as a command
//! - Print jobs run in the background; their outcomes arrive separately

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tally_core::{FinalizedSale, Money};
use tracing::debug;

use crate::commands::{closeout, config, ledger, sale, ticket};
use crate::error::ApiError;
use crate::print::PrintJob;
use crate::state::Session;

#[derive(Debug, Parser)]
#[command(
    name = "tally",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Ticket Tally counter commands"
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

/// One operator command.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Add units of a ticket number (00-99) to the current sale
    Add {
        #[arg(allow_negative_numbers = true)]
        number: i64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove the entry at a position of the current sale
    Remove {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        position: u64,
    },
    /// Set the customer name of the current sale (the rest of the line)
    Customer {
        #[arg(allow_hyphen_values = true)]
        name: String,
    },
    /// Show the current sale
    Show,
    /// Discard the current sale without recording it
    Abandon,
    /// Record the current sale in the day ledger
    Finalize {
        /// Also print a receipt
        #[arg(long)]
        print: bool,
    },
    /// List every sale of the day
    History,
    /// Print the receipt of a recorded sale again
    Reprint {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        position: u64,
    },
    /// Delete every sale of the day
    Clear {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Append generated demo sales
    Seed {
        #[arg(default_value_t = 10)]
        count: usize,
        /// Generator seed (default: random)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the end-of-day closeout report
    Closeout,
    /// Re-read the day ledger from the database
    Reload,
    /// Show the configuration
    Config {
        /// Write it back to the config file
        #[arg(long)]
        save: bool,
    },
    /// Leave the counter
    #[command(alias = "exit")]
    Quit,
}

/// What the loop should do with a handled line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Silent,
    Quit,
}

/// Parses one input line.
///
/// `customer` takes the rest of the line verbatim as the name; every other
/// command is split on whitespace and parsed by clap.
pub fn parse_line(line: &str) -> Result<ShellCommand, clap::Error> {
    if let Some(name) = customer_name(line) {
        return Ok(ShellCommand::Customer {
            name: name.to_string(),
        });
    }
    ShellLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
}

/// The raw name after a leading `customer` keyword, if there is one.
fn customer_name(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("customer")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let name = rest.trim();
    match name {
        "" | "-h" | "--help" => None,
        _ => Some(name),
    }
}

/// The command loop's interpreter, owning the session.
#[derive(Debug)]
pub struct Shell {
    session: Session,
    pending_clear: bool,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        Shell {
            session,
            pending_clear: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handles one line of operator input.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        if self.pending_clear {
            self.pending_clear = false;
            return match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => self.clear().await,
                _ => Reply::Text("Clear cancelled.".to_string()),
            };
        }

        if line.trim().is_empty() {
            return Reply::Silent;
        }

        match parse_line(line) {
            Ok(command) => self.execute(command).await,
            Err(err) => usage_reply(err),
        }
    }

    /// Runs a parsed command.
    pub async fn execute(&mut self, command: ShellCommand) -> Reply {
        debug!(?command, "Executing command");
        match self.dispatch(command).await {
            Ok(reply) => reply,
            Err(err) => Reply::Text(err.to_string()),
        }
    }

    async fn dispatch(&mut self, command: ShellCommand) -> Result<Reply, ApiError> {
        let s = &self.session;
        let text = match command {
            ShellCommand::Add { number, quantity } => {
                render_working(&ticket::add_ticket(&s.working, number, quantity)?)
            }
            ShellCommand::Remove { position } => {
                render_working(&ticket::remove_ticket(&s.working, index_of(position))?)
            }
            ShellCommand::Customer { name } => {
                render_working(&ticket::set_customer(&s.working, &name))
            }
            ShellCommand::Show => render_working(&ticket::get_working_sale(&s.working)),
            ShellCommand::Abandon => {
                let dropped = ticket::abandon_sale(&s.working);
                format!("Sale abandoned ({dropped} entries discarded).")
            }
            ShellCommand::Finalize { print } => {
                let response = sale::finalize_sale(&s.working, &s.ledger, &sale::today()).await?;
                let mut text = format!(
                    "Sale #{} recorded: {}, {} tickets, {}",
                    response.position,
                    response.sale.customer(),
                    response.sale.total_units(),
                    response.sale.total_due()
                );
                if print {
                    text.push('\n');
                    text.push_str(&self.print_receipt(response.sale));
                }
                text
            }
            ShellCommand::History => render_history(&sale::list_sales(&s.ledger).await),
            ShellCommand::Reprint { position } => {
                let found = sale::get_sale(&s.ledger, index_of(position)).await?;
                self.print_receipt(found)
            }
            ShellCommand::Clear { yes: true } => return Ok(self.clear().await),
            ShellCommand::Clear { yes: false } => {
                let count = s.ledger.with_ledger(|l| l.len()).await;
                if count == 0 {
                    "The day ledger is already empty.".to_string()
                } else {
                    self.pending_clear = true;
                    format!("Delete all {count} sales of the day? This cannot be undone. [yes/no]")
                }
            }
            ShellCommand::Seed { count, seed } => {
                let seed = seed.unwrap_or_else(rand::random);
                let response =
                    ledger::seed_demo_sales(&s.ledger, count, &sale::today(), seed).await?;
                format!(
                    "Appended {} demo sales ({} in the ledger).",
                    response.appended, response.ledger_len
                )
            }
            ShellCommand::Closeout => {
                let (preview, sales) = closeout::prepare_closeout(&s.ledger).await?;
                s.printer.submit(PrintJob::Closeout(sales));
                let columns: Vec<String> =
                    preview.column_totals.iter().map(i64::to_string).collect();
                format!(
                    "Closeout {}: {} sales, column totals {}, grand total {} ({})\n\
                     Printing closeout in the background.",
                    preview.date,
                    preview.sale_count,
                    columns.join(" / "),
                    preview.grand_total,
                    Money::from_cents(preview.total_due_cents)
                )
            }
            ShellCommand::Reload => {
                let count = ledger::reload_ledger(&s.ledger).await?;
                format!("Ledger reloaded ({count} sales).")
            }
            ShellCommand::Config { save } => {
                let mut text = render_config(&config::get_config(&s.config));
                if save {
                    let path = config::save_config(&s.config)?;
                    text.push_str(&format!("\nSaved to {}", path.display()));
                }
                text
            }
            ShellCommand::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }

    fn print_receipt(&self, sale: FinalizedSale) -> String {
        let text = format!("Printing receipt for {} in the background.", sale.customer());
        self.session.printer.submit(PrintJob::Receipt(sale));
        text
    }

    async fn clear(&mut self) -> Reply {
        match ledger::clear_ledger(&self.session.ledger).await {
            Ok(removed) => Reply::Text(format!("Day ledger cleared ({removed} sales removed).")),
            Err(err) => Reply::Text(err.to_string()),
        }
    }
}

fn index_of(position: u64) -> usize {
    usize::try_from(position.saturating_sub(1)).unwrap_or(usize::MAX)
}

fn usage_reply(err: clap::Error) -> Reply {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Reply::Text(err.render().to_string())
        }
        _ => {
            let rendered = err.render().to_string();
            let first = rendered.lines().next().unwrap_or_default();
            let message = first.strip_prefix("error: ").unwrap_or(first);
            Reply::Text(format!("{} (type 'help' for commands)", ApiError::validation(message)))
        }
    }
}

fn render_working(view: &ticket::WorkingSaleView) -> String {
    if view.entries.is_empty() {
        return "Current sale is empty.".to_string();
    }

    let customer = if view.customer.is_empty() {
        "(no customer)"
    } else {
        view.customer.as_str()
    };
    let mut lines = vec![format!("Current sale for {customer}")];
    for entry in &view.entries {
        lines.push(format!(
            "{:>3}. {}  x {:>3}  {:>8}",
            entry.position,
            entry.number,
            entry.quantity,
            Money::from_cents(entry.subtotal_cents).to_string()
        ));
    }
    lines.push(format!(
        "Total: {} tickets, {}",
        view.total_units,
        Money::from_cents(view.total_due_cents)
    ));
    lines.join("\n")
}

fn render_history(history: &sale::HistoryResponse) -> String {
    if history.sales.is_empty() {
        return "No sales recorded today.".to_string();
    }

    let mut lines: Vec<String> = history
        .sales
        .iter()
        .map(|s| {
            format!(
                "{:>3}. {}  {:<24} {:>4} tickets  {:>8}",
                s.position,
                s.date,
                s.customer,
                s.total_units,
                Money::from_cents(s.total_due_cents).to_string()
            )
        })
        .collect();
    lines.push(format!(
        "{} sales, {} tickets, {}",
        history.sales.len(),
        history.total_units,
        Money::from_cents(history.total_due_cents)
    ));
    lines.join("\n")
}

fn render_config(config: &crate::config::CounterConfig) -> String {
    format!(
        "database:      {}\nledger slot:   {}\nprint server:  {}\noutput dir:    {}\nprint timeout: {}s",
        config.db_path.display(),
        config.ledger_slot,
        config.print_url,
        config.output_dir.display(),
        config.print_timeout_secs
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CounterConfig;
    use crate::print::{PrintClient, PrintOutcome, PrintQueue};
    use crate::state::{ConfigState, LedgerState};
    use tally_db::{Database, DbConfig};
    use tokio::sync::mpsc;

    async fn shell() -> (Shell, mpsc::Receiver<PrintOutcome>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ledger = LedgerState::load(db, "day_ledger").await.unwrap();
        // Nothing listens on port 9 of localhost.
        let config = CounterConfig {
            print_url: "http://127.0.0.1:9".into(),
            print_timeout_secs: 2,
            ..CounterConfig::default()
        };
        let (printer, outcomes) = PrintQueue::new(PrintClient::new(&config).unwrap());
        let session = Session::new(ledger, ConfigState::new(config, None), printer);
        (Shell::new(session), outcomes)
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("add 5 3").unwrap(),
            ShellCommand::Add { number: 5, quantity: 3 }
        );
        assert_eq!(
            parse_line("add -1 3").unwrap(),
            ShellCommand::Add { number: -1, quantity: 3 }
        );
        assert_eq!(
            parse_line("customer Ana  María ").unwrap(),
            ShellCommand::Customer {
                name: "Ana  María".into()
            }
        );
        assert_eq!(
            parse_line("  customer -Ana").unwrap(),
            ShellCommand::Customer {
                name: "-Ana".into()
            }
        );
        assert!(parse_line("customer").is_err());
        assert!(parse_line("customers Ana").is_err());
        assert_eq!(parse_line("exit").unwrap(), ShellCommand::Quit);
        assert_eq!(
            parse_line("seed").unwrap(),
            ShellCommand::Seed { count: 10, seed: None }
        );
        assert!(parse_line("add five 3").is_err());
        assert!(parse_line("remove 0").is_err());
        assert!(parse_line("launch").is_err());
    }

    #[tokio::test]
    async fn test_entry_flow() {
        let (mut shell, _outcomes) = shell().await;

        assert_eq!(shell.handle_line("   ").await, Reply::Silent);
        shell.handle_line("add 5 3").await;
        shell.handle_line("add 7 10").await;
        let shown = text(shell.handle_line("customer Ana María").await);
        assert!(shown.contains("Current sale for Ana María"));
        assert!(shown.contains("Total: 13 tickets, $3.25"));

        let reply = text(shell.handle_line("add 7 91").await);
        assert!(reply.starts_with("[LimitExceeded]"));

        let reply = text(shell.handle_line("add 100 1").await);
        assert!(reply.starts_with("[ValidationError]"));

        let reply = text(shell.handle_line("add x 1").await);
        assert!(reply.starts_with("[ValidationError]"));

        let reply = text(shell.handle_line("remove 3").await);
        assert!(reply.starts_with("[IndexOutOfRange]"));

        let reply = text(shell.handle_line("finalize").await);
        assert_eq!(reply, "Sale #1 recorded: Ana María, 13 tickets, $3.25");
        assert_eq!(text(shell.handle_line("show").await), "Current sale is empty.");

        let history = text(shell.handle_line("history").await);
        assert!(history.contains("Ana María"));
        assert!(history.ends_with("1 sales, 13 tickets, $3.25"));

        assert_eq!(shell.handle_line("quit").await, Reply::Quit);
    }

    #[tokio::test]
    async fn test_customer_name_is_kept_verbatim() {
        let (mut shell, _outcomes) = shell().await;
        shell.handle_line("add 3 1").await;

        let shown = text(shell.handle_line("customer  Ana  María de la Cruz ").await);
        assert!(shown.contains("Current sale for Ana  María de la Cruz\n"));

        shell.handle_line("customer -Ana").await;
        let reply = text(shell.handle_line("finalize").await);
        assert_eq!(reply, "Sale #1 recorded: -Ana, 1 tickets, $0.25");
    }

    #[tokio::test]
    async fn test_clear_needs_confirmation() {
        let (mut shell, _outcomes) = shell().await;
        assert_eq!(
            text(shell.handle_line("clear").await),
            "The day ledger is already empty."
        );

        shell.handle_line("seed 3 --seed 1").await;
        let prompt = text(shell.handle_line("clear").await);
        assert!(prompt.starts_with("Delete all 3 sales"));
        assert_eq!(text(shell.handle_line("history").await), "Clear cancelled.");
        assert_eq!(shell.session().ledger.snapshot().await.len(), 3);

        shell.handle_line("clear").await;
        let reply = text(shell.handle_line("YES").await);
        assert_eq!(reply, "Day ledger cleared (3 sales removed).");
        assert!(shell.session().ledger.snapshot().await.is_empty());

        shell.handle_line("seed 2 --seed 1").await;
        let reply = text(shell.handle_line("clear --yes").await);
        assert_eq!(reply, "Day ledger cleared (2 sales removed).");
    }

    #[tokio::test]
    async fn test_closeout_on_empty_ledger() {
        let (mut shell, _outcomes) = shell().await;
        let reply = text(shell.handle_line("closeout").await);
        assert!(reply.starts_with("[EmptyLedger]"));
    }

    #[tokio::test]
    async fn test_print_failure_keeps_sale() {
        let (mut shell, mut outcomes) = shell().await;
        shell.handle_line("add 1 1").await;
        shell.handle_line("customer Ana").await;

        let reply = text(shell.handle_line("finalize --print").await);
        assert!(reply.contains("Printing receipt for Ana in the background."));

        let outcome = outcomes.recv().await.unwrap();
        assert!(outcome.result.is_err());
        assert!(outcome.to_string().contains("use reprint to retry"));
        assert_eq!(shell.session().ledger.snapshot().await.len(), 1);

        let reply = text(shell.handle_line("reprint 2").await);
        assert!(reply.starts_with("[IndexOutOfRange]"));
    }
}
