//! # Ticket Tally Print Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Counter ───► HTTP (3000) ───► render ───► text/plain document         │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                             backups/ (closeouts)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_print_server::{build_app, PrintServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Ticket Tally print server...");

    let config = PrintServerConfig::load()?;
    info!(
        addr = %config.socket_addr(),
        backup_dir = %config.backup_dir.display(),
        max_body_bytes = config.max_body_bytes,
        "Configuration loaded"
    );

    let app = build_app(&config);
    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// `RUST_LOG` wins; otherwise debug for our crates, warnings for sqlx.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
