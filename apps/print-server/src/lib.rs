//! # Ticket Tally Print Server
//!
//! HTTP service that renders receipts and end-of-day closeouts.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Print Server Routes                              │
//! │                                                                         │
//! │  POST /receipts  ── FinalizedSale ──► ReceiptDocument ──► text/plain   │
//! │                                                                         │
//! │  POST /closeouts ── CloseoutRequest ─┬► summarize ──► CloseoutDocument │
//! │                                      └► backup (historial_*.json)      │
//! │                                                                         │
//! │  GET  /health    ──────────────────────────────────────────► "ok"      │
//! │                                                                         │
//! │  Layers: body limit → CORS → TraceLayer                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inbound sales are rebuilt through tally-core's validating deserializer,
//! so every total on a printed document is recomputed from its entries.
//!
//! ## Configuration
//! Environment variables:
//! - `TALLY_PRINT_PORT` - Listening port (default: 3000)
//! - `TALLY_BIND_ADDR` - Listening address (default: 0.0.0.0)
//! - `TALLY_BACKUP_DIR` - Closeout backup directory (default: backups)
//! - `TALLY_MAX_BODY_BYTES` - Request body limit (default: 50 MiB)
//! - `TALLY_ALLOWED_ORIGIN` - CORS origin (default: any)

pub mod backup;
pub mod config;
pub mod error;
pub mod render;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use config::{ConfigError, PrintServerConfig};
pub use error::{ServiceError, ServiceResult};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub backup_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        AppState {
            backup_dir: Arc::new(backup_dir.into()),
        }
    }
}

/// Builds the fully layered application.
pub fn build_app(config: &PrintServerConfig) -> Router {
    let state = AppState::new(config.backup_dir.clone());

    Router::new()
        .route("/health", get(routes::health))
        .route("/receipts", post(routes::print_receipt))
        .route("/closeouts", post(routes::print_closeout))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors_layer(config.allowed_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(_)) => {
            warn!("TALLY_ALLOWED_ORIGIN is not a valid header value, allowing any origin");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}
