//! HTTP client for the print server

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{header, Client, Response};
use serde::Deserialize;
use tally_core::{closeout_filename, receipt_filename, CloseoutRequest, FinalizedSale};
use tracing::{debug, info};

use super::{PrintError, PrintResult};
use crate::config::CounterConfig;

/// A document returned by the print server and saved locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintedDocument {
    pub path: PathBuf,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Sends receipt and closeout requests and stores the returned documents.
#[derive(Debug, Clone)]
pub struct PrintClient {
    client: Client,
    base_url: String,
    output_dir: PathBuf,
}

impl PrintClient {
    /// Create a new print client from configuration
    pub fn new(config: &CounterConfig) -> PrintResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.print_timeout_secs))
            .build()
            .map_err(|e| PrintError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.print_base_url().to_string(),
            output_dir: config.output_dir.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `POST /receipts`, saved as `receipt_<customer>.txt`.
    pub async fn print_receipt(&self, sale: &FinalizedSale) -> PrintResult<PrintedDocument> {
        debug!(customer = %sale.customer(), "Sending receipt request");
        let fallback = receipt_filename(sale.customer());
        let response = self.post("receipts", sale).await?;
        self.save(response, &fallback).await
    }

    /// `POST /closeouts`, saved as `closeout_<date>.txt`.
    pub async fn print_closeout(&self, sales: &[FinalizedSale]) -> PrintResult<PrintedDocument> {
        debug!(sales = sales.len(), "Sending closeout request");
        let date = sales.first().map(FinalizedSale::date).unwrap_or_default();
        let fallback = closeout_filename(date);
        let request = CloseoutRequest {
            sales: sales.to_vec(),
        };
        let response = self.post("closeouts", &request).await?;
        self.save(response, &fallback).await
    }

    async fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> PrintResult<Response> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| PrintError::Transport(describe(&e)))?;

        Self::handle_response(response).await
    }

    /// Non-success statuses become transport failures carrying the server's message.
    async fn handle_response(response: Response) -> PrintResult<Response> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => format!("{}: {}", body.code, body.message),
                Err(_) => text,
            };
            return Err(PrintError::Transport(format!(
                "print server returned {status}: {detail}"
            )));
        }

        Ok(response)
    }

    async fn save(&self, response: Response, fallback: &str) -> PrintResult<PrintedDocument> {
        let filename = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| fallback.to_string());

        let body = response
            .text()
            .await
            .map_err(|e| PrintError::Transport(describe(&e)))?;

        let path = self.output_dir.join(filename);
        let output_err = |e: std::io::Error| PrintError::Output {
            path: path.clone(),
            reason: e.to_string(),
        };
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(output_err)?;
        tokio::fs::write(&path, &body).await.map_err(output_err)?;

        info!(path = %path.display(), bytes = body.len(), "Document saved");
        Ok(PrintedDocument { path, body })
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("print server timed out: {err}")
    } else if err.is_connect() {
        format!("print server unreachable: {err}")
    } else {
        err.to_string()
    }
}

/// Extracts `name` from `attachment; filename="name"`, keeping only the
/// final path component.
fn attachment_filename(value: &str) -> Option<String> {
    let raw = value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))?
        .trim_matches('"');

    let name = Path::new(raw).file_name()?.to_str()?;
    if name.is_empty() || name == ".." {
        return None;
    }
    Some(name.to_string())
}
