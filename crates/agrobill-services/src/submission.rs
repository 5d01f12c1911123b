//! # Submission Gateway
//!
//! The seam a finished [`BillPayload`] is handed through for PDF
//! generation. The HTTP implementation speaks the backend's observable
//! contract: `POST {base}/generate_pdf` with the payload as JSON, a
//! success body of `{"filename": "..."}` or an error body of
//! `{"error": "..."}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use agrobill_core::BillPayload;

// =============================================================================
// Document Reference
// =============================================================================

/// Reference to a generated bill document, retrievable from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub filename: String,
}

// =============================================================================
// Submission Error
// =============================================================================

/// Submission failures. Both variants are recoverable: the ledger is left
/// untouched and the operator may retry.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The service processed the request and refused it.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// The service could not be reached or the response was unreadable.
    #[error("submission service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

// =============================================================================
// Gateway Trait
// =============================================================================

/// Anything that can turn a bill payload into a generated document.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, payload: &BillPayload) -> Result<DocumentRef, SubmissionError>;
}

// =============================================================================
// HTTP Gateway
// =============================================================================

/// Gateway posting to the real PDF backend over HTTP.
pub struct HttpSubmissionGateway {
    client: reqwest::Client,
    base_url: String,
}

/// Backend response body: exactly one of the two fields is set.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    filename: Option<String>,
    error: Option<String>,
}

impl HttpSubmissionGateway {
    /// Creates a gateway against the given base URL (no trailing slash
    /// required).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        HttpSubmissionGateway {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SubmissionGateway for HttpSubmissionGateway {
    async fn submit(&self, payload: &BillPayload) -> Result<DocumentRef, SubmissionError> {
        let url = format!("{}/generate_pdf", self.base_url);
        debug!(%url, customer = %payload.customer_name, "submitting bill");

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();
        let body: SubmitResponse = response.json().await?;

        if !status.is_success() {
            return Err(SubmissionError::Rejected(
                body.error
                    .unwrap_or_else(|| format!("service returned {status}")),
            ));
        }

        match body.filename {
            Some(filename) => Ok(DocumentRef { filename }),
            None => Err(SubmissionError::Rejected(
                "response missing document reference".to_string(),
            )),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
