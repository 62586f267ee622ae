//! Error types for the procedure API client.
//!
//! # Design
//! Non-2xx responses carry the numeric status and its reason phrase so the
//! rendered message reads `API error: 404 Not Found`. Transport and JSON
//! failures wrap the underlying error unchanged and expose it through
//! `source()`.

use thiserror::Error;

/// Boxed error produced by a `Transport` implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `ProcedureClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("API error: {}", status_line(.status, .status_text))]
    Http { status: u16, status_text: String },

    /// The request could not be sent or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The response body was not the JSON shape the operation expects.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// `404 Not Found`, or just `599` when the server gave no reason phrase.
fn status_line(status: &u16, status_text: &str) -> String {
    if status_text.is_empty() {
        status.to_string()
    } else {
        format!("{status} {status_text}")
    }
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
