use thiserror::Error;

/// A single vendor call (or website fetch) that did not produce usable data.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Places API returned {status}: {message}")]
    Api { status: String, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl RequestError {
    /// Map a non-OK Places `status` field to an error.
    pub fn from_status(status: &str, message: Option<String>) -> Self {
        let message = message.unwrap_or_default();
        match status {
            "OVER_QUERY_LIMIT" => RequestError::QuotaExceeded(message),
            _ => RequestError::Api {
                status: status.to_string(),
                message,
            },
        }
    }
}
