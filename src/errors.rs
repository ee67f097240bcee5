// errors.rs
use crate::places::RequestError;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad input, config) or downstream layers (Places API, export).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Request(#[from] RequestError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet Error: {0}")]
    Xlsx(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    /// Errors that belong on the page as a notice rather than an error page.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ServerError::BadRequest(_) | ServerError::Config(_) | ServerError::Request(_)
        )
    }
}
