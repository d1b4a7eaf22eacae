pub mod types;
pub mod prompt;
pub mod parser;
pub mod gemini;
pub mod mock;

pub use types::*;
pub use prompt::*;
pub use parser::*;
pub use gemini::*;
pub use mock::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Cannot reach text-generation endpoint at {0}")]
    Connection(String),

    #[error("Text-generation endpoint returned error (status {status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("Model reply is missing required key '{0}'")]
    SchemaViolation(String),
}

impl ExchangeError {
    /// Failures that happened before any reply text existed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::ApiError { .. } | Self::HttpClient(_) | Self::ResponseParsing(_)
        )
    }
}
