//! Response error types
//!
//! Every validation error is raised before the response is touched.
//! Unsupported status codes are not errors: `ResponseBuilder::code` returns `false`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResponseError {
    /// A CORS list that needs at least one entry was empty
    #[error("{header} requires at least one value, got an empty list")]
    EmptyList { header: &'static str },

    /// `Access-Control-Max-Age` got something that is not a number
    #[error("expected a numeric value, got '{value}'")]
    NotNumeric { value: String },

    /// Header name or value cannot be sent over HTTP
    #[error("invalid header '{name}'")]
    InvalidHeader { name: String },

    /// Neither the script template nor the markup fallback exists
    #[error("view file {path} does not exist")]
    ViewNotFound { path: String },

    #[error("view rendering failed: {0}")]
    Render(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The exchange was ended by a `stop` flag; nothing more may be written
    #[error("response already ended")]
    Ended,
}

pub type Result<T> = std::result::Result<T, ResponseError>;
