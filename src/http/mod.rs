//! HTTP protocol layer module
//!
//! Status code table and content type detection used by the response builder.

pub mod mime;
pub mod status;

// Re-export commonly used items
pub use status::{reason_phrase, status_line};
