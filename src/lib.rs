//! HTTP response building for request handlers
//!
//! A [`Responder`](response::Responder) holds the process-wide settings;
//! each exchange gets a [`ResponseBuilder`](response::ResponseBuilder)
//! that sets headers and status, emits bodies (text, JSON, downloads,
//! rendered views) and finally becomes a hyper response.

pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod response;
pub mod server;
pub mod view;

pub use error::{ResponseError, Result};
pub use response::{Responder, ResponseBuilder};
