//! HTTP response building module
//!
//! A [`ResponseBuilder`] is the response context of one exchange: the
//! outgoing headers, the status, the output body and whether the exchange
//! has been ended. Only its methods can write to the response; `finish`
//! turns it into a hyper response.
//!
//! Operations are split by concern:
//! - headers and status (this file)
//! - CORS directives (`cors`)
//! - body emission: `send` and `json` (`body`)
//! - file downloads (`download`)
//! - view dispatch: `send_file` and `view` (`views`)

mod body;
mod cors;
mod download;
mod payload;
pub mod responder;
mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use cors::{
    ALLOW_CREDENTIALS, ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN, EXPOSE_HEADERS, MAX_AGE,
};
pub use download::Download;
pub use payload::{JsonArg, Payload};
pub use responder::{configure, configure_with, instance, Responder};

use std::fmt;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::Response;

use crate::error::{ResponseError, Result};
use crate::http::status;
use crate::logger;

/// Charset forced by `json`
pub const UTF8: &str = "UTF-8";

pub struct ResponseBuilder<'a> {
    responder: &'a Responder,
    headers: HeaderMap,
    status: Option<u16>,
    body: Vec<u8>,
    charset: Option<&'static str>,
    ended: bool,
}

impl<'a> ResponseBuilder<'a> {
    pub fn new(responder: &'a Responder) -> Self {
        Self {
            responder,
            headers: HeaderMap::new(),
            status: None,
            body: Vec::new(),
            charset: None,
            ended: false,
        }
    }

    /// Set a header, replacing any previous value
    ///
    /// Fails with `InvalidHeader` when the name or value cannot be
    /// represented in HTTP, leaving the headers untouched.
    pub fn add_header(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        self.ensure_open()?;
        let (header_name, header_value) = header_pair(name, value)?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Assign the status code
    ///
    /// Returns `false` without touching anything for codes outside the
    /// supported table (or once the exchange has ended). An already
    /// assigned status is only replaced when `replace` is set.
    pub fn code(&mut self, code: u16, replace: bool) -> bool {
        if self.ended || status::reason_phrase(code).is_none() {
            return false;
        }
        if replace || self.status.is_none() {
            self.status = Some(code);
        }
        true
    }

    /// `HTTP/1.1 <code> <reason>` for the assigned status
    pub fn status_line(&self) -> Option<String> {
        self.status.and_then(status::status_line)
    }

    /// Force UTF-8 as the output encoding
    pub fn force_utf8(&mut self) {
        self.charset = Some(UTF8);
    }

    pub const fn charset(&self) -> Option<&'static str> {
        self.charset
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether a `stop` flag ended the exchange
    pub const fn is_ended(&self) -> bool {
        self.ended
    }

    pub const fn responder(&self) -> &'a Responder {
        self.responder
    }

    /// Convert into a transport response; the status defaults to 200
    pub fn finish(self) -> Response<Full<Bytes>> {
        let status = self.status.unwrap_or(200);
        let mut builder = Response::builder().status(status);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers);
        }

        builder
            .body(Full::new(Bytes::from(self.body)))
            .unwrap_or_else(|e| {
                logger::log_error(&format!("Failed to build {status} response: {e}"));
                Response::new(Full::new(Bytes::new()))
            })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.ended {
            Err(ResponseError::Ended)
        } else {
            Ok(())
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }
}

impl fmt::Debug for ResponseBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBuilder")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .field("charset", &self.charset)
            .field("ended", &self.ended)
            .finish_non_exhaustive()
    }
}

/// Validate a header name and value without touching any builder
fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let invalid = || ResponseError::InvalidHeader {
        name: name.to_string(),
    };
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
    let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
    Ok((header_name, header_value))
}
