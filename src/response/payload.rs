//! Body payloads and JSON call shapes

use serde_json::Value;

use crate::view::display_value;

/// Anything `send` can write to the body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Already printable text, written as-is
    Text(String),
    /// Raw bytes, written as-is
    Bytes(Vec<u8>),
    /// Structured data; arrays and objects are written as JSON
    Value(Value),
}

impl Payload {
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
            Self::Value(value) => display_value(&value).into_bytes(),
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Second argument of `json_with`
///
/// A number is the status code. A boolean is the legacy form: status 200,
/// and the flag ends the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonArg {
    pub code: u16,
    pub stop: bool,
}

impl Default for JsonArg {
    fn default() -> Self {
        Self {
            code: 200,
            stop: false,
        }
    }
}

impl From<u16> for JsonArg {
    fn from(code: u16) -> Self {
        Self { code, stop: false }
    }
}

impl From<bool> for JsonArg {
    fn from(stop: bool) -> Self {
        Self { code: 200, stop }
    }
}
