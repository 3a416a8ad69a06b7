//! View rendering module
//!
//! The response builder never executes templates itself; it resolves a
//! view and hands it, together with a closed set of named bindings, to a
//! [`ViewRenderer`].

pub mod engine;
pub mod resolve;

pub use engine::PlaceholderRenderer;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ResponseError, Result};

/// Named values visible to a template
pub type Bindings = Map<String, Value>;

/// View-rendering collaborator
pub trait ViewRenderer: Send + Sync {
    /// Render a named template
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String>;

    /// Render template source that was already loaded
    fn render_source(&self, source: &str, bindings: &Bindings) -> Result<String>;
}

/// Turn any serializable map-like value into bindings
///
/// # Examples
/// ```
/// use responder::view::into_bindings;
/// let b = into_bindings(&serde_json::json!({"title": "Hi"})).unwrap();
/// assert_eq!(b["title"], "Hi");
/// ```
pub fn into_bindings<T: Serialize + ?Sized>(data: &T) -> Result<Bindings> {
    match serde_json::to_value(data)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Bindings::new()),
        other => Err(ResponseError::Render(format!(
            "bindings must be a map, got {other}"
        ))),
    }
}

/// Print a JSON value the way it appears in a response body
///
/// Strings are written raw, numbers as text, `true` as `1`, `false`
/// and `null` as nothing. Containers become JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
