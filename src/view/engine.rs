//! Built-in placeholder template engine
//!
//! Syntax:
//! - `{{ key }}` inserts the HTML-escaped binding
//! - `{!! key !!}` inserts the binding unescaped
//! - `user.name` walks nested objects, `items.0` indexes arrays
//!
//! Missing bindings render as empty strings.

use std::path::PathBuf;

use serde_json::Value;

use super::resolve::ViewCandidates;
use super::{display_value, Bindings, ViewRenderer};
use crate::config::ViewConfig;
use crate::error::{ResponseError, Result};

const ESCAPED: (&str, &str) = ("{{", "}}");
const RAW: (&str, &str) = ("{!!", "!!}");

/// Renders templates from the configured view directory
#[derive(Debug, Clone, Default)]
pub struct PlaceholderRenderer {
    base_path: Option<PathBuf>,
    script_extension: String,
}

impl PlaceholderRenderer {
    pub fn new(views: &ViewConfig) -> Self {
        Self {
            base_path: views.base_path.as_ref().map(PathBuf::from),
            script_extension: views.script_extension.clone(),
        }
    }
}

impl ViewRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String> {
        let candidates =
            ViewCandidates::new(self.base_path.as_deref(), template, &self.script_extension);
        let path = candidates
            .resolve_blocking()
            .map_err(|missing| ResponseError::ViewNotFound {
                path: missing.display().to_string(),
            })?;
        let source = std::fs::read_to_string(path)?;
        self.render_source(&source, bindings)
    }

    fn render_source(&self, source: &str, bindings: &Bindings) -> Result<String> {
        let mut output = String::with_capacity(source.len());
        let mut rest = source;

        while let Some((start, (open, close))) = next_tag(rest) {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + open.len()..];
            let end = after_open
                .find(close)
                .ok_or_else(|| ResponseError::Render(format!("unclosed '{open}' tag")))?;

            let value = lookup(bindings, after_open[..end].trim());
            let text = value.map(display_value).unwrap_or_default();
            if open == ESCAPED.0 {
                output.push_str(&escape_html(&text));
            } else {
                output.push_str(&text);
            }

            rest = &after_open[end + close.len()..];
        }

        output.push_str(rest);
        Ok(output)
    }
}

/// Find the earliest opening tag; raw wins when both start at the same offset
fn next_tag(source: &str) -> Option<(usize, (&'static str, &'static str))> {
    let raw = source.find(RAW.0).map(|i| (i, RAW));
    let escaped = source.find(ESCAPED.0).map(|i| (i, ESCAPED));
    match (raw, escaped) {
        (Some(r), Some(e)) => Some(if r.0 <= e.0 { r } else { e }),
        (r, e) => r.or(e),
    }
}

fn lookup<'a>(bindings: &'a Bindings, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut current = bindings.get(parts.next()?)?;
    for part in parts {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
