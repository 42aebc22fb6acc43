//! Reply Extraction
//!
//! Successful endpoint responses are JSON objects whose reply may live under
//! one of several field names. [`ReplyFields`] is the ordered list checked,
//! first match wins. A field only matches when its value is "set": `null`,
//! `false`, `0` and `""` count as absent.

use serde_json::Value;

use crate::error::TransportError;

/// One recognised response field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyField {
    /// Field holds the reply text
    Reply(String),
    /// Field holds an error message; matching it fails the exchange
    Error(String),
}

impl ReplyField {
    /// The JSON field name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Reply(name) | Self::Error(name) => name,
        }
    }
}

/// Ordered reply field precedence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyFields {
    fields: Vec<ReplyField>,
}

impl Default for ReplyFields {
    fn default() -> Self {
        Self::new(["answer", "reply", "message"], Some("error"))
    }
}

impl ReplyFields {
    /// Reply fields in priority order, followed by an optional error field
    pub fn new<I, S>(reply_names: I, error_name: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<ReplyField> = reply_names
            .into_iter()
            .map(|name| ReplyField::Reply(name.into()))
            .collect();
        if let Some(name) = error_name {
            fields.push(ReplyField::Error(name.to_string()));
        }
        Self { fields }
    }

    /// Fields in the order they are checked
    #[must_use]
    pub fn fields(&self) -> &[ReplyField] {
        &self.fields
    }

    /// Pull the reply out of a successful response payload
    ///
    /// Unrecognised shapes are never an error: the whole payload comes back
    /// re-encoded as JSON text.
    pub fn extract(&self, payload: &Value) -> Result<String, TransportError> {
        if let Some(object) = payload.as_object() {
            for field in &self.fields {
                let Some(text) = object.get(field.name()).and_then(field_text) else {
                    continue;
                };
                return match field {
                    ReplyField::Reply(_) => Ok(text),
                    ReplyField::Error(_) => Err(TransportError::Server(text)),
                };
            }
        }

        tracing::debug!("No recognised reply field, returning raw payload");
        Ok(payload.to_string())
    }
}

/// Text of a set field, None when the value counts as absent
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
