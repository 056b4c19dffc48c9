//! Typed parsing of the reasoning collaborator's extraction reply.
//!
//! The model is instructed to emit a single JSON object; replies frequently
//! arrive wrapped in markdown code fences. Parsing is a strict
//! parse-then-validate step: the reply either deserializes into a
//! [`ConstraintDraft`] or is reported as malformed. Callers decide how to
//! degrade (the orchestrator treats a malformed reply as an empty
//! extraction and continues the turn).

use serde::Deserialize;
use thiserror::Error;

/// Errors from parsing an extraction reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplyParseError {
    #[error("reply is not a JSON object: {reason}")]
    NotJson { reason: String },

    #[error("reply does not match the expected schema: {reason}")]
    InvalidShape { reason: String },
}

/// The raw extraction result, exactly as the model reports it.
///
/// Codes and names are kept separate: an explicit code wins, a bare name
/// still needs resolution. All fields are nullable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConstraintDraft {
    pub origin_code: Option<String>,
    pub destination_code: Option<String>,
    pub origin_name: Option<String>,
    pub destination_name: Option<String>,
    pub depart_date: Option<String>,
    pub return_date: Option<String>,
    pub travelers: Option<u32>,
}

impl ConstraintDraft {
    /// Normalizes whitespace-only strings to `None`.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.origin_code,
            &mut self.destination_code,
            &mut self.origin_name,
            &mut self.destination_name,
            &mut self.depart_date,
            &mut self.return_date,
        ] {
            if field.as_deref().map(str::trim).is_some_and(str::is_empty) {
                *field = None;
            }
        }
        self
    }
}

/// Parses a model reply into a constraint draft.
///
/// Strips surrounding markdown code fences before deserializing.
pub fn parse_reply(reply: &str) -> Result<ConstraintDraft, ReplyParseError> {
    let body = strip_code_fence(reply);

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ReplyParseError::NotJson {
            reason: e.to_string(),
        })?;

    if !value.is_object() {
        return Err(ReplyParseError::InvalidShape {
            reason: format!("expected an object, got {}", json_kind(&value)),
        });
    }

    let draft: ConstraintDraft =
        serde_json::from_value(value).map_err(|e| ReplyParseError::InvalidShape {
            reason: e.to_string(),
        })?;

    Ok(draft.normalized())
}

/// Removes a wrapping ``` or ```json fence, if present.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
