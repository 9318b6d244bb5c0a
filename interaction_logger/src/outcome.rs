//! What the user sees after a submission.
//!
//! [`resolve_response`] is the pure core of the handler: given the status code
//! and body returned by the endpoint it decides between a logged interaction
//! and an application error. Anything it cannot read is a [`TransportError`]
//! and ends up as [`Outcome::Unreachable`].

use crate::error::TransportError;
use serde_json::{Number, Value};

pub const REJECTED_FALLBACK: &str = "Failed to log interaction";
pub const UNREACHABLE_MESSAGE: &str = "Network error or server unreachable.";

/// Terminal state of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx response; `message` is the text to display.
    Logged { message: String },
    /// Non-2xx response with a JSON body. `reason` is the server's `error`
    /// field when it carries something worth showing.
    Rejected { status: u16, reason: Option<String> },
    /// The request failed or the response could not be read.
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
}

impl Tone {
    /// CSS colour applied to the status element.
    pub fn color(self) -> &'static str {
        match self {
            Tone::Success => "green",
            Tone::Failure => "red",
        }
    }
}

/// Text and styling written into the status element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl Outcome {
    pub fn status_message(&self) -> StatusMessage {
        match self {
            Outcome::Logged { message } => StatusMessage {
                text: message.clone(),
                tone: Tone::Success,
            },
            Outcome::Rejected { reason, .. } => StatusMessage {
                text: format!("Error: {}", reason.as_deref().unwrap_or(REJECTED_FALLBACK)),
                tone: Tone::Failure,
            },
            Outcome::Unreachable => StatusMessage {
                text: UNREACHABLE_MESSAGE.to_string(),
                tone: Tone::Failure,
            },
        }
    }

    /// Only a logged interaction refreshes the page.
    pub fn triggers_reload(&self) -> bool {
        matches!(self, Outcome::Logged { .. })
    }
}

/// Maps an endpoint response onto an [`Outcome`].
///
/// The body is parsed as JSON whatever the status. A body that is not JSON,
/// or is the literal `null`, is an error for the caller to treat as a
/// transport failure.
pub fn resolve_response(status: u16, body: &[u8]) -> Result<Outcome, TransportError> {
    let json: Value = serde_json::from_slice(body)?;
    if json.is_null() {
        return Err(TransportError::NullBody);
    }

    if (200..300).contains(&status) {
        let message = json.get("message").map(display_text).unwrap_or_default();
        Ok(Outcome::Logged { message })
    } else {
        let reason = json
            .get("error")
            .filter(|value| is_truthy(value))
            .map(display_text);
        Ok(Outcome::Rejected { status, reason })
    }
}

/// Text shown for a JSON value placed into the status element, following a
/// browser's string conversion: arrays join their items with commas and any
/// object reads `[object Object]`.
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items.iter().map(display_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".into(),
    }
}

fn number_text(n: &Number) -> String {
    let Some(f) = n.as_f64().filter(|_| n.is_f64()) else {
        return n.to_string();
    };

    if f == 0.0 {
        "0".into()
    } else if f.abs() >= 1e21 {
        format!("{f:e}").replace('e', "e+")
    } else if f.abs() < 1e-6 {
        format!("{f:e}")
    } else {
        format!("{f}")
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
