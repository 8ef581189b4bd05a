//! Request lifecycle shared by every fetching widget
//!
//! Idle -> Loading -> Success | Error, and back to Loading on the next
//! trigger. There is no cancellation and no request fencing: whichever
//! completion arrives last decides the state, even if it was issued first.

use serde_json::Value;

use crate::error::Result;

/// Shown when a response is missing the data a widget expects
pub const GENERIC_ERROR: &str = "Failed";

/// State of one widget's request cycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(Value),
    Error(String),
}

/// Owns the request state of one widget instance
#[derive(Debug, Clone, Default)]
pub struct RequestLifecycle {
    state: RequestState,
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.state {
            RequestState::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Enter Loading, dropping any previous result or error
    pub fn begin(&mut self) {
        self.state = RequestState::Loading;
    }

    /// Apply a completed call.
    ///
    /// A body carrying an `error` or `detail` marker counts as a failure.
    pub fn resolve(&mut self, outcome: Result<Value>) {
        self.state = match outcome {
            Ok(body) => match error_marker(&body) {
                Some(msg) => RequestState::Error(msg),
                None => RequestState::Success(body),
            },
            Err(e) => RequestState::Error(e.to_string()),
        };
    }
}

/// The backend's error message in `body`, preferring `error` over `detail`.
pub fn error_marker(body: &Value) -> Option<String> {
    let obj = body.as_object()?;
    obj.get("error")
        .and_then(marker_text)
        .or_else(|| obj.get("detail").and_then(marker_text))
}

fn marker_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
