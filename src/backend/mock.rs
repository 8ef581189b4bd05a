//! Scripted backend for tests and offline demos

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, ToolhubError};

use super::Backend;

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with this JSON body
    Json(Value),
    /// Fail as if the connection dropped
    NetworkError(String),
    /// Failure status without a JSON body
    Status(u16),
}

/// A recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub path: String,
    pub params: Vec<(String, String)>,
}

/// Backend answering from per-path reply queues.
///
/// Each path holds a queue; the last reply of a queue is sticky so a widget
/// can be re-triggered without scripting every call.
pub struct MockBackend {
    base_url: String,
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            base_url: "http://mock.local".to_string(),
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reply for `path`
    pub fn with_reply(self, path: &str, reply: MockReply) -> Self {
        self.push_reply(path, reply);
        self
    }

    /// Queue a JSON reply for `path`
    pub fn with_json(self, path: &str, body: Value) -> Self {
        self.with_reply(path, MockReply::Json(body))
    }

    pub fn push_reply(&self, path: &str, reply: MockReply) {
        let mut replies = self.replies.lock().unwrap_or_else(|e| e.into_inner());
        replies.entry(path.to_string()).or_default().push_back(reply);
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of calls made to `path`
    pub fn call_count(&self, path: &str) -> usize {
        self.calls().iter().filter(|c| c.path == path).count()
    }

    fn next_reply(&self, path: &str) -> Option<MockReply> {
        let mut replies = self.replies.lock().unwrap_or_else(|e| e.into_inner());
        let queue = replies.get_mut(path)?;
        if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(MockCall {
                path: path.to_string(),
                params: params.to_vec(),
            });

        match self.next_reply(path) {
            Some(MockReply::Json(body)) => Ok(body),
            Some(MockReply::Status(code)) => Err(ToolhubError::Status(code)),
            Some(MockReply::NetworkError(msg)) => Err(ToolhubError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                msg,
            ))),
            None => Err(ToolhubError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("no scripted reply for {}", path),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_replies_in_order_then_sticky() {
        let mock = MockBackend::new()
            .with_json("/api/joke", json!({"text": "one"}))
            .with_json("/api/joke", json!({"text": "two"}));

        assert_eq!(mock.get_json("/api/joke", &[]).await.unwrap()["text"], "one");
        assert_eq!(mock.get_json("/api/joke", &[]).await.unwrap()["text"], "two");
        assert_eq!(mock.get_json("/api/joke", &[]).await.unwrap()["text"], "two");
        assert_eq!(mock.call_count("/api/joke"), 3);
    }

    #[tokio::test]
    async fn test_mock_unscripted_path_fails() {
        let mock = MockBackend::new();
        let err = mock.get_json("/api/nothing", &[]).await.unwrap_err();
        assert!(err.to_string().contains("no scripted reply"));
    }

    #[tokio::test]
    async fn test_mock_records_params() {
        let mock = MockBackend::new().with_json("/api/weather", json!({}));
        let params = vec![("city".to_string(), "Paris".to_string())];
        mock.get_json("/api/weather", &params).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params, params);
    }

    #[tokio::test]
    async fn test_mock_status_reply() {
        let mock = MockBackend::new().with_reply("/api/ip", MockReply::Status(500));
        let err = mock.get_json("/api/ip", &[]).await.unwrap_err();
        assert!(matches!(err, ToolhubError::Status(500)));
    }
}
