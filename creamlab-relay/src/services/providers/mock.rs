//! Mock provider implementation for testing.

use super::{GenerateContentRequest, GenerateContentResponse, GenerationProvider, ProviderError};
use async_trait::async_trait;
use secrecy::Secret;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A canned answer for one call.
pub enum MockReply {
    /// Respond with this JSON as the generateContent envelope.
    Json(serde_json::Value),
    /// Respond with a non-success status.
    Status(u16, String),
    /// Fail at the transport level.
    Network(String),
}

/// Mock provider that replays queued replies and records every call.
pub struct MockProvider {
    replies: Mutex<VecDeque<MockReply>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, GenerateContentRequest)>>,
}

impl MockProvider {
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Convenience constructor answering with a single text part.
    pub fn with_text(text: &str) -> Self {
        Self::new([MockReply::Json(text_envelope(text))])
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Models requested, in call order.
    pub fn requested_models(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.iter().map(|(model, _)| model.clone()).collect())
            .unwrap_or_default()
    }

    /// Text of the first part of the most recent request.
    pub fn last_prompt(&self) -> Option<String> {
        let requests = self.requests.lock().ok()?;
        let (_, request) = requests.last()?;
        request
            .contents
            .first()
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.clone())
    }
}

/// Wrap `text` as `candidates[0].content.parts[0].text`.
pub fn text_envelope(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
}

#[async_trait]
impl GenerationProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate_content(
        &self,
        _api_key: &Secret<String>,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((model.to_string(), request.clone()));
        }

        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front());

        match reply {
            Some(MockReply::Json(value)) => serde_json::from_value(value)
                .map_err(|e| ProviderError::Decode(e.to_string())),
            Some(MockReply::Status(status, body)) => Err(ProviderError::Upstream { status, body }),
            Some(MockReply::Network(msg)) => Err(ProviderError::Network(msg)),
            None => Err(ProviderError::Network(
                "Mock provider has no replies left".to_string(),
            )),
        }
    }
}
