use std::collections::VecDeque;
use std::sync::Mutex;

use super::types::LlmClient;
use super::ExchangeError;

/// One recorded `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub system: String,
    pub payload: String,
}

/// Mock LLM client for testing: replays scripted replies and records calls.
///
/// When the script runs out, the last reply is repeated.
pub struct MockLlmClient {
    replies: Mutex<VecDeque<Result<String, String>>>,
    fallback: Mutex<Result<String, String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self::with_replies(vec![Ok(response.to_string())])
    }

    /// A client whose every call fails with a connection error.
    pub fn failing(message: &str) -> Self {
        Self::with_replies(vec![Err(message.to_string())])
    }

    /// Scripted replies; `Err` entries become `ExchangeError::Connection`.
    pub fn with_replies(replies: Vec<Result<String, String>>) -> Self {
        let fallback = replies.last().cloned().unwrap_or_else(|| Ok(String::new()));
        Self {
            replies: Mutex::new(replies.into()),
            fallback: Mutex::new(fallback),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, system: &str, payload: &str) -> Result<String, ExchangeError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                system: system.to_string(),
                payload: payload.to_string(),
            });
        }

        let next = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        let reply = match next {
            Some(reply) => reply,
            None => self
                .fallback
                .lock()
                .map(|f| f.clone())
                .unwrap_or_else(|_| Ok(String::new())),
        };
        reply.map_err(ExchangeError::Connection)
    }
}
