use std::time::{Duration, Instant};

use crate::config::{ExchangeConfig, CONNECT_TIMEOUT_SECS};

use super::prompt::build_exchange_prompt;
use super::types::{GenerateContentRequest, GenerateContentResponse, LlmClient};
use super::ExchangeError;

/// Blocking client for the Generative Language `generateContent` endpoint.
///
/// Must be built and called outside an async context (use `spawn_blocking`).
pub struct GeminiClient {
    endpoint: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    /// Create a client for the configured model.
    ///
    /// Only connecting is time-limited; a started exchange runs to completion.
    pub fn new(config: &ExchangeConfig) -> Result<Self, ExchangeError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ExchangeError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint_url(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    #[cfg(test)]
    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl LlmClient for GeminiClient {
    fn generate(&self, system: &str, payload: &str) -> Result<String, ExchangeError> {
        let prompt = build_exchange_prompt(system, payload);
        let body = GenerateContentRequest::single(&prompt);
        let started = Instant::now();

        // without_url(): the key travels in the query string and must not reach logs
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ExchangeError::Connection(self.endpoint.clone())
                } else {
                    ExchangeError::HttpClient(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Text-generation endpoint rejected request");
            return Err(ExchangeError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| ExchangeError::ResponseParsing(e.without_url().to_string()))?;
        let text = parsed.first_text();

        tracing::info!(
            prompt_chars = prompt.len(),
            reply_chars = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Exchange completed"
        );

        Ok(text)
    }
}
