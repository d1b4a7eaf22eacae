use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ExchangeError;

/// Text-generation client abstraction (allows mocking).
///
/// One call is one round trip: no retry, no caching.
pub trait LlmClient {
    fn generate(&self, system: &str, payload: &str) -> Result<String, ExchangeError>;
}

impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    fn generate(&self, system: &str, payload: &str) -> Result<String, ExchangeError> {
        (**self).generate(system, payload)
    }
}

/// Request body for `generateContent`.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// A single content block holding the whole prompt.
    pub fn single(text: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![RequestPart { text }],
            }],
        }
    }
}

/// Response envelope from `generateContent`.
///
/// Every level is optional: a reply with nothing in it is an empty string,
/// not an error.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first part, or `""`.
    pub fn first_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_has_one_content_block() {
        let body = serde_json::to_value(GenerateContentRequest::single("hi")).unwrap();
        assert_eq!(body, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn first_text_extracts_nested_text() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"first"},{"text":"second"}]}},
                             {"content":{"parts":[{"text":"other"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_text(), "first");
    }

    #[test]
    fn missing_levels_yield_empty_string() {
        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
        ] {
            let resp: GenerateContentResponse = serde_json::from_str(body).unwrap();
            assert_eq!(resp.first_text(), "", "body: {body}");
        }
    }

    #[test]
    fn arc_forwards_to_inner_client() {
        struct Echo;
        impl LlmClient for Echo {
            fn generate(&self, system: &str, payload: &str) -> Result<String, ExchangeError> {
                Ok(format!("{system}|{payload}"))
            }
        }
        let client = Arc::new(Echo);
        assert_eq!(client.generate("s", "p").unwrap(), "s|p");
    }
}
