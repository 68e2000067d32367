//! Groq chat-completions API client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

pub struct GroqClient {
    api_key: String,
    model: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqClient {
    pub fn new(api_key: String, model: String) -> Self {
        // A hung upstream call must not stall an interaction forever.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self { api_key, model, http }
    }

    /// Send one prompt with the fixed system instruction and return the
    /// first choice's content, trimmed.
    pub async fn chat(&self, prompt: &str) -> Result<String, Error> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage { role: "system", content: SYSTEM_PROMPT },
                ApiMessage { role: "user", content: prompt },
            ],
        };

        let response = self
            .http
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{status}: {body}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        api_response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(Error::Empty)
    }
}

#[derive(Debug)]
pub enum Error {
    Http(String),
    Api(String),
    Parse(String),
    Empty,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::Api(e) => write!(f, "API error: {e}"),
            Error::Parse(e) => write!(f, "Parse error: {e}"),
            Error::Empty => write!(f, "Empty response"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ApiRequest {
            model: "llama3-70b-8192",
            messages: vec![
                ApiMessage { role: "system", content: SYSTEM_PROMPT },
                ApiMessage { role: "user", content: "hello" },
            ],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3-70b-8192");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_response_content_extraction() {
        let raw = r#"{"choices":[{"message":{"content":"  hi there  "}}]}"#;
        let response: ApiResponse = serde_json::from_str(raw).unwrap();
        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim);
        assert_eq!(content, Some("hi there"));
    }

    #[test]
    fn test_response_without_content() {
        let raw = r#"{"choices":[{"message":{}}]}"#;
        let response: ApiResponse = serde_json::from_str(raw).unwrap();
        assert!(response.choices[0].message.content.is_none());

        let raw = r#"{"choices":[]}"#;
        let response: ApiResponse = serde_json::from_str(raw).unwrap();
        assert!(response.choices.is_empty());
    }
}
