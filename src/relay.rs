//! LLM relay: forwards a prompt to the completion backend and normalizes
//! the outcome for the bot path, which must always produce some reply.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::groq::{Error, GroqClient};

pub const NO_RESPONSE: &str = "⚠️ No response";
pub const PROVIDER_ERROR: &str = "❌ Error from Groq";

/// Completion backend seam. `GroqClient` in production, stubs in tests.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, Error>;
}

#[async_trait]
impl Completion for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, Error> {
        self.chat(prompt).await
    }
}

#[derive(Clone)]
pub struct Relay {
    backend: Arc<dyn Completion>,
}

impl Relay {
    pub fn new(backend: Arc<dyn Completion>) -> Self {
        Self { backend }
    }

    /// Fallible variant for callers that surface errors themselves
    /// (the web endpoint).
    pub async fn try_complete(&self, prompt: &str) -> Result<String, Error> {
        self.backend.complete(prompt).await
    }

    /// Never fails. An empty provider result and any provider error are
    /// collapsed into fixed reply strings; the error itself is only logged.
    pub async fn complete(&self, prompt: &str) -> String {
        match self.backend.complete(prompt).await {
            Ok(text) => text,
            Err(Error::Empty) => NO_RESPONSE.to_string(),
            Err(e) => {
                warn!("Groq error: {e}");
                PROVIDER_ERROR.to_string()
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    enum Behavior {
        Reply(&'static str),
        Fail,
        Empty,
    }

    /// Scripted completion backend that records every prompt it receives.
    pub struct StubCompletion {
        behavior: Behavior,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StubCompletion {
        pub fn replying(reply: &'static str) -> Arc<Self> {
            Arc::new(Self { behavior: Behavior::Reply(reply), prompts: Mutex::new(Vec::new()) })
        }

        pub fn failing() -> Arc<Self> {
            Arc::new(Self { behavior: Behavior::Fail, prompts: Mutex::new(Vec::new()) })
        }

        pub fn empty() -> Arc<Self> {
            Arc::new(Self { behavior: Behavior::Empty, prompts: Mutex::new(Vec::new()) })
        }

        pub fn recorded_prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Completion for StubCompletion {
        async fn complete(&self, prompt: &str) -> Result<String, Error> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.behavior {
                Behavior::Reply(reply) => Ok(reply.to_string()),
                Behavior::Fail => Err(Error::Http("connection refused".to_string())),
                Behavior::Empty => Err(Error::Empty),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubCompletion;
    use super::*;

    #[tokio::test]
    async fn test_complete_passes_through_success() {
        let relay = Relay::new(StubCompletion::replying("hi"));
        assert_eq!(relay.complete("hello").await, "hi");
    }

    #[tokio::test]
    async fn test_complete_never_fails_on_provider_error() {
        let relay = Relay::new(StubCompletion::failing());
        assert_eq!(relay.complete("hello").await, PROVIDER_ERROR);
    }

    #[tokio::test]
    async fn test_complete_maps_empty_to_placeholder() {
        let relay = Relay::new(StubCompletion::empty());
        assert_eq!(relay.complete("hello").await, NO_RESPONSE);
    }

    #[tokio::test]
    async fn test_try_complete_surfaces_errors() {
        let relay = Relay::new(StubCompletion::failing());
        assert!(relay.try_complete("hello").await.is_err());
    }
}
