use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of one prompt turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One labeled message in the sequence sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// What the provider answered.
///
/// `content` is `None` when the provider responded without a string text
/// payload (no candidates, a null message, non-text parts).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Completion {
    pub content: Option<String>,
}

/// Failure of a single provider HTTP exchange.
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode provider response: {0}")]
    Decode(String),
}

impl LLMError {
    /// Transport failures, rate limits and server errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            LLMError::Transport(e) => !e.is_decode(),
            LLMError::Status { status, .. } => {
                *status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            LLMError::Decode(_) => false,
        }
    }
}

/// Interface for a stateless language model
/// Stateless means the LLM doesn't store memory, system prompts, or user messages.
/// Implementations hold only configuration and credentials, so one instance is
/// shared by all in-flight requests.
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Submit the prompt turns and return the provider's answer.
    async fn chat_completion(&self, messages: &[ChatMessage]) -> anyhow::Result<Completion>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_retry_only_on_rate_limit_and_server_errors() {
        let status = |code: u16| LLMError::Status {
            status: reqwest::StatusCode::from_u16(code).unwrap(),
            body: String::new(),
        };

        assert!(status(429).is_retryable());
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(401).is_retryable());
        assert!(!LLMError::Decode("bad json".into()).is_retryable());
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::system("be brief");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "system");
        assert_eq!(value["content"], "be brief");
    }
}
