use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::retry::RetryPolicy;
use super::stateless_llm_interface::{ChatMessage, Completion, LLMError, StatelessLLMInterface};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI compatible LLM implementation (`/chat/completions`)
pub struct OpenAICompatibleLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: String,
    temperature: f32,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    // Kept loose: some providers send null or a parts array here.
    #[serde(default)]
    content: Value,
}

impl OpenAICompatibleLLM {
    pub fn new(
        client: Client,
        model: String,
        base_url: String,
        api_key: String,
        temperature: f32,
        retry: RetryPolicy,
    ) -> Self {
        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}",
            model, base_url
        );
        Self {
            client,
            model,
            base_url,
            api_key,
            temperature,
            retry,
        }
    }

    async fn send_once(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, LLMError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::Status { status, body });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| LLMError::Decode(e.to_string()))
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAICompatibleLLM {
    async fn chat_completion(&self, messages: &[ChatMessage]) -> anyhow::Result<Completion> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream: false,
        };
        let request = &request;
        let response = self
            .retry
            .execute(self.name(), move || self.send_once(request))
            .await?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_str())
            .map(str::to_string);

        Ok(Completion { content })
    }

    fn name(&self) -> &'static str {
        "openai_compatible_llm"
    }
}
