use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::retry::RetryPolicy;
use super::stateless_llm_interface::{ChatMessage, Completion, LLMError, Role, StatelessLLMInterface};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini via the Generative Language REST API
pub struct GeminiLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: String,
    temperature: f32,
    retry: RetryPolicy,
}

impl GeminiLLM {
    pub fn new(
        client: Client,
        model: String,
        base_url: String,
        api_key: String,
        temperature: f32,
        retry: RetryPolicy,
    ) -> Self {
        info!("Initialized GeminiLLM: model={}, base_url={}", model, base_url);
        Self {
            client,
            model,
            base_url,
            api_key,
            temperature,
            retry,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// System turns become `systemInstruction`; the rest go to `contents`.
    fn build_body(&self, messages: &[ChatMessage]) -> Value {
        let system: Vec<Value> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| json!({ "text": m.content }))
            .collect();

        let contents: Vec<Value> = messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| json!({ "role": "user", "parts": [{ "text": m.content }] }))
            .collect();

        let mut body = json!({
            "contents": contents,
            "generationConfig": { "temperature": self.temperature },
        });
        if !system.is_empty() {
            body["systemInstruction"] = json!({ "parts": system });
        }
        body
    }

    async fn send_once(&self, body: &Value) -> Result<Value, LLMError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::Status { status, body });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| LLMError::Decode(e.to_string()))
    }
}

/// Concatenated text of the first candidate's parts, if it has any text.
fn extract_text(response: &Value) -> Option<String> {
    let parts = response.pointer("/candidates/0/content/parts")?.as_array()?;
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

#[async_trait]
impl StatelessLLMInterface for GeminiLLM {
    async fn chat_completion(&self, messages: &[ChatMessage]) -> anyhow::Result<Completion> {
        let body = self.build_body(messages);
        let body = &body;
        let response = self
            .retry
            .execute(self.name(), move || self.send_once(body))
            .await?;

        if let Some(reason) = response.pointer("/promptFeedback/blockReason") {
            debug!("Gemini blocked the prompt: {}", reason);
        }

        Ok(Completion {
            content: extract_text(&response),
        })
    }

    fn name(&self) -> &'static str {
        "gemini_llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::time::Duration;

    const PATH: &str = "/v1beta/models/gemini-1.5-pro:generateContent";

    fn llm(base_url: String, max_retries: u32) -> GeminiLLM {
        GeminiLLM::new(
            Client::new(),
            "gemini-1.5-pro".to_string(),
            base_url,
            "test-key".to_string(),
            0.0,
            RetryPolicy::new(max_retries, Duration::from_millis(1)),
        )
    }

    fn prompt() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("Translate from en to ur."),
            ChatMessage::user("Hello"),
        ]
    }

    #[test]
    fn body_carries_system_instruction_and_user_turn() {
        let llm = llm("http://unused".into(), 0);
        let body = llm.build_body(&prompt());

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Translate from en to ur.");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(body["generationConfig"]["temperature"], 0.0);
    }

    #[test]
    fn text_parts_are_concatenated() {
        let response = json!({
            "candidates": [{ "content": { "parts": [{ "text": "ہی" }, { "text": "لو" }] } }]
        });
        assert_eq!(extract_text(&response).as_deref(), Some("ہیلو"));
    }

    #[test]
    fn no_candidates_means_no_text() {
        let response = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert_eq!(extract_text(&response), None);

        let response = json!({ "candidates": [{ "content": { "parts": [{ "inlineData": {} }] } }] });
        assert_eq!(extract_text(&response), None);
    }

    #[tokio::test]
    async fn returns_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Hello" }] }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"role":"model","parts":[{"text":" ہیلو \n"}]}}]}"#)
            .create_async()
            .await;

        let completion = llm(server.url(), 2).chat_completion(&prompt()).await.unwrap();

        assert_eq!(completion.content.as_deref(), Some(" ہیلو \n"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn retries_server_errors_then_fails() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .with_status(503)
            .with_body("unavailable")
            .expect(3)
            .create_async()
            .await;

        let result = llm(server.url(), 2).chat_completion(&prompt()).await;

        assert!(result.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn bad_request_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .with_status(400)
            .with_body(r#"{"error":{"message":"API key not valid"}}"#)
            .expect(1)
            .create_async()
            .await;

        let result = llm(server.url(), 2).chat_completion(&prompt()).await;

        assert!(result.is_err());
        mock.assert_async().await;
    }
}
