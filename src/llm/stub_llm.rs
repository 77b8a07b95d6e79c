use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::stateless_llm_interface::{ChatMessage, Completion, StatelessLLMInterface};

/// Canned provider answers for tests.
pub enum StubReply {
    Text(String),
    NoText,
    Fail(String),
}

pub struct StubLLM {
    reply: StubReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl StubLLM {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(StubReply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<Vec<ChatMessage>> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl StatelessLLMInterface for StubLLM {
    async fn chat_completion(&self, messages: &[ChatMessage]) -> anyhow::Result<Completion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(messages.to_vec());
        match &self.reply {
            StubReply::Text(text) => Ok(Completion {
                content: Some(text.clone()),
            }),
            StubReply::NoText => Ok(Completion::default()),
            StubReply::Fail(reason) => Err(anyhow::anyhow!("{}", reason)),
        }
    }

    fn name(&self) -> &'static str {
        "stub_llm"
    }
}
