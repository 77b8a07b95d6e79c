use std::sync::Arc;

use crate::config::Config;
use crate::llm::{StatelessLLMFactory, StatelessLLMInterface};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Built once at startup and shared read-only by every request.
    pub llm: Arc<dyn StatelessLLMInterface>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = StatelessLLMFactory::create_llm(&config.llm_config)?;
        Ok(Self::with_llm(config, llm))
    }

    pub fn with_llm(config: Config, llm: Arc<dyn StatelessLLMInterface>) -> Self {
        Self {
            config: Arc::new(config),
            llm,
        }
    }
}
