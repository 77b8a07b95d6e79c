use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::LLMConfig;
use super::gemini_llm::{GeminiLLM, DEFAULT_GEMINI_BASE_URL};
use super::openai_compatible_llm::{OpenAICompatibleLLM, DEFAULT_OPENAI_BASE_URL};
use super::retry::RetryPolicy;
use super::stateless_llm_interface::StatelessLLMInterface;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Build the process-wide provider client from configuration.
    pub fn create_llm(config: &LLMConfig) -> Result<Arc<dyn StatelessLLMInterface>> {
        info!("Initializing LLM: {}", config.llm_provider);

        if config.llm_api_key.is_empty() {
            warn!("No API key configured for {}; provider calls will be rejected", config.llm_provider);
        }

        let client = Client::builder().build()?;
        let retry = RetryPolicy::new(
            config.max_retries,
            Duration::from_millis(config.retry_base_delay_ms),
        );

        match config.llm_provider.as_str() {
            "gemini_llm" => Ok(Arc::new(GeminiLLM::new(
                client,
                config.model.clone(),
                config
                    .base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                config.llm_api_key.clone(),
                config.temperature,
                retry,
            ))),
            "openai_compatible_llm" | "openai_llm" | "deepseek_llm" | "groq_llm" | "mistral_llm" => {
                Ok(Arc::new(OpenAICompatibleLLM::new(
                    client,
                    config.model.clone(),
                    config
                        .base_url
                        .clone()
                        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                    config.llm_api_key.clone(),
                    config.temperature,
                    retry,
                )))
            }
            _ => Err(anyhow::anyhow!("Unsupported LLM provider: {}", config.llm_provider)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_gemini() {
        let llm = StatelessLLMFactory::create_llm(&LLMConfig::default()).unwrap();
        assert_eq!(llm.name(), "gemini_llm");
    }

    #[test]
    fn openai_aliases_share_one_client_type() {
        for provider in ["openai_llm", "groq_llm", "deepseek_llm"] {
            let config = LLMConfig {
                llm_provider: provider.to_string(),
                ..LLMConfig::default()
            };
            let llm = StatelessLLMFactory::create_llm(&config).unwrap();
            assert_eq!(llm.name(), "openai_compatible_llm");
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = LLMConfig {
            llm_provider: "carrier_pigeon".to_string(),
            ..LLMConfig::default()
        };
        assert!(StatelessLLMFactory::create_llm(&config).is_err());
    }
}
