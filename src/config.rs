use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::Result;

/// Environment prefix for overrides, e.g. `TRANSLATOR__LLM_CONFIG__MODEL`.
const ENV_PREFIX: &str = "TRANSLATOR";

/// Checked in order when no Gemini key is configured.
const GEMINI_KEY_VARS: [&str; 2] = ["NEXT_PUBLIC_LANGCHAIN_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub llm_config: LLMConfig,
    #[serde(default)]
    pub client_config: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served as the router fallback (the page hosting the form).
    #[serde(default)]
    pub static_dir: Option<String>,
}

/// Settings for the one provider client shared by every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub llm_api_key: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_llm_provider() -> String {
    "gemini_llm".to_string()
}

fn default_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_base_delay_ms() -> u64 {
    500
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_storage_path() -> String {
    "translator_storage.json".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            model: default_model(),
            base_url: None,
            llm_api_key: String::new(),
            temperature: 0.0,
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            storage_path: default_storage_path(),
        }
    }
}

impl Config {
    /// Load `.env` files, then the optional YAML file at `CONFIG_PATH`
    /// (or `conf.yaml`), then `TRANSLATOR__*` environment overrides.
    pub fn load() -> Result<Self> {
        for env_file in [".env.local", ".env"] {
            if dotenvy::from_filename(env_file).is_ok() {
                tracing::debug!("Loaded environment from {}", env_file);
            }
        }

        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "conf.yaml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_api_key_fallback(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Fill an empty Gemini key from the conventional environment variables.
    pub fn apply_api_key_fallback(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let llm = &mut self.llm_config;
        if !llm.llm_api_key.is_empty() || llm.llm_provider != "gemini_llm" {
            return;
        }

        for name in GEMINI_KEY_VARS {
            if let Some(key) = lookup(name).filter(|k| !k.is_empty()) {
                tracing::debug!("Using Gemini API key from {}", name);
                llm.llm_api_key = key;
                return;
            }
        }
    }

    /// A missing file is not an error: every field has a default.
    pub fn from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            tracing::debug!("No config file at {}, using defaults", path);
        }

        let config = ::config::Config::builder()
            .add_source(::config::File::from(Path::new(path)).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let config = Config::from_file(path.to_str().unwrap()).unwrap();

        assert_eq!(config.system_config.port, 3000);
        assert_eq!(config.llm_config.llm_provider, "gemini_llm");
        assert_eq!(config.llm_config.model, "gemini-1.5-pro");
        assert_eq!(config.llm_config.temperature, 0.0);
        assert_eq!(config.llm_config.max_retries, 2);
        assert!(config.system_config.static_dir.is_none());
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "system_config:\n  port: 8080\nllm_config:\n  llm_provider: openai_llm\n  model: gpt-4o-mini\n  max_retries: 5"
        )
        .unwrap();

        let config = Config::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.system_config.port, 8080);
        assert_eq!(config.system_config.host, "0.0.0.0");
        assert_eq!(config.llm_config.llm_provider, "openai_llm");
        assert_eq!(config.llm_config.model, "gpt-4o-mini");
        assert_eq!(config.llm_config.max_retries, 5);
        assert_eq!(config.client_config.server_url, "http://localhost:3000");
    }

    #[test]
    fn gemini_key_falls_back_to_environment_names() {
        let mut config = Config::default();
        config.apply_api_key_fallback(|name| match name {
            "GOOGLE_API_KEY" => Some("google-key".to_string()),
            "NEXT_PUBLIC_LANGCHAIN_API_KEY" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.llm_config.llm_api_key, "google-key");

        let mut config = Config::default();
        config.apply_api_key_fallback(|name| Some(format!("{}-value", name)));
        assert_eq!(config.llm_config.llm_api_key, "NEXT_PUBLIC_LANGCHAIN_API_KEY-value");
    }

    #[test]
    fn configured_key_is_kept() {
        let mut config = Config::default();
        config.llm_config.llm_api_key = "configured".to_string();
        config.apply_api_key_fallback(|_| Some("from-env".to_string()));
        assert_eq!(config.llm_config.llm_api_key, "configured");

        let mut config = Config::default();
        config.llm_config.llm_provider = "openai_llm".to_string();
        config.apply_api_key_fallback(|_| Some("from-env".to_string()));
        assert_eq!(config.llm_config.llm_api_key, "");
    }
}
