use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::ClassificationFailurePolicy;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub llm: LlmSettings,
    pub chat: ChatSettings,
    pub classification: ClassificationSettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_size_mb: usize,
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub upload_root: PathBuf,
}

/// OpenAI-compatible completion endpoint used for report analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// Gemini endpoint used for the chat assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    #[serde(default)]
    pub system_instruction: Option<String>,
    pub session_idle_timeout_seconds: u64,
    pub eviction_interval_seconds: u64,
    pub max_history_messages: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationSettings {
    pub token_url: String,
    pub search_url: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    pub language: String,
    pub max_results: usize,
    pub max_query_chars: usize,
    #[serde(default)]
    pub failure_policy: ClassificationFailurePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Loads `config/base.toml`, `config/<environment>.toml`, then `APP_*`
    /// environment variables (`APP_LLM__API_KEY` sets `llm.api_key`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"), environment)
    }

    pub fn load_from(dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(dir.join("base.toml")).required(true))
            .add_source(
                File::from(dir.join(format!("{}.toml", environment.config_name())))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Names of credentials the live backends need but that are unset.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.llm.api_key) {
            missing.push("llm.api_key");
        }
        if is_blank(&self.chat.api_key) {
            missing.push("chat.api_key");
        }
        if is_blank(&self.classification.client_id) {
            missing.push("classification.client_id");
        }
        if is_blank(&self.classification.client_secret) {
            missing.push("classification.client_secret");
        }
        missing
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}
