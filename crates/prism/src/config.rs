use config::{Config, Environment, Map};
use serde::Deserialize;

use crate::errors::ConfigError;
use crate::models::slot::ModelSlot;
use crate::providers::configs::{OpenAiCompatConfig, GEMINI_HOST, GROQ_HOST, OPENAI_HOST};
use crate::session::credentials::Credentials;

pub const DEFAULT_PRIMARY_MODEL: &str = "gemini/gemini-2.0-flash";
pub const DEFAULT_SECONDARY_MODEL_HIGH: &str = "groq/llama-3.3-70b-versatile";
pub const DEFAULT_SECONDARY_MODEL_FAST: &str = "groq/llama-3.1-8b-instant";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant that provides clear and concise responses.";

/// Raw settings as read from the environment (and `.env`)
#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default = "default_primary_model")]
    pub gemini_model: String,
    #[serde(default = "default_secondary_model_high")]
    pub groq_model_high: String,
    #[serde(default = "default_secondary_model_fast")]
    pub groq_model_fast: String,
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_system_prompt")]
    pub prism_system_prompt: String,
    #[serde(default = "default_gemini_host")]
    pub gemini_api_host: String,
    #[serde(default = "default_groq_host")]
    pub groq_api_host: String,
    #[serde(default = "default_openai_host")]
    pub openai_api_host: String,
}

impl Settings {
    /// Read settings from the process environment
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Read settings from an explicit set of variables instead of the process environment
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, ConfigError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::default()
                    .source(vars)
                    .ignore_empty(true)
                    .try_parsing(false),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        tracing::debug!(
            primary = %settings.gemini_model,
            secondary_high = %settings.groq_model_high,
            secondary_fast = %settings.groq_model_fast,
            "loaded settings"
        );
        Ok(settings)
    }

    /// Validate and convert into the configuration the session runs with
    pub fn into_config(self) -> Result<PlaygroundConfig, ConfigError> {
        let models = ModelSet {
            primary: required_model("GEMINI_MODEL", self.gemini_model)?,
            secondary_high: required_model("GROQ_MODEL_HIGH", self.groq_model_high)?,
            secondary_fast: required_model("GROQ_MODEL_FAST", self.groq_model_fast)?,
        };

        Ok(PlaygroundConfig {
            models,
            credentials: Credentials::new(self.gemini_api_key, self.groq_api_key),
            system_prompt: self.prism_system_prompt,
            hosts: OpenAiCompatConfig::new(
                self.gemini_api_host,
                self.groq_api_host,
                self.openai_api_host,
            ),
        }
        .with_system_prompt_fallback())
    }
}

/// Model identifiers for each slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSet {
    pub primary: String,
    pub secondary_high: String,
    pub secondary_fast: String,
}

impl ModelSet {
    pub fn model(&self, slot: ModelSlot) -> &str {
        match slot {
            ModelSlot::Primary => &self.primary,
            ModelSlot::SecondaryHigh => &self.secondary_high,
            ModelSlot::SecondaryFast => &self.secondary_fast,
        }
    }
}

impl Default for ModelSet {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_MODEL.to_string(),
            secondary_high: DEFAULT_SECONDARY_MODEL_HIGH.to_string(),
            secondary_fast: DEFAULT_SECONDARY_MODEL_FAST.to_string(),
        }
    }
}

/// Everything a session needs, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct PlaygroundConfig {
    pub models: ModelSet,
    /// Defaults for the credentials, the user may enter others while the session runs
    pub credentials: Credentials,
    pub system_prompt: String,
    pub hosts: OpenAiCompatConfig,
}

impl PlaygroundConfig {
    /// An empty system prompt falls back to the default one
    pub fn with_system_prompt_fallback(mut self) -> Self {
        if self.system_prompt.trim().is_empty() {
            self.system_prompt = DEFAULT_SYSTEM_PROMPT.to_string();
        }
        self
    }
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            models: ModelSet::default(),
            credentials: Credentials::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            hosts: OpenAiCompatConfig::default(),
        }
    }
}

/// Load `.env` from the working directory (or a parent) if there is one
pub fn load_dotenv() {
    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("loaded environment from {:?}", path);
    }
}

fn required_model(env_var: &str, value: String) -> Result<String, ConfigError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            env_var: env_var.to_string(),
            message: "model identifier must not be empty".to_string(),
        });
    }
    Ok(value)
}

fn default_primary_model() -> String {
    DEFAULT_PRIMARY_MODEL.to_string()
}

fn default_secondary_model_high() -> String {
    DEFAULT_SECONDARY_MODEL_HIGH.to_string()
}

fn default_secondary_model_fast() -> String {
    DEFAULT_SECONDARY_MODEL_FAST.to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_gemini_host() -> String {
    GEMINI_HOST.to_string()
}

fn default_groq_host() -> String {
    GROQ_HOST.to_string()
}

fn default_openai_host() -> String {
    OPENAI_HOST.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_settings() {
        let config = Settings::from_vars(Map::new())
            .unwrap()
            .into_config()
            .unwrap();

        assert_eq!(config.models, ModelSet::default());
        assert!(config.credentials.is_empty());
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.hosts, OpenAiCompatConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = Settings::from_vars(vars(&[
            ("GEMINI_MODEL", "gemini/gemini-1.5-pro"),
            ("GROQ_MODEL_FAST", "groq/gemma2-9b-it"),
            ("GEMINI_API_KEY", "g-key"),
            ("GROQ_API_KEY", "12345"),
            ("PRISM_SYSTEM_PROMPT", "Answer in one line."),
            ("GROQ_API_HOST", "http://localhost:9000/v1"),
        ]))
        .unwrap()
        .into_config()
        .unwrap();

        assert_eq!(config.models.model(ModelSlot::Primary), "gemini/gemini-1.5-pro");
        assert_eq!(
            config.models.model(ModelSlot::SecondaryHigh),
            DEFAULT_SECONDARY_MODEL_HIGH
        );
        assert_eq!(config.models.model(ModelSlot::SecondaryFast), "groq/gemma2-9b-it");
        assert_eq!(config.credentials.primary(), Some("g-key"));
        assert_eq!(config.credentials.secondary(), Some("12345"));
        assert_eq!(config.system_prompt, "Answer in one line.");
        assert_eq!(config.hosts.groq_host, "http://localhost:9000/v1");
        assert_eq!(config.hosts.gemini_host, GEMINI_HOST);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Settings::from_vars(vars(&[
            ("GEMINI_API_KEY", "   "),
            ("PRISM_SYSTEM_PROMPT", "  "),
        ]))
        .unwrap()
        .into_config()
        .unwrap();

        assert_eq!(config.credentials.primary(), None);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_blank_model_is_rejected() {
        let err = Settings::from_vars(vars(&[("GROQ_MODEL_HIGH", "  ")]))
            .unwrap()
            .into_config()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid value for GROQ_MODEL_HIGH: model identifier must not be empty"
        );
    }

    #[test]
    #[serial]
    fn test_process_environment() {
        env::set_var("GEMINI_API_KEY", "from-env");
        env::set_var("GROQ_MODEL_HIGH", "groq/mixtral-8x7b-32768");

        let config = Settings::new().unwrap().into_config().unwrap();
        assert_eq!(config.credentials.primary(), Some("from-env"));
        assert_eq!(config.models.secondary_high, "groq/mixtral-8x7b-32768");

        // Clean up
        env::remove_var("GEMINI_API_KEY");
        env::remove_var("GROQ_MODEL_HIGH");
    }
}
