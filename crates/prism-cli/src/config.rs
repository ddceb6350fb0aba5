use anyhow::Result;
use clap::Args;
use prism::config::{load_dotenv, PlaygroundConfig, Settings};
use prism::session::credentials::Credentials;

/// Values given on the command line win over the environment and `.env`
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Gemini API key (can also be set via GEMINI_API_KEY environment variable)
    #[arg(long, global = true)]
    pub gemini_key: Option<String>,

    /// Groq API key (can also be set via GROQ_API_KEY environment variable)
    #[arg(long, global = true)]
    pub groq_key: Option<String>,

    /// System prompt applied to all models
    #[arg(long, global = true)]
    pub system_prompt: Option<String>,

    /// Primary model (can also be set via GEMINI_MODEL)
    #[arg(long, global = true)]
    pub primary_model: Option<String>,

    /// High capability secondary model (can also be set via GROQ_MODEL_HIGH)
    #[arg(long, global = true)]
    pub secondary_model_high: Option<String>,

    /// Fast secondary model (can also be set via GROQ_MODEL_FAST)
    #[arg(long, global = true)]
    pub secondary_model_fast: Option<String>,
}

impl Overrides {
    pub fn apply(&self, mut config: PlaygroundConfig) -> PlaygroundConfig {
        let typed = Credentials::new(self.gemini_key.clone(), self.groq_key.clone());
        config.credentials = config.credentials.overridden_by(&typed);

        if let Some(system_prompt) = &self.system_prompt {
            config.system_prompt = system_prompt.clone();
        }
        override_model(&mut config.models.primary, &self.primary_model);
        override_model(&mut config.models.secondary_high, &self.secondary_model_high);
        override_model(&mut config.models.secondary_fast, &self.secondary_model_fast);

        config.with_system_prompt_fallback()
    }
}

fn override_model(model: &mut String, value: &Option<String>) {
    if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        *model = value.to_string();
    }
}

/// Build the session configuration from `.env`, the environment and the command line
pub fn load_config(overrides: &Overrides) -> Result<PlaygroundConfig> {
    load_dotenv();
    let config = Settings::new()?.into_config()?;
    Ok(overrides.apply(config))
}
