use super::factory::ProviderKind;

pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const GROQ_HOST: &str = "https://api.groq.com/openai/v1";
pub const OPENAI_HOST: &str = "https://api.openai.com/v1";

/// Base URLs of the OpenAI compatible endpoints, one per provider kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiCompatConfig {
    pub gemini_host: String,
    pub groq_host: String,
    pub openai_host: String,
}

impl OpenAiCompatConfig {
    pub fn new(gemini_host: String, groq_host: String, openai_host: String) -> Self {
        Self {
            gemini_host,
            groq_host,
            openai_host,
        }
    }

    /// Point every provider kind at the same host, used against local test servers
    pub fn single_host<S: Into<String>>(host: S) -> Self {
        let host = host.into();
        Self::new(host.clone(), host.clone(), host)
    }

    pub fn host(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::Gemini => &self.gemini_host,
            ProviderKind::Groq => &self.groq_host,
            ProviderKind::OpenAi => &self.openai_host,
        }
    }
}

impl Default for OpenAiCompatConfig {
    fn default() -> Self {
        Self::new(
            GEMINI_HOST.to_string(),
            GROQ_HOST.to_string(),
            OPENAI_HOST.to_string(),
        )
    }
}
