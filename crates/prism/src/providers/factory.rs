use super::{base::Provider, configs::OpenAiCompatConfig, openai::OpenAiCompatProvider};
use anyhow::Result;
use strum_macros::EnumIter;

#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Groq,
    OpenAi,
}

impl ProviderKind {
    /// The `provider/` prefix used in model identifiers
    pub fn prefix(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Groq => "groq",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Split `provider/model` into the provider kind and the model name sent on the wire.
    /// Identifiers without a known prefix go to the OpenAI endpoint untouched.
    pub fn from_model_id(model_id: &str) -> (ProviderKind, &str) {
        use strum::IntoEnumIterator;

        if let Some((prefix, model)) = model_id.split_once('/') {
            if let Some(kind) = ProviderKind::iter().find(|kind| kind.prefix() == prefix) {
                return (kind, model);
            }
        }
        (ProviderKind::OpenAi, model_id)
    }
}

pub fn get_provider(config: OpenAiCompatConfig) -> Result<Box<dyn Provider + Send + Sync>> {
    Ok(Box::new(OpenAiCompatProvider::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_model_id_known_prefixes() {
        assert_eq!(
            ProviderKind::from_model_id("gemini/gemini-2.0-flash"),
            (ProviderKind::Gemini, "gemini-2.0-flash")
        );
        assert_eq!(
            ProviderKind::from_model_id("groq/llama-3.3-70b-versatile"),
            (ProviderKind::Groq, "llama-3.3-70b-versatile")
        );
        assert_eq!(
            ProviderKind::from_model_id("openai/gpt-4o"),
            (ProviderKind::OpenAi, "gpt-4o")
        );
    }

    #[test]
    fn test_from_model_id_unknown_prefix() {
        assert_eq!(
            ProviderKind::from_model_id("gpt-4o-mini"),
            (ProviderKind::OpenAi, "gpt-4o-mini")
        );
        assert_eq!(
            ProviderKind::from_model_id("meta-llama/llama-3"),
            (ProviderKind::OpenAi, "meta-llama/llama-3")
        );
    }
}
