use thiserror::Error;

/// Reasons a submission is rejected before any provider is called
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Nothing to send: please enter a message")]
    EmptyPrompt,

    #[error("No API keys provided. Set GEMINI_API_KEY or GROQ_API_KEY in .env or enter them at the prompt.")]
    NoCredentials,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {env_var}: {message}")]
    InvalidValue { env_var: String, message: String },

    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

pub type SessionResult<T> = Result<T, SessionError>;
