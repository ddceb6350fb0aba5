use anyhow::Result;
use serde_json::Value;

use crate::models::message::Message;

/// Base trait for AI providers (Gemini, Groq, OpenAI, etc)
///
/// A provider only moves bytes: it returns the raw response body, or an error whose
/// text carries enough detail (status code, provider error body) for the caller to
/// decide whether the call is worth retrying.
pub trait Provider: Send + Sync {
    /// Send one chat completion request for `model` using `api_key`
    fn call(&self, model: &str, messages: &[Message], api_key: &str) -> Result<Value>;
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn call(&self, model: &str, messages: &[Message], api_key: &str) -> Result<Value> {
        (**self).call(model, messages, api_key)
    }
}
