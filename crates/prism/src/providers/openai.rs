use anyhow::{anyhow, Result};
use reqwest::blocking::Client; // we are using blocking API here to make sync calls
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use super::base::Provider;
use super::configs::OpenAiCompatConfig;
use super::factory::ProviderKind;
use super::utils::{describe_provider_error, messages_to_openai_spec};
use crate::models::message::Message;

/// Talks to any OpenAI compatible `chat/completions` endpoint.
/// Gemini and Groq both expose one, the model prefix picks which host we hit.
pub struct OpenAiCompatProvider {
    client: Client,
    config: OpenAiCompatConfig,
}

impl OpenAiCompatProvider {
    pub fn new(config: OpenAiCompatConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    fn post(&self, host: &str, api_key: &str, payload: Value) -> Result<Value> {
        let url = format!("{}/chat/completions", host.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()?;

        match response.status() {
            StatusCode::OK => Ok(response.json()?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() => {
                let body = response.text().unwrap_or_default();
                Err(anyhow!("Server error: {}: {}", status, body))
            }
            status => {
                let body = response.text().unwrap_or_default();
                Err(anyhow!("Request failed: {}: {}", status, body))
            }
        }
    }
}

impl Provider for OpenAiCompatProvider {
    fn call(&self, model: &str, messages: &[Message], api_key: &str) -> Result<Value> {
        let (kind, model_name) = ProviderKind::from_model_id(model);
        let host = self.config.host(kind);
        tracing::debug!(model = model_name, host, "sending chat completion");

        let payload = json!({
            "model": model_name,
            "messages": messages_to_openai_spec(messages),
        });

        let response = self.post(host, api_key, payload)?;

        // Some gateways answer 200 with an error body
        if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
            return Err(anyhow!("Provider API error: {}", describe_provider_error(error)));
        }

        Ok(response)
    }
}
