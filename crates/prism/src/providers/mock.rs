use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use std::sync::Mutex;

use crate::models::message::Message;
use crate::providers::base::Provider;

/// A call the mock provider received
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub api_key: String,
    pub messages: Vec<Message>,
}

/// A mock provider that replays pre-configured outcomes for testing
pub struct MockProvider {
    responses: Mutex<Vec<Result<Value, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of outcomes, an `Err` is raised as an error
    pub fn new(responses: Vec<Result<Value, String>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A well formed chat completion body with `text` as the first choice
    pub fn reply(text: &str) -> Result<Value, String> {
        Ok(json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }]
        }))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Provider for MockProvider {
    fn call(&self, model: &str, messages: &[Message], api_key: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            api_key: api_key.to_string(),
            messages: messages.to_vec(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Echo the model name once the script runs out
            let content = format!("reply from {}", model);
            return Ok(json!({"choices": [{"message": {"content": content}}]}));
        }
        responses.remove(0).map_err(|e| anyhow!(e))
    }
}
