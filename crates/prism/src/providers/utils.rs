use serde_json::{json, Value};

use crate::models::message::Message;

/// Convert internal Message format to OpenAI's API message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": message.content,
            })
        })
        .collect()
}

/// Describe an `error` object returned in a response body
///
/// Handles the common shapes:
/// - `{"message": "...", "code": "..."}` (OpenAI, Groq)
/// - `{"message": "...", "status": "..."}` (Gemini)
/// - a bare string
pub fn describe_provider_error(error: &Value) -> String {
    if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
        if let Some(code) = error.get("code").and_then(|c| c.as_str()) {
            return format!("{} (code: {})", message, code);
        }
        if let Some(status) = error.get("status").and_then(|s| s.as_str()) {
            return format!("{} (status: {})", message, status);
        }
        return message.to_string();
    }
    match error.as_str() {
        Some(message) => message.to_string(),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_to_openai_spec() {
        let spec = messages_to_openai_spec(&Message::exchange("You are terse.", "Hello"));

        assert_eq!(spec.len(), 2);
        assert_eq!(spec[0]["role"], "system");
        assert_eq!(spec[0]["content"], "You are terse.");
        assert_eq!(spec[1]["role"], "user");
        assert_eq!(spec[1]["content"], "Hello");
    }

    #[test]
    fn test_describe_provider_error_with_status() {
        let error = json!({
            "code": 429,
            "message": "Resource has been exhausted (e.g. check quota).",
            "status": "RESOURCE_EXHAUSTED"
        });

        assert_eq!(
            describe_provider_error(&error),
            "Resource has been exhausted (e.g. check quota). (status: RESOURCE_EXHAUSTED)"
        );
    }

    #[test]
    fn test_describe_provider_error_with_code() {
        let error = json!({
            "message": "Invalid API Key",
            "type": "invalid_request_error",
            "code": "invalid_api_key"
        });

        assert_eq!(
            describe_provider_error(&error),
            "Invalid API Key (code: invalid_api_key)"
        );
    }

    #[test]
    fn test_describe_provider_error_plain() {
        assert_eq!(describe_provider_error(&json!("overloaded")), "overloaded");
        assert_eq!(describe_provider_error(&json!({"oops": 1})), r#"{"oops":1}"#);
    }
}
