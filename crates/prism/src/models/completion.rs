use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
/// Outcome of one completion request, errors are carried as text rather than raised
pub enum CompletionResult {
    Text(String),
    Error(String),
}

impl CompletionResult {
    pub fn text<S: Into<String>>(text: S) -> Self {
        CompletionResult::Text(text.into())
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        CompletionResult::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CompletionResult::Error(_))
    }

    /// Get the text if this is a Text variant
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CompletionResult::Text(text) => Some(text),
            CompletionResult::Error(_) => None,
        }
    }
}

impl fmt::Display for CompletionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionResult::Text(text) => f.write_str(text),
            CompletionResult::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// The shape of a provider reply
///
/// OpenAI compatible endpoints put the answer at `choices[0].message.content`, but
/// gateways and older completion endpoints don't always follow that. Rather than failing
/// on an unexpected shape we keep whatever came back and degrade it to text.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    /// The first choice carried message content
    Choice { text: String },
    /// There was a first choice, but without string message content
    ChoiceBody(Value),
    /// No choices at all
    Unrecognized(Value),
}

impl ProviderResponse {
    pub fn from_value(response: Value) -> Self {
        let first_choice = response
            .get("choices")
            .and_then(|choices| choices.as_array())
            .and_then(|choices| choices.first());

        match first_choice {
            Some(choice) => match choice
                .get("message")
                .and_then(|message| message.get("content"))
                .and_then(|content| content.as_str())
            {
                Some(text) => ProviderResponse::Choice {
                    text: text.to_string(),
                },
                None => ProviderResponse::ChoiceBody(choice.clone()),
            },
            None => ProviderResponse::Unrecognized(response),
        }
    }

    /// Best effort text for this response
    pub fn into_text(self) -> String {
        match self {
            ProviderResponse::Choice { text } => text,
            ProviderResponse::ChoiceBody(body) => {
                let content = body
                    .get("message")
                    .and_then(|message| message.get("content"))
                    .filter(|content| !content.is_null());
                if let Some(content) = content {
                    return value_to_text(content);
                }
                match body.get("text").and_then(|text| text.as_str()) {
                    Some(text) if !text.is_empty() => text.to_string(),
                    _ => body.to_string(),
                }
            }
            ProviderResponse::Unrecognized(response) => response.to_string(),
        }
    }
}

fn value_to_text(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_choice_with_message_content() {
        let response = json!({
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello there"},
                "finish_reason": "stop"
            }]
        });

        let parsed = ProviderResponse::from_value(response);
        assert_eq!(
            parsed,
            ProviderResponse::Choice {
                text: "Hello there".to_string()
            }
        );
        assert_eq!(parsed.into_text(), "Hello there");
    }

    #[test]
    fn test_choice_with_legacy_text() {
        let response = json!({"choices": [{"index": 0, "text": "legacy completion"}]});

        let parsed = ProviderResponse::from_value(response);
        assert!(matches!(parsed, ProviderResponse::ChoiceBody(_)));
        assert_eq!(parsed.into_text(), "legacy completion");
    }

    #[test]
    fn test_choice_with_structured_content() {
        let response = json!({
            "choices": [{"message": {"content": [{"text": "part"}]}}]
        });

        let text = ProviderResponse::from_value(response).into_text();
        assert_eq!(text, r#"[{"text":"part"}]"#);
    }

    #[test]
    fn test_choice_without_content_stringifies_choice() {
        let response = json!({"choices": [{"finish_reason": "length"}]});

        let text = ProviderResponse::from_value(response).into_text();
        assert_eq!(text, r#"{"finish_reason":"length"}"#);
    }

    #[test]
    fn test_unrecognized_stringifies_response() {
        let response = json!({"candidates": [{"output": "hi"}]});

        let parsed = ProviderResponse::from_value(response.clone());
        assert_eq!(parsed, ProviderResponse::Unrecognized(response));
        assert_eq!(parsed.into_text(), r#"{"candidates":[{"output":"hi"}]}"#);
    }

    #[test]
    fn test_empty_choices_is_unrecognized() {
        let parsed = ProviderResponse::from_value(json!({"choices": []}));
        assert!(matches!(parsed, ProviderResponse::Unrecognized(_)));
    }

    #[test]
    fn test_completion_result_display() {
        assert_eq!(CompletionResult::text("hi").to_string(), "hi");
        assert_eq!(
            CompletionResult::error("Request failed").to_string(),
            "Error: Request failed"
        );
        assert!(CompletionResult::error("x").is_error());
        assert_eq!(CompletionResult::text("ok").as_text(), Some("ok"));
    }
}
