//! Conversions between pipeline prompts and the OpenAI chat format.

use crate::openai_compat::{ChatMessage, ChatRequest, ChatResponse};
use lullaby_error::{ProviderError, ProviderErrorKind};

/// Wraps a single prompt as a one-message chat request.
pub fn to_chat_request(
    prompt: &str,
    model: &str,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> Result<ChatRequest, ProviderError> {
    let mut builder = ChatRequest::builder();
    builder
        .model(model.to_string())
        .messages(vec![ChatMessage::user(prompt)])
        .temperature(temperature)
        .max_tokens(max_tokens);

    builder.build().map_err(|e| {
        ProviderError::new(ProviderErrorKind::Builder(format!(
            "Failed to build request: {}",
            e
        )))
    })
}

/// Extracts the generated text from the first choice.
pub fn from_chat_response(response: &ChatResponse) -> Result<String, ProviderError> {
    let content = response
        .choices
        .first()
        .ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::ResponseParsing(
                "No choices in response".to_string(),
            ))
        })?
        .message
        .content
        .as_deref()
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(ProviderError::new(ProviderErrorKind::EmptyResponse));
    }

    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_unset_sampling_fields() {
        let request = to_chat_request("Write a poem", "gpt-4o-mini", None, None).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Write a poem");
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_null_content_is_empty_response() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
        )
        .unwrap();

        let err = from_chat_response(&response).unwrap_err();
        assert_eq!(err.kind(), &ProviderErrorKind::EmptyResponse);
    }
}
