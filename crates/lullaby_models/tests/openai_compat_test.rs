//! Tests for the OpenAI-compatible client against a local mock server.

use lullaby_error::ProviderErrorKind;
use lullaby_interface::GenerationClient;
use lullaby_models::OpenAICompatibleClient;
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

fn client_for(server: &mockito::ServerGuard) -> OpenAICompatibleClient {
    OpenAICompatibleClient::new(
        "test-key",
        format!("{}/v1/chat/completions", server.url()),
        "mock-openai",
        Duration::from_secs(5),
    )
    .expect("client should build")
}

#[tokio::test]
async fn test_generate_returns_first_choice_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "Tell me a story"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "Once upon a time"}, "finish_reason": "stop"}
                ],
                "usage": {"prompt_tokens": 4, "completion_tokens": 4, "total_tokens": 8}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let text = client
        .generate("Tell me a story", "gpt-4o-mini")
        .await
        .expect("generation should succeed");

    assert_eq!(text, "Once upon a time");
    assert_eq!(client.provider_name(), "mock-openai");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sampling_options_are_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "temperature": 0.5,
            "max_tokens": 300
        })))
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"content": "ok"}}]}"#)
        .create_async()
        .await;

    let client = client_for(&server)
        .with_temperature(Some(0.5))
        .with_max_tokens(Some(300));
    let text = client.generate("prompt", "model-x").await.unwrap();

    assert_eq!(text, "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_body("upstream overloaded")
        .create_async()
        .await;

    let err = client_for(&server)
        .generate("prompt", "gpt-4o-mini")
        .await
        .unwrap_err();

    assert_eq!(
        err.kind(),
        &ProviderErrorKind::Api {
            status: 503,
            message: "upstream overloaded".to_string(),
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = client_for(&server)
        .generate("prompt", "gpt-4o-mini")
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), ProviderErrorKind::ResponseParsing(_)));
}

#[tokio::test]
async fn test_no_choices_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .generate("prompt", "gpt-4o-mini")
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), ProviderErrorKind::ResponseParsing(_)));
}

#[tokio::test]
async fn test_blank_content_is_empty_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "  \n"}}]}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .generate("prompt", "gpt-4o-mini")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &ProviderErrorKind::EmptyResponse);
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let client = OpenAICompatibleClient::new(
        "test-key",
        "http://127.0.0.1:1/v1/chat/completions",
        "unreachable",
        Duration::from_secs(2),
    )
    .unwrap();

    let err = client.generate("prompt", "gpt-4o-mini").await.unwrap_err();

    assert!(matches!(
        err.kind(),
        ProviderErrorKind::Http(_) | ProviderErrorKind::Timeout(_)
    ));
}

#[cfg(feature = "api")]
#[tokio::test]
#[ignore] // Requires OPENAI_API_KEY and network access
async fn test_openai_basic_generation() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let api_key = std::env::var("OPENAI_API_KEY")?;
    let client = OpenAICompatibleClient::openai(api_key)?;

    let text = client
        .generate("Reply with the single word: hello", "gpt-4o-mini")
        .await?;

    assert!(!text.trim().is_empty());
    Ok(())
}
