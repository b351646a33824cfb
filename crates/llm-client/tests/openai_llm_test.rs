//! Integration tests for [`llm_client::OpenAILlmClient`] against a mocked OpenAI-compatible server.
//!
//! Verifies that messages are forwarded with their roles and that the reply text is returned.

use llm_client::{EnvLlmConfig, LlmClient, OpenAILlmClient};
use prompt::ChatMessage;

const REPLY: &str = r#"{
  "id": "chatcmpl-9", "object": "chat.completion", "created": 1700000000, "model": "m",
  "choices": [{"index": 0, "message": {"role": "assistant", "content": "Running shoes are on sale."}, "finish_reason": "stop"}]
}"#;

/// **Test: system and user messages are sent in order and the reply is returned.**
#[tokio::test]
async fn forwards_messages_and_returns_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"model": "m", "messages": [{"role": "system", "content": "sys"}, {"role": "user", "content": "shoes?"}]}"#
                .to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(REPLY)
        .create_async()
        .await;

    let client = OpenAILlmClient::with_base_url("gsk_test_key".to_string(), server.url())
        .with_model("m".to_string());
    let reply = client
        .get_llm_response_with_messages(vec![ChatMessage::system("sys"), ChatMessage::user("shoes?")])
        .await
        .unwrap();

    assert_eq!(reply, "Running shoes are on sale.");
    mock.assert_async().await;
}

/// **Test: from_config wires base URL, model and key.**
#[tokio::test]
async fn from_config_uses_base_url_and_model() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"model": "custom-model"}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(REPLY)
        .create_async()
        .await;

    let config = EnvLlmConfig {
        api_key: "gsk_test_key".to_string(),
        base_url: server.url(),
        model: "custom-model".to_string(),
        ..EnvLlmConfig::default()
    };
    let client = OpenAILlmClient::from_config(&config);
    assert!(client.is_configured());
    client
        .get_llm_response_with_messages(vec![ChatMessage::user("hi")])
        .await
        .unwrap();
    mock.assert_async().await;
}
