//! Chat completion against a mock server.

#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use oaikit::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{API_KEY, client_for, json_body, single_request};

fn completion() -> serde_json::Value {
    json!({
        "id": "abc",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-x",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "hello"},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    })
}

#[tokio::test]
async fn completes_a_single_turn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", format!("Bearer {API_KEY}").as_str()))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ChatCompletionRequest::new("gpt-x", vec![ChatMessage::user("hi")]);
    let response = client.create_chat_completion(&request).await.unwrap();

    assert_eq!(response.choices[0].message.content.as_deref(), Some("hello"));
    assert_eq!(response.usage.total_tokens, 2);
    assert_eq!(response.id, "abc");

    // Only the fields that were set reach the wire.
    let sent = json_body(&single_request(&server).await);
    assert_eq!(
        sent,
        json!({"model": "gpt-x", "messages": [{"role": "user", "content": "hi"}]})
    );
}

#[tokio::test]
async fn sends_zero_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.0, "n": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion()))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatCompletionRequest::new("gpt-x", vec![ChatMessage::user("hi")])
        .temperature(0.0)
        .n(1);
    client_for(&server)
        .create_chat_completion(&request)
        .await
        .unwrap();
}

#[tokio::test]
async fn carries_full_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion()))
        .mount(&server)
        .await;

    let request = ChatCompletionRequest::new(
        "gpt-x",
        vec![
            ChatMessage::system("You are terse."),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage::user("again"),
        ],
    );
    client_for(&server)
        .create_chat_completion(&request)
        .await
        .unwrap();

    let sent = json_body(&single_request(&server).await);
    let roles: Vec<_> = sent["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["role"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(roles, ["system", "user", "assistant", "user"]);
}

#[tokio::test]
async fn sends_organization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("OpenAI-Organization", "org-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion()))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(
        ClientConfig::new(API_KEY)
            .with_base_url(server.uri())
            .with_organization("org-42"),
    )
    .unwrap();
    let request = ChatCompletionRequest::new("gpt-x", vec![ChatMessage::user("hi")]);

    client.create_chat_completion(&request).await.unwrap();
}

#[tokio::test]
async fn incompatible_body_is_a_decoding_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": "none"})))
        .mount(&server)
        .await;

    let request = ChatCompletionRequest::new("gpt-x", vec![ChatMessage::user("hi")]);
    let err = client_for(&server)
        .create_chat_completion(&request)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decoding);
    assert_eq!(err.endpoint(), Some(Endpoint::ChatCompletion));
}
