mod common;

use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tokio_test::{assert_err, assert_ok};

use common::serve;
use mailwright::llm::{ChatPrompt, Completer, GroqClient, LlmError};

/// Completion endpoint that always answers with `status` and `body`.
fn canned(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        "/chat/completions",
        post(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    )
}

async fn client_for(router: Router) -> GroqClient {
    let base_url = serve(router).await;
    GroqClient::new("gsk_test".to_string(), "test-model".to_string(), base_url)
}

fn prompt() -> ChatPrompt {
    ChatPrompt::email_draft("thank the interviewer")
}

#[tokio::test]
async fn returns_first_choice_content() {
    let seen: Arc<Mutex<Option<(HeaderMap, Value)>>> = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = Some((headers, body));
                Json(serde_json::json!({
                    "choices": [{ "message": { "content": "{\"subject\":\"Hi\",\"body\":\"There\"}" } }]
                }))
            }
        }),
    );
    let client = client_for(router).await;

    let content = assert_ok!(client.complete(&prompt()).await);
    assert_eq!(content, r#"{"subject":"Hi","body":"There"}"#);

    let (headers, body) = seen.lock().unwrap().take().unwrap();
    assert_eq!(headers[header::AUTHORIZATION], "Bearer gsk_test");
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["max_tokens"], 1000);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(
        body["messages"][1]["content"],
        "Write an email based on this prompt: thank the interviewer"
    );
}

#[tokio::test]
async fn error_status_is_reported_with_body() {
    let client = client_for(canned(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":{"message":"upstream down"}}"#,
    ))
    .await;

    let err = assert_err!(client.complete(&prompt()).await);
    match err {
        LlmError::Api { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("upstream down"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn no_choices_is_empty_content() {
    let client = client_for(canned(StatusCode::OK, r#"{"choices":[]}"#)).await;

    let err = assert_err!(client.complete(&prompt()).await);
    assert!(matches!(err, LlmError::EmptyContent));
}

#[tokio::test]
async fn whitespace_content_is_empty_content() {
    let client = client_for(canned(
        StatusCode::OK,
        r#"{"choices":[{"message":{"content":"  "}}]}"#,
    ))
    .await;

    let err = assert_err!(client.complete(&prompt()).await);
    assert!(matches!(err, LlmError::EmptyContent));
}

#[tokio::test]
async fn null_content_is_empty_content() {
    let client = client_for(canned(
        StatusCode::OK,
        r#"{"choices":[{"message":{"content":null}}]}"#,
    ))
    .await;

    let err = assert_err!(client.complete(&prompt()).await);
    assert!(matches!(err, LlmError::EmptyContent));
}

#[tokio::test]
async fn undecodable_body_is_a_transport_error() {
    let client = client_for(canned(StatusCode::OK, "definitely not json")).await;

    let err = assert_err!(client.complete(&prompt()).await);
    assert!(matches!(err, LlmError::Transport(_)));
}
