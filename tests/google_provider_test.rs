// tests/google_provider_test.rs — Gemini REST client against a local mock server

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use fingpt::core::classifier::TopicClassifier;
use fingpt::core::dispatcher::{DispatcherOptions, QueryDispatcher, Submission, ERROR_TEXT};
use fingpt::infra::errors::FinGptError;
use fingpt::provider::google::GoogleProvider;
use fingpt::provider::{GenerateRequest, ModelProvider};

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(String, String, Value)>>>,
}

async fn generate_content(
    State(captured): State<Captured>,
    Path(model_action): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let key = query.get("key").cloned().unwrap_or_default();
    captured
        .requests
        .lock()
        .unwrap()
        .push((model_action.clone(), key, body));

    match model_action.as_str() {
        "limited:generateContent" => StatusCode::TOO_MANY_REQUESTS.into_response(),
        "broken:generateContent" => {
            (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded").into_response()
        }
        "garbage:generateContent" => (StatusCode::OK, "not json").into_response(),
        _ => Json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Answer: Compare APYs.\nSource: https://example.org/apy" }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 20, "candidatesTokenCount": 8 }
        }))
        .into_response(),
    }
}

async fn spawn_mock() -> (SocketAddr, Captured) {
    let captured = Captured::default();
    let app = Router::new()
        .route("/v1beta/models/{model_action}", post(generate_content))
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, captured)
}

fn provider_for(addr: SocketAddr) -> GoogleProvider {
    GoogleProvider::with_base_url("test-key".into(), format!("http://{}/v1beta", addr))
}

#[tokio::test]
async fn test_generate_success() {
    let (addr, captured) = spawn_mock().await;
    let provider = provider_for(addr);

    let response = provider
        .generate(GenerateRequest::new("gemini-2.5-flash", "What is APY?"))
        .await
        .unwrap();

    assert_eq!(
        response.reply_text().as_deref(),
        Some("Answer: Compare APYs.\nSource: https://example.org/apy")
    );
    assert_eq!(response.usage.total(), 28);

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (path, key, body) = &requests[0];
    assert_eq!(path, "gemini-2.5-flash:generateContent");
    assert_eq!(key, "test-key");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "What is APY?");
}

#[tokio::test]
async fn test_rate_limited() {
    let (addr, _) = spawn_mock().await;
    let err = provider_for(addr)
        .generate(GenerateRequest::new("limited", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, FinGptError::RateLimited { .. }));
    assert!(err.is_retriable());
}

#[tokio::test]
async fn test_server_error_is_retriable_provider_error() {
    let (addr, _) = spawn_mock().await;
    let err = provider_for(addr)
        .generate(GenerateRequest::new("broken", "hi"))
        .await
        .unwrap_err();
    match err {
        FinGptError::Provider {
            message, retriable, ..
        } => {
            assert!(message.contains("500"));
            assert!(message.contains("backend exploded"));
            assert!(retriable);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_provider_error() {
    let (addr, _) = spawn_mock().await;
    let err = provider_for(addr)
        .generate(GenerateRequest::new("garbage", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FinGptError::Provider {
            retriable: false,
            ..
        }
    ));
}

#[tokio::test]
async fn test_dispatcher_end_to_end() {
    let (addr, _) = spawn_mock().await;
    let provider: Arc<dyn ModelProvider> = Arc::new(provider_for(addr));
    let options = DispatcherOptions {
        model: "gemini-2.5-flash".into(),
        gate: true,
        tts_enabled: false,
    };
    let mut d = QueryDispatcher::new(Some(provider), TopicClassifier::new(), options).unwrap();

    let submission = d.submit("Which savings account pays the most interest?").await.unwrap();
    let message = submission.message();
    assert_eq!(message.content, "Compare APYs.");
    assert_eq!(message.source.as_deref(), Some("https://example.org/apy"));
}

#[tokio::test]
async fn test_unreachable_server_yields_error_message() {
    // Bind then drop to get a port nobody is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider: Arc<dyn ModelProvider> = Arc::new(provider_for(addr));
    let options = DispatcherOptions {
        model: "gemini-2.5-flash".into(),
        gate: true,
        tts_enabled: false,
    };
    let mut d = QueryDispatcher::new(Some(provider), TopicClassifier::new(), options).unwrap();

    let submission = d.submit("Is my bank safe?").await.unwrap();
    assert!(matches!(submission, Submission::Failed(_)));
    assert_eq!(submission.message().content, ERROR_TEXT);
}
