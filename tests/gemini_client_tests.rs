use book_chat::services::gemini::{GeminiClient, GenerationError, TextGenerator};

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1beta")
}

async fn echo_generate(
    Path(target): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if headers.get("x-goog-api-key").map(|v| v.as_bytes()) != Some(b"test-key".as_slice()) {
        return (StatusCode::FORBIDDEN, Json(json!({"error": {"message": "bad key"}})));
    }

    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
    let text = format!("{target} saw: {prompt}");
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        })),
    )
}

#[tokio::test]
async fn test_generate_posts_prompt_and_reads_candidate() {
    let base = spawn_upstream(Router::new().route("/v1beta/models/{target}", post(echo_generate))).await;
    let client = GeminiClient::new("test-key", "gemini-1.5-flash").with_base_url(base);

    let reply = client.generate("What genres are represented?").await.unwrap();
    assert_eq!(
        reply,
        "gemini-1.5-flash:generateContent saw: What genres are represented?"
    );
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let base = spawn_upstream(Router::new().route("/v1beta/models/{target}", post(echo_generate))).await;
    let client = GeminiClient::new("wrong-key", "gemini-1.5-flash").with_base_url(base);

    match client.generate("hello").await {
        Err(GenerationError::Status { status, body }) => {
            assert_eq!(status, reqwest::StatusCode::FORBIDDEN);
            assert!(body.contains("bad key"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let router = Router::new().route(
        "/v1beta/models/{target}",
        post(|| async { (StatusCode::OK, "<html>not json</html>") }),
    );
    let client = GeminiClient::new("test-key", "gemini-1.5-flash").with_base_url(spawn_upstream(router).await);

    let err = client.generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerationError::Decode(_)));
}

#[tokio::test]
async fn test_missing_candidates_is_empty_response() {
    let router = Router::new().route(
        "/v1beta/models/{target}",
        post(|| async { Json(json!({"promptFeedback": {"blockReason": "SAFETY"}})) }),
    );
    let client = GeminiClient::new("test-key", "gemini-1.5-flash").with_base_url(spawn_upstream(router).await);

    let err = client.generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn test_unreachable_upstream_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GeminiClient::new("test-key", "gemini-1.5-flash").with_base_url(format!("http://{addr}/v1beta"));
    let err = client.generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerationError::Request(_)));
}

#[tokio::test]
async fn test_empty_candidate_text_is_relayed() {
    let router = Router::new().route(
        "/v1beta/models/{target}",
        post(|| async { Json(json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]})) }),
    );
    let client = GeminiClient::new("test-key", "gemini-1.5-flash").with_base_url(spawn_upstream(router).await);

    let reply = client.generate("hello").await.unwrap();
    assert_eq!(reply, "");
}
