//! In-process chat-completion provider
//!
//! Binds an axum server on 127.0.0.1:0 that answers
//! `POST /api/v1/chat/completions` with scripted replies and records each
//! request it receives.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;

/// One scripted provider response
#[derive(Debug, Clone)]
pub enum ProviderReply {
    /// 200 with a JSON body
    Json(Value),
    /// Non-2xx status with a plain-text body
    Status(u16, &'static str),
    /// 200 with a body that is not JSON
    Raw(&'static str),
}

/// Request as seen by the provider
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct ProviderState {
    replies: Arc<Mutex<VecDeque<ProviderReply>>>,
    repeat: Option<ProviderReply>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn chat_completions(
    State(state): State<ProviderState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let next = state.replies.lock().unwrap().pop_front();
    match next.or_else(|| state.repeat.clone()) {
        Some(ProviderReply::Json(value)) => Json(value).into_response(),
        Some(ProviderReply::Status(code, text)) => {
            (StatusCode::from_u16(code).unwrap(), text).into_response()
        }
        Some(ProviderReply::Raw(text)) => (StatusCode::OK, text).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "no scripted reply").into_response(),
    }
}

/// Start a provider; returns its base URL and the request log
///
/// `replies` are served in order, then `repeat` (if any) for every later call.
pub async fn spawn_provider(
    replies: Vec<ProviderReply>,
    repeat: Option<ProviderReply>,
) -> (String, Arc<Mutex<Vec<RecordedRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = ProviderState {
        replies: Arc::new(Mutex::new(replies.into())),
        repeat,
        requests: Arc::clone(&requests),
    };

    let app = Router::new()
        .route("/api/v1/chat/completions", post(chat_completions))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/v1", addr), requests)
}

/// Successful completion body with one choice
pub fn completion(content: &str) -> Value {
    serde_json::json!({
        "id": "gen-test",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}
