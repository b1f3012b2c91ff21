//! Exercises `ReqwestChatBackend` against a loopback HTTP fixture speaking
//! the real endpoint shapes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use skiff_client::remote::{BackendError, ChatBackend, ReqwestChatBackend};
use tokio::sync::Mutex;

#[derive(Default)]
struct ServerState {
    subscriptions: Mutex<Vec<String>>,
}

#[derive(Deserialize)]
struct SendForm {
    message: String,
}

#[derive(Deserialize)]
struct SubscribeForm {
    endpoint: String,
}

async fn messages() -> Json<Value> {
    Json(json!({
        "messages": [
            { "id": 1, "text": "hello", "date": 1_700_000_000_000i64, "user": "ada" },
            { "id": 2, "text": "hi there", "date": 1_700_000_060_000i64, "user": "grace" }
        ]
    }))
}

async fn send(Form(form): Form<SendForm>) -> Result<Json<Value>, StatusCode> {
    if form.message == "boom" {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(json!({
        "id": 42u64,
        "text": form.message,
        "date": 1_700_000_120_000i64,
        "user": "me"
    })))
}

async fn subscribe(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<SubscribeForm>,
) -> StatusCode {
    state.subscriptions.lock().await.push(form.endpoint);
    StatusCode::OK
}

async fn start_fixture() -> (Arc<ServerState>, ReqwestChatBackend) {
    let state = Arc::new(ServerState::default());
    let app = Router::new()
        .route("/messages.json", get(messages))
        .route("/send", post(send))
        .route("/subscribe", post(subscribe))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let backend = ReqwestChatBackend::new(format!("http://{addr}/")).unwrap();
    (state, backend)
}

#[tokio::test]
async fn fetches_the_snapshot() {
    let (_state, backend) = start_fixture().await;

    let snapshot = backend.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].id, 1);
    assert_eq!(snapshot[0].text, "hello");
    assert_eq!(snapshot[1].user, skiff_core::UserId::from("grace"));
}

#[tokio::test]
async fn send_returns_the_canonical_message() {
    let (_state, backend) = start_fixture().await;

    let sent = backend.send_message("good morning").await.unwrap();
    assert_eq!(sent.id, 42);
    assert_eq!(sent.text, "good morning");
    assert_eq!(sent.date, 1_700_000_120_000);
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let (_state, backend) = start_fixture().await;

    let err = backend.send_message("boom").await.unwrap_err();
    match err {
        BackendError::HttpStatus(status) => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("expected an http status error, got {other}"),
    }
}

#[tokio::test]
async fn registers_the_push_endpoint() {
    let (state, backend) = start_fixture().await;

    backend
        .register_push("https://push.example/reg/abc/sub-1")
        .await
        .unwrap();

    let subscriptions = state.subscriptions.lock().await;
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0], "https://push.example/reg/abc/sub-1");
}
