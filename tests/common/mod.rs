//! Throwaway inference backend for integration tests.

use axum::{
    Json,
    Router,
    extract::State,
    http::{ StatusCode, header::CONTENT_TYPE },
    response::{ IntoResponse, Response },
    routing::post,
};
use serde_json::Value;
use std::sync::{ Arc, Mutex };
use tokio::net::TcpListener;
use url::Url;

#[derive(Clone)]
struct FakeBackend {
    seen: Arc<Mutex<Vec<Value>>>,
    status: StatusCode,
    body: String,
}

async fn backend_chat(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
    backend.seen.lock().unwrap().push(body);
    (backend.status, [(CONTENT_TYPE, "application/json")], backend.body.clone()).into_response()
}

pub struct BackendHandle {
    pub chat_url: Url,
    seen: Arc<Mutex<Vec<Value>>>,
}

impl BackendHandle {
    /// Request bodies the backend has received, oldest first.
    pub fn seen(&self) -> Vec<Value> {
        self.seen.lock().unwrap().clone()
    }
}

/// Starts a backend on an ephemeral port that answers every `POST /chat`
/// with `status` and the raw `body`.
pub async fn spawn_backend(status: StatusCode, body: impl Into<String>) -> BackendHandle {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = FakeBackend { seen: seen.clone(), status, body: body.into() };
    let app = Router::new().route("/chat", post(backend_chat)).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    BackendHandle {
        chat_url: Url::parse(&format!("http://{}/chat", addr)).unwrap(),
        seen,
    }
}

/// A chat URL on a loopback port nobody is listening on.
pub fn closed_chat_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/chat", addr)).unwrap()
}
