//! Client controller -> relay -> backend over real sockets.

mod common;

use axum::http::StatusCode;
use common::{ closed_chat_url, spawn_backend };
use std::sync::Arc;
use tokio::net::TcpListener;
use url::Url;
use vytal_chat::client::HttpRelayClient;
use vytal_chat::client::controller::{ ChatController, FALLBACK_REPLY };
use vytal_chat::client::transcript::GREETING;
use vytal_chat::models::chat::ChatTurn;
use vytal_chat::relay::BackendClient;
use vytal_chat::server::api::{ AppState, router };

async fn spawn_relay(backend_url: Url) -> Url {
    let app = router(AppState { backend: BackendClient::new(backend_url) });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{}/api/chat", addr)).unwrap()
}

fn controller_for(relay_url: Url) -> ChatController {
    ChatController::new(Arc::new(HttpRelayClient::new(relay_url)))
}

#[tokio::test]
async fn hello_round_trip() {
    let backend = spawn_backend(StatusCode::OK, r#"{"response":"Hi there"}"#).await;
    let relay_url = spawn_relay(backend.chat_url.clone()).await;
    let mut ctl = controller_for(relay_url);

    assert!(ctl.submit("Hello").await);

    assert_eq!(ctl.transcript().turns(), &[
        ChatTurn::bot(GREETING),
        ChatTurn::user("Hello"),
        ChatTurn::bot("Hi there"),
    ]);
    let seen = backend.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["message"], "Hello");
    assert_eq!(seen[0]["chat_history"], serde_json::json!([format!("Assistant: {}", GREETING)]));
}

#[tokio::test]
async fn backend_refused_yields_fallback_turn() {
    let relay_url = spawn_relay(closed_chat_url()).await;
    let mut ctl = controller_for(relay_url);

    ctl.submit("X").await;

    assert_eq!(ctl.transcript().turns(), &[
        ChatTurn::bot(GREETING),
        ChatTurn::user("X"),
        ChatTurn::bot(FALLBACK_REPLY),
    ]);
    assert!(!ctl.is_loading());
}

#[tokio::test]
async fn relay_unreachable_yields_fallback_turn() {
    let mut ctl = controller_for(closed_chat_url());

    ctl.submit("anyone there?").await;

    assert_eq!(ctl.transcript().last(), Some(&ChatTurn::bot(FALLBACK_REPLY)));
}

#[tokio::test]
async fn reply_missing_response_field_yields_fallback_turn() {
    let backend = spawn_backend(StatusCode::OK, r#"{"answer":"wrong shape"}"#).await;
    let relay_url = spawn_relay(backend.chat_url.clone()).await;
    let mut ctl = controller_for(relay_url);

    ctl.submit("hi").await;

    assert_eq!(ctl.transcript().last(), Some(&ChatTurn::bot(FALLBACK_REPLY)));
}
