#![allow(dead_code)]

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use teamchat_server::{config::BroadcastScope, routes, AppState};
use tokio_tungstenite::tungstenite::Message;

pub type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Start the test app on a random TCP port and return the base URL.
pub async fn start_server() -> (String, Arc<AppState>) {
    start_server_with_scope(BroadcastScope::Global).await
}

pub async fn start_server_with_scope(scope: BroadcastScope) -> (String, Arc<AppState>) {
    let pool = super::setup_test_db().await;
    let state = super::create_test_state_with_scope(pool, scope);
    let app = routes::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base = format!("http://127.0.0.1:{}", addr.port());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    (base, state)
}

/// Connect to the gateway and consume the `connected` greeting. Returns the socket and client id.
pub async fn ws_connect(base: &str) -> (WsStream, u64) {
    let ws_url = format!("{}/gateway", base.replace("http://", "ws://"));
    let (mut ws, _) = tokio_tungstenite::connect_async(&ws_url).await.unwrap();

    let hello = recv_json(&mut ws).await.expect("no connected event");
    assert_eq!(hello["event"], "connected");
    let client_id = hello["data"]["clientId"].as_u64().unwrap();

    (ws, client_id)
}

/// Read next text message parsed as JSON, with timeout.
pub async fn recv_json(ws: &mut WsStream) -> Option<Value> {
    let timeout = tokio::time::timeout(std::time::Duration::from_secs(3), ws.next()).await;
    match timeout {
        Ok(Some(Ok(Message::Text(text)))) => serde_json::from_str(&text).ok(),
        _ => None,
    }
}

/// Drain all pending messages until timeout.
pub async fn drain_messages(ws: &mut WsStream) -> Vec<Value> {
    let mut messages = Vec::new();
    loop {
        let timeout =
            tokio::time::timeout(std::time::Duration::from_millis(200), ws.next()).await;
        match timeout {
            Ok(Some(Ok(Message::Text(text)))) => {
                if let Ok(v) = serde_json::from_str::<Value>(&text) {
                    messages.push(v);
                }
            }
            _ => break,
        }
    }
    messages
}

/// Send a JSON message over WebSocket.
pub async fn send_json(ws: &mut WsStream, value: &Value) {
    ws.send(Message::Text(serde_json::to_string(value).unwrap().into()))
        .await
        .unwrap();
}

/// Wait until the gateway has registered `count` sockets.
pub async fn wait_for_clients(state: &AppState, count: usize) {
    for _ in 0..50 {
        if state.gateway.connected_count().await >= count {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("gateway never reached {} clients", count);
}

/// Wait until `room` has `count` subscribers.
pub async fn wait_for_room(state: &AppState, room: &str, count: usize) {
    for _ in 0..50 {
        if state.gateway.room_size(room).await == count {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("room {} never reached {} subscribers", room, count);
}
