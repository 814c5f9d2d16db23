use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::ws::events::{ClientEvent, ServerEvent};
use crate::ws::gateway::ClientId;
use crate::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let client_id = state.gateway.next_client_id().await;
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    state.gateway.register(client_id, tx).await;
    tracing::info!("Socket connected: {}", client_id);

    state
        .gateway
        .send_to(client_id, &ServerEvent::Connected { client_id })
        .await;

    // Forward queued frames from the gateway to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_tx.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_rx.next().await {
            match msg {
                Message::Text(text) => {
                    let text_str: &str = &text;
                    match serde_json::from_str::<ClientEvent>(text_str) {
                        Ok(event) => handle_client_event(&state_clone, client_id, event).await,
                        Err(e) => {
                            tracing::debug!("Malformed frame from client {}: {}", client_id, e);
                            state_clone
                                .gateway
                                .send_to(
                                    client_id,
                                    &ServerEvent::Error {
                                        message: format!("Unrecognised event: {}", e),
                                    },
                                )
                                .await;
                        }
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.gateway.unregister(client_id).await;
    tracing::info!("Socket disconnected: {}", client_id);
}

async fn handle_client_event(state: &AppState, client_id: ClientId, event: ClientEvent) {
    match event {
        ClientEvent::JoinWorkspace(room) => {
            if state.gateway.join_room(client_id, &room).await {
                tracing::debug!(
                    "Client {} joined room {} ({} subscribers)",
                    client_id,
                    room,
                    state.gateway.room_size(&room).await
                );
            }
        }
        ClientEvent::LeaveWorkspace(room) => {
            state.gateway.leave_room(client_id, &room).await;
        }
        ClientEvent::Typing(payload) => {
            state
                .gateway
                .broadcast_all(&ServerEvent::UserTyping(payload), Some(client_id))
                .await;
        }
        ClientEvent::Ping => {}
    }
}
