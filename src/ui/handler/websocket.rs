//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::domain::ConnectionId;
use crate::infrastructure::dto::websocket::HistoryReply;

use super::dispatch::handle_request;
use crate::ui::state::AppState;

/// Accept a WebSocket upgrade. Connections are anonymous; identity is
/// proven per request by the token each envelope carries.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This is the only writer of the socket once it starts: direct replies and
/// broadcasts both arrive through the same channel, so each connection sees
/// its outbound envelopes in a single well-defined order.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::new();
    let (mut sender, mut receiver) = socket.split();

    // Register the connection and take the history snapshot
    let (tx, rx) = mpsc::unbounded_channel();
    let history = state
        .connect_client_usecase
        .execute(connection_id.clone(), tx)
        .await;

    // Replay the full history before reading any request from this
    // connection: sent directly on the sink, ahead of the pusher loop.
    let replay = HistoryReply::success(history);
    match serde_json::to_string(&replay) {
        Ok(json) => {
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                tracing::error!(
                    "Failed to send history replay to '{}': {}",
                    connection_id,
                    e
                );
                state.disconnect_client_usecase.execute(&connection_id).await;
                return;
            }
            tracing::info!("Sent history replay to '{}'", connection_id);
        }
        Err(e) => {
            tracing::error!("Failed to serialize history replay: {}", e);
            state.disconnect_client_usecase.execute(&connection_id).await;
            return;
        }
    }

    let connection_id_clone = connection_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive requests from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id_clone, text);
                    handle_request(&state_clone, &connection_id_clone, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued envelopes to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Remove the connection from the live set; no departure broadcast
    state.disconnect_client_usecase.execute(&connection_id).await;
}
