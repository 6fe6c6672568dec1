//! Request dispatch: one inbound envelope at a time.
//!
//! The protocol is stateless per message. Every request except `signup`
//! carries a token and is authenticated independently; the connection
//! itself never remembers who it is. Exactly one branch fires per
//! envelope, selected by the `type` tag. Frames that fail to parse are
//! logged and ignored without a reply, and never affect other
//! connections.

use serde::Serialize;

use crate::domain::ConnectionId;
use crate::infrastructure::dto::websocket::{
    BroadcastMessage, ClientRequest, HistoryReply, LoginReply, MessageRejected, SignupReply,
};
use crate::ui::state::AppState;

/// Handle a single inbound text frame from `connection_id`.
pub async fn handle_request(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let request = match serde_json::from_str::<ClientRequest>(text) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(
                "Ignoring unparseable frame from '{}': {}",
                connection_id,
                e
            );
            return;
        }
    };

    match request {
        ClientRequest::Signup { username } => {
            let reply = match state.sign_up_usecase.execute(username).await {
                Ok(user) => SignupReply::success(&user.token),
                Err(e) => {
                    tracing::warn!("Signup failed: {}", e);
                    SignupReply::failure()
                }
            };
            reply_to(state, connection_id, &reply).await;
        }
        ClientRequest::Login { token } => {
            let reply = match state.log_in_usecase.execute(&token).await {
                Ok(user) => LoginReply::success(user.username),
                Err(_) => LoginReply::failure(),
            };
            reply_to(state, connection_id, &reply).await;
        }
        ClientRequest::Message { token, content } => {
            match state.send_message_usecase.execute(&token, content).await {
                Ok(message) => {
                    tracing::info!(
                        "Broadcasting message from '{}': {}",
                        message.username,
                        message.content
                    );
                    let envelope = BroadcastMessage::new(message.clone());
                    match serde_json::to_string(&envelope) {
                        Ok(json) => state.send_message_usecase.publish(message, &json).await,
                        Err(e) => tracing::error!("Failed to serialize broadcast: {}", e),
                    }
                }
                // Failure goes to the sender only, never broadcast
                Err(_) => reply_to(state, connection_id, &MessageRejected::new()).await,
            }
        }
        ClientRequest::Update { token } => {
            let reply = match state.fetch_history_usecase.execute(&token).await {
                Ok(history) => HistoryReply::success(history),
                Err(_) => HistoryReply::failure(),
            };
            reply_to(state, connection_id, &reply).await;
        }
    }
}

/// Serialize a reply envelope and push it to a single connection.
async fn reply_to<T: Serialize>(state: &AppState, connection_id: &ConnectionId, reply: &T) {
    let json = match serde_json::to_string(reply) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize reply: {}", e);
            return;
        }
    };
    if let Err(e) = state.message_pusher.push_to(connection_id, &json).await {
        tracing::warn!("Failed to reply to connection '{}': {}", connection_id, e);
    }
}
