use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use futures::{SinkExt, StreamExt};
use log::{debug, info};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::realtime::registry::ConnectionRegistry;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HubParams {
    user_id: String,
}

/// Routes for the statistics hub. Mount onto an axum server and share the
/// registry with the notifier.
pub fn router(registry: Arc<ConnectionRegistry>) -> Router {
    Router::new()
        .route("/hubs/statistics", any(statistics_hub))
        .with_state(registry)
}

async fn statistics_hub(
    ws: WebSocketUpgrade,
    Query(params): Query<HubParams>,
    State(registry): State<Arc<ConnectionRegistry>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_session(socket, registry, params.user_id))
}

/// Drains the session's queue into the socket until either side closes
async fn handle_session(socket: WebSocket, registry: Arc<ConnectionRegistry>, user_id: String) {
    let session_id = Uuid::new_v4().to_string();
    let (tx, mut rx) = mpsc::unbounded_channel();
    registry.register(&user_id, &session_id, tx);
    info!("Statistics hub session {} opened for user {}", session_id, user_id);

    let (mut sink, mut stream) = socket.split();
    loop {
        tokio::select! {
            outbound = rx.recv() => {
                let Some(message) = outbound else { break };
                match serde_json::to_string(&message) {
                    Ok(text) => {
                        if sink.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => debug!("Dropping unserializable push message: {}", e),
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Clients only listen on this hub; ignore anything they send
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    registry.unregister(&user_id, &session_id);
    info!("Statistics hub session {} closed for user {}", session_id, user_id);
}
