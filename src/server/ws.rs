use super::messages::ClientMessage;
use super::state::AppState;
use crate::session::SessionCoordinator;
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /ws
/// Upgrades to the persistent client connection.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(state, socket))
}

async fn handle_connection(state: AppState, socket: WebSocket) {
    let session_id = Uuid::new_v4();
    info!("Session {}: client connected", session_id);

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let coordinator = SessionCoordinator::new(
        session_id,
        state.session_config.clone(),
        Arc::clone(&state.recognizer),
        Arc::clone(&state.router),
        state.speaker.clone(),
        events_tx,
    );

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            // Coordinator events go out in emission order.
            event = events_rx.recv() => {
                let Some(event) = event else { break };
                let frame = match serde_json::to_string(&event) {
                    Ok(frame) => frame,
                    Err(e) => {
                        error!("Session {}: failed to encode event: {}", session_id, e);
                        continue;
                    }
                };
                if sink.send(Message::Text(frame)).await.is_err() {
                    break;
                }
            }

            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(payload))) => {
                        match serde_json::from_str::<ClientMessage>(&payload) {
                            Ok(message) => dispatch(&coordinator, message).await,
                            Err(e) => {
                                // Decode failure closes the connection.
                                warn!("Session {}: malformed message, closing: {}", session_id, e);
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {
                        // Ping/pong handled by axum, binary frames ignored.
                    }
                    Some(Err(e)) => {
                        warn!("Session {}: websocket error: {}", session_id, e);
                        break;
                    }
                }
            }
        }
    }

    coordinator.on_disconnect().await;
    info!("Session {}: client disconnected", session_id);
}

async fn dispatch(coordinator: &SessionCoordinator, message: ClientMessage) {
    match message {
        ClientMessage::TextCommand { command } => {
            coordinator.submit_text_command(&command).await;
        }
        ClientMessage::StartListening => coordinator.start_listening().await,
        ClientMessage::StopListening => coordinator.stop_listening(),
        ClientMessage::Unknown => {
            debug!("Session {}: ignoring unknown message type", coordinator.id());
        }
    }
}
