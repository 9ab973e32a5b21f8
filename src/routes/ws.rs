//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "paper_wizard", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "paper_wizard", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = handle_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "paper_wizard", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "paper_wizard", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response.
async fn handle_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "paper_wizard", payload = %trunc_for_log(txt, 200), "WS received");
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip_all)]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Validate { config, step } => match do_validate(&config, step) {
      Ok(out) => ServerWsMessage::Validation(out),
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::GenerateInstructions { question_types } => ServerWsMessage::Instructions {
      instructions: do_generate_instructions(&question_types),
    },

    ClientWsMessage::StartWizard => ServerWsMessage::Wizard { wizard: start_wizard(state).await },

    ClientWsMessage::GetWizard { session_id } => match get_wizard(state, &session_id).await {
      Ok(wizard) => ServerWsMessage::Wizard { wizard },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::WizardAction { session_id, action } => {
      match apply_wizard_action(state, &session_id, action).await {
        Ok(wizard) => {
          info!(target: "wizard", session = %session_id, step = wizard.step.index(), "WS wizard action applied");
          ServerWsMessage::Wizard { wizard }
        }
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }
  }
}
