//! Client message dispatch
//!
//! Maps each intent to an `AppState` action. Failures come back as
//! `ServerMessage::Error` with a stable code; the session is unchanged.

use crate::error::{GameError, GameResult};
use crate::game::impostor::ImpostorEvent;
use crate::game::taboo::TabooEvent;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use std::sync::Arc;

/// Handle a client message and return the response to send back
pub async fn handle_message(msg: ClientMessage, state: &Arc<AppState>) -> Option<ServerMessage> {
    let result = match msg {
        ClientMessage::ListCategories => Ok(state.categories()),
        ClientMessage::GetState => Ok(state.snapshot().await),
        ClientMessage::ExitToMenu => Ok(state.exit_to_menu().await),
        ClientMessage::TogglePause => state.toggle_pause().await,
        ClientMessage::Tick => state.tick().await,

        ClientMessage::StartImpostor { config } => state.start_impostor(config).await,
        ClientMessage::RevealRole => impostor(state, ImpostorEvent::Reveal).await,
        ClientMessage::NextPlayer => impostor(state, ImpostorEvent::Next).await,
        ClientMessage::CallVote => impostor(state, ImpostorEvent::CallVote).await,
        ClientMessage::CancelVote => impostor(state, ImpostorEvent::CancelVote).await,
        ClientMessage::Eliminate { player } => {
            impostor(state, ImpostorEvent::Eliminate { player }).await
        }
        ClientMessage::EndGame => impostor(state, ImpostorEvent::End).await,
        ClientMessage::ReplayImpostor => state.replay_impostor().await,

        ClientMessage::StartTaboo { config } => state.start_taboo(config).await,
        ClientMessage::BeginTurn => taboo(state, TabooEvent::BeginTurn).await,
        ClientMessage::Correct => taboo(state, TabooEvent::Correct).await,
        ClientMessage::Skip => taboo(state, TabooEvent::Skip).await,
        ClientMessage::Forbidden => taboo(state, TabooEvent::Forbidden).await,
        ClientMessage::EndTurn => taboo(state, TabooEvent::EndTurn).await,
        ClientMessage::NextRound => taboo(state, TabooEvent::NextRound).await,
    };

    Some(result.unwrap_or_else(error_message))
}

async fn impostor(state: &Arc<AppState>, event: ImpostorEvent) -> GameResult<ServerMessage> {
    state.impostor_action(event).await
}

async fn taboo(state: &Arc<AppState>, event: TabooEvent) -> GameResult<ServerMessage> {
    state.taboo_action(event).await
}

fn error_message(e: GameError) -> ServerMessage {
    tracing::debug!("Rejected: {}", e);
    ServerMessage::Error {
        code: e.code().to_string(),
        msg: e.to_string(),
    }
}
