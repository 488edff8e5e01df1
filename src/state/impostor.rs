use super::{ActiveGame, AppState};
use crate::error::{GameError, GameResult};
use crate::game::impostor::{ImpostorConfig, ImpostorEvent, ImpostorGame};
use crate::protocol::ServerMessage;

impl AppState {
    /// Start a new impostor game. A rejected config leaves the current session untouched.
    pub async fn start_impostor(&self, config: ImpostorConfig) -> GameResult<ServerMessage> {
        let started = {
            let mut rng = self.rng.lock().await;
            ImpostorGame::start(config, &self.content, &mut *rng)
        };
        let game = match started {
            Ok(game) => game.with_countdown(self.config.countdown_secs),
            Err(e) => {
                tracing::warn!("Impostor config rejected: {}", e);
                return Err(e.into());
            }
        };

        tracing::info!(
            players = game.players().len(),
            impostors = game.config().impostor_count,
            difficulty = ?game.config().difficulty,
            "Impostor game started"
        );
        Ok(self.install(ActiveGame::Impostor(game)).await)
    }

    /// Apply an event to the running impostor game and return the new view
    pub async fn impostor_action(&self, event: ImpostorEvent) -> GameResult<ServerMessage> {
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(GameError::NoSession)?;
        let ActiveGame::Impostor(game) = &mut session.game else {
            return Err(GameError::WrongGame("impostor"));
        };

        let was_resolved = game.result().is_some();
        let changed = {
            let mut rng = self.rng.lock().await;
            game.apply(event, &mut *rng)?
        };

        match event {
            ImpostorEvent::Eliminate { player } => {
                tracing::info!(
                    "{} eliminated, was {:?}",
                    game.players()[player].name,
                    game.roles()[player]
                );
            }
            ImpostorEvent::End => tracing::info!("Impostor game ended by hand"),
            _ => tracing::debug!("Impostor {:?}, now {}", event, game.phase().name()),
        }
        if let (false, Some(result)) = (was_resolved, game.result()) {
            tracing::info!(
                "Impostor game resolved: {:?} (word was {})",
                result.winner,
                result.secret_word
            );
        }

        let view = session.snapshot();
        if changed {
            self.publish(view.clone());
        }
        Ok(view)
    }

    /// Start over with the settings of the resolved game
    pub async fn replay_impostor(&self) -> GameResult<ServerMessage> {
        let carry_over = {
            let guard = self.session.read().await;
            let session = guard.as_ref().ok_or(GameError::NoSession)?;
            let ActiveGame::Impostor(game) = &session.game else {
                return Err(GameError::WrongGame("impostor"));
            };
            match game.result() {
                Some(result) => result.carry_over.clone(),
                None => {
                    return Err(GameError::InvalidAction {
                        action: "replay",
                        phase: game.phase().name(),
                    })
                }
            }
        };

        tracing::info!("Replaying impostor game");
        self.start_impostor(carry_over).await
    }
}
