use super::{ActiveGame, AppState};
use crate::error::{GameError, GameResult};
use crate::game::taboo::{TabooConfig, TabooEvent, TabooGame, TabooPhase};
use crate::protocol::ServerMessage;

impl AppState {
    /// Start a new taboo game. A rejected config leaves the current session untouched.
    pub async fn start_taboo(&self, config: TabooConfig) -> GameResult<ServerMessage> {
        let game = match TabooGame::start(config, &self.content) {
            Ok(game) => game.with_countdown(self.config.countdown_secs),
            Err(e) => {
                tracing::warn!("Taboo config rejected: {}", e);
                return Err(e.into());
            }
        };

        tracing::info!(
            teams = game.teams().len(),
            rounds = game.config().total_rounds,
            turn_secs = game.config().round_duration,
            "Taboo game started"
        );
        Ok(self.install(ActiveGame::Taboo(game)).await)
    }

    /// Apply an event to the running taboo game and return the new view
    pub async fn taboo_action(&self, event: TabooEvent) -> GameResult<ServerMessage> {
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(GameError::NoSession)?;
        let ActiveGame::Taboo(game) = &mut session.game else {
            return Err(GameError::WrongGame("taboo"));
        };

        let before = game.phase().name();
        let changed = {
            let mut rng = self.rng.lock().await;
            game.apply(event, &mut *rng)?
        };
        Self::log_taboo_transition(before, game);

        let view = session.snapshot();
        if changed {
            self.publish(view.clone());
        }
        Ok(view)
    }

    /// Log turn and round boundaries crossed by the last event
    pub(super) fn log_taboo_transition(before: &'static str, game: &TabooGame) {
        if before != "in_turn" {
            if let TabooPhase::InTurn(_) = game.phase() {
                tracing::debug!(
                    "{} starts their turn in round {}",
                    game.current_team().name,
                    game.current_round()
                );
            }
            return;
        }
        if matches!(game.phase(), TabooPhase::InTurn(_)) {
            return;
        }

        if let Some(turn) = game.last_turn() {
            tracing::info!(
                "{} turn ended: {:+} ({} correct, {} skipped, {} forbidden), total {}",
                turn.team_name,
                turn.delta,
                turn.stats.correct,
                turn.stats.skipped,
                turn.stats.forbidden,
                turn.score
            );
        }
        match game.phase() {
            TabooPhase::RoundComplete => {
                tracing::info!("Round {} complete", game.current_round())
            }
            TabooPhase::Finished => {
                if let Some(result) = game.final_result() {
                    let leader = result.teams.first().map(|t| t.name.as_str());
                    tracing::info!("Taboo game finished, leader: {:?}", leader);
                }
            }
            _ => {}
        }
    }
}
