use crate::error::GameError;
use crate::state::AppState;
use std::sync::Arc;

/// Spawn a background task that ticks the active session's clock once per period
pub fn spawn_clock(state: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(state.config.tick);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;

            match state.tick().await {
                Ok(_) | Err(GameError::NoSession) => {}
                Err(e) => tracing::error!("Clock tick failed: {}", e),
            }
        }
    })
}
