mod impostor;
mod taboo;

use crate::config::AppConfig;
use crate::content::WordRepository;
use crate::error::{GameError, GameResult};
use crate::game::impostor::{ImpostorEvent, ImpostorGame};
use crate::game::taboo::{TabooEvent, TabooGame};
use crate::protocol::{ServerMessage, SessionInfo};
use crate::types::SessionId;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};

/// The game being played in the active session
#[derive(Debug, Clone)]
pub enum ActiveGame {
    Impostor(ImpostorGame),
    Taboo(TabooGame),
}

/// One run of a game, from start until exit or replacement
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    pub game: ActiveGame,
}

impl Session {
    fn new(game: ActiveGame) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            started_at: Utc::now(),
            game,
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id.clone(),
            started_at: self.started_at,
        }
    }

    /// Current view of this session
    pub fn snapshot(&self) -> ServerMessage {
        match &self.game {
            ActiveGame::Impostor(game) => ServerMessage::Impostor {
                session: self.info(),
                view: game.view(),
            },
            ActiveGame::Taboo(game) => ServerMessage::Taboo {
                session: self.info(),
                view: game.view(),
            },
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<WordRepository>,
    pub config: AppConfig,
    pub session: Arc<RwLock<Option<Session>>>,
    rng: Arc<Mutex<StdRng>>,
    /// Every view change is published here for display clients
    pub updates: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new(config: AppConfig, content: WordRepository) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (tx, _rx) = broadcast::channel(100);
        Self {
            content: Arc::new(content),
            config,
            session: Arc::new(RwLock::new(None)),
            rng: Arc::new(Mutex::new(rng)),
            updates: tx,
        }
    }

    /// Publish a view to subscribers
    pub fn publish(&self, msg: ServerMessage) {
        // No subscribers is fine
        let _ = self.updates.send(msg);
    }

    pub async fn get_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Current view, or the menu when nothing is running
    pub async fn snapshot(&self) -> ServerMessage {
        match self.session.read().await.as_ref() {
            Some(session) => session.snapshot(),
            None => ServerMessage::Menu,
        }
    }

    pub fn categories(&self) -> ServerMessage {
        ServerMessage::Categories {
            impostor: self.content.impostor_categories(),
            taboo: self.content.taboo_categories(),
        }
    }

    /// Drop the active session and return to the menu
    pub async fn exit_to_menu(&self) -> ServerMessage {
        if let Some(session) = self.session.write().await.take() {
            tracing::info!("Session {} closed", session.id);
        }
        self.publish(ServerMessage::Menu);
        ServerMessage::Menu
    }

    /// Advance the running clock of the active session by one second.
    /// Publishes only when something visibly changed.
    pub async fn tick(&self) -> GameResult<ServerMessage> {
        let mut guard = self.session.write().await;
        let session = guard.as_mut().ok_or(GameError::NoSession)?;
        let mut rng = self.rng.lock().await;

        let changed = match &mut session.game {
            ActiveGame::Impostor(game) => game.apply(ImpostorEvent::Tick, &mut *rng)?,
            ActiveGame::Taboo(game) => {
                let before = game.phase().name();
                let changed = game.apply(TabooEvent::Tick, &mut *rng)?;
                Self::log_taboo_transition(before, game);
                changed
            }
        };

        let view = session.snapshot();
        if changed {
            self.publish(view.clone());
        }
        Ok(view)
    }

    /// Pause or resume the clock of whichever game is running
    pub async fn toggle_pause(&self) -> GameResult<ServerMessage> {
        let is_impostor = match self.session.read().await.as_ref() {
            Some(session) => matches!(session.game, ActiveGame::Impostor(_)),
            None => return Err(GameError::NoSession),
        };
        if is_impostor {
            self.impostor_action(ImpostorEvent::TogglePause).await
        } else {
            self.taboo_action(TabooEvent::TogglePause).await
        }
    }

    /// Replace the active session with a freshly started game
    async fn install(&self, game: ActiveGame) -> ServerMessage {
        let session = Session::new(game);
        let view = session.snapshot();
        if let Some(previous) = self.session.write().await.replace(session) {
            tracing::debug!("Session {} replaced", previous.id);
        }
        self.publish(view.clone());
        view
    }
}
