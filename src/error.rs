use crate::types::CategoryId;

pub type GameResult<T> = Result<T, GameError>;

/// Setup validation failures. Raised before any game state is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("At least {min} players are required")]
    TooFewPlayers { min: usize },

    #[error("{required} players are required for {impostors} impostor(s)")]
    NotEnoughForImpostors { required: usize, impostors: usize },

    #[error("Impostor count must be between 1 and 3, got {0}")]
    InvalidImpostorCount(usize),

    #[error("Names cannot be empty")]
    EmptyName,

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("At least one category must be selected")]
    NoCategories,

    #[error("Cannot deselect the last category")]
    LastCategory,

    #[error("Unknown category: {0}")]
    UnknownCategory(CategoryId),

    #[error("Selected categories contain no words")]
    NoWords,

    #[error("Between {min} and {max} teams are required, got {got}")]
    TeamCount { min: usize, max: usize, got: usize },

    #[error("Maximum of {0} teams reached")]
    TooManyTeams(usize),

    #[error("At least {0} teams are required")]
    TooFewTeams(usize),

    #[error("Duration must be greater than zero")]
    InvalidDuration,

    #[error("Duration cannot exceed {max} minutes")]
    DurationTooLong { max: u32 },

    #[error("At least one round is required")]
    InvalidRounds,

    #[error("No entry at position {0}")]
    InvalidIndex(usize),
}

/// Errors returned by engine transitions and session actions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Cannot {action} during {phase}")]
    InvalidAction {
        action: &'static str,
        phase: &'static str,
    },

    #[error("Player is not active: {0}")]
    NotActive(String),

    #[error("Turn time is up")]
    TimeUp,

    #[error("No active game")]
    NoSession,

    #[error("Active game is not {0}")]
    WrongGame(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GameError {
    /// Stable error code for clients
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidAction { .. } => "INVALID_ACTION",
            GameError::NotActive(_) => "NOT_ACTIVE",
            GameError::TimeUp => "TIME_UP",
            GameError::NoSession => "NO_SESSION",
            GameError::WrongGame(_) => "WRONG_GAME",
            GameError::Config(_) => "INVALID_CONFIG",
        }
    }
}
