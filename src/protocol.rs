use crate::game::impostor::{ImpostorConfig, ImpostorView};
use crate::game::taboo::{TabooConfig, TabooView};
use crate::types::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User intents coming from the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    ListCategories,
    GetState,
    ExitToMenu,
    /// Pause or resume whichever clock is running
    TogglePause,
    /// Advance the running clock by one second
    Tick,

    // Impostor
    StartImpostor {
        config: ImpostorConfig,
    },
    RevealRole,
    NextPlayer,
    CallVote,
    CancelVote,
    Eliminate {
        player: usize,
    },
    EndGame,
    /// Start again with the settings of the finished game
    ReplayImpostor,

    // Taboo
    StartTaboo {
        config: TabooConfig,
    },
    BeginTurn,
    Correct,
    Skip,
    Forbidden,
    EndTurn,
    NextRound,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Categories {
        impostor: Vec<CategorySummary>,
        taboo: Vec<CategorySummary>,
    },
    Impostor {
        session: SessionInfo,
        view: ImpostorView,
    },
    Taboo {
        session: SessionInfo,
        view: TabooView,
    },
    /// No game is running
    Menu,
    Error {
        code: String,
        msg: String,
    },
}

/// Identity of the active session, sent with every game view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_tags() {
        let msg: ClientMessage = serde_json::from_str(r#"{"t":"eliminate","player":2}"#).unwrap();
        assert_eq!(msg, ClientMessage::Eliminate { player: 2 });

        let msg: ClientMessage = serde_json::from_str(r#"{"t":"list_categories"}"#).unwrap();
        assert_eq!(msg, ClientMessage::ListCategories);
    }

    #[test]
    fn test_start_impostor_parses_config() {
        let json = r#"{
            "t": "start_impostor",
            "config": {
                "players": ["Ana", "Luis", "Eva", "Sol"],
                "impostor_count": 1,
                "show_hint": false,
                "selected_categories": [1, 2],
                "difficulty": "all",
                "game_duration": 5
            }
        }"#;
        let ClientMessage::StartImpostor { config } = serde_json::from_str(json).unwrap() else {
            panic!("Expected start_impostor");
        };
        assert_eq!(config.difficulty, Difficulty::All);
        assert!(!config.show_hint);
    }

    #[test]
    fn test_start_taboo_defaults_team_scores() {
        let json = r#"{
            "t": "start_taboo",
            "config": {
                "teams": [{"id": 1, "name": "Rojos"}, {"id": 2, "name": "Azules"}],
                "selected_categories": [1],
                "round_duration": 60,
                "total_rounds": 3
            }
        }"#;
        let ClientMessage::StartTaboo { config } = serde_json::from_str(json).unwrap() else {
            panic!("Expected start_taboo");
        };
        assert!(config.teams.iter().all(|t| t.score == 0));
    }

    #[test]
    fn test_error_serialization() {
        let msg = ServerMessage::Error {
            code: "NO_SESSION".to_string(),
            msg: "No active game".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["t"], "error");
        assert_eq!(json["code"], "NO_SESSION");
    }
}
