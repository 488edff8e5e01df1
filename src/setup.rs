//! Editable setup drafts
//!
//! The setup screens edit a draft freely; only `build` produces a validated
//! config that an engine will accept.
//!
//! Drafts are a library surface for front ends that own a setup screen. The
//! JSON protocol carries only built configs (`StartImpostor`/`StartTaboo`),
//! which are validated again on arrival.

use crate::content::WordRepository;
use crate::error::ConfigError;
use crate::game::impostor::{ImpostorConfig, MAX_GAME_MINUTES, MAX_IMPOSTORS, MIN_CIVILS};
use crate::game::taboo::{TabooConfig, MAX_TEAMS, MIN_TEAMS};
use crate::types::{CategoryId, Difficulty, Team, TeamId};
use serde::{Deserialize, Serialize};

/// Impostor game lengths offered, in minutes
pub const IMPOSTOR_DURATIONS: [u32; 5] = [3, 5, 7, 10, 15];
/// Taboo turn lengths offered, in seconds
pub const TABOO_DURATIONS: [u32; 4] = [30, 60, 90, 120];
pub const TABOO_ROUNDS: std::ops::RangeInclusive<u32> = 1..=8;

/// Selected category ids. Never empty once built from a non-empty list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategorySelection(Vec<CategoryId>);

impl CategorySelection {
    pub fn new(ids: Vec<CategoryId>) -> Self {
        Self(ids)
    }

    /// Add the category if absent, remove it otherwise.
    /// Removing the only selected category is refused.
    pub fn toggle(&mut self, id: CategoryId) -> Result<(), ConfigError> {
        match self.0.iter().position(|c| *c == id) {
            Some(_) if self.0.len() == 1 => Err(ConfigError::LastCategory),
            Some(pos) => {
                self.0.remove(pos);
                Ok(())
            }
            None => {
                self.0.push(id);
                Ok(())
            }
        }
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.0.contains(&id)
    }

    pub fn ids(&self) -> &[CategoryId] {
        &self.0
    }
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self(vec![1])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImpostorDraft {
    pub players: Vec<String>,
    pub impostor_count: usize,
    pub show_hint: bool,
    pub categories: CategorySelection,
    pub difficulty: Difficulty,
    pub game_duration: u32,
}

impl Default for ImpostorDraft {
    fn default() -> Self {
        Self {
            players: (1..=4).map(|i| format!("Jugador {}", i)).collect(),
            impostor_count: 1,
            show_hint: true,
            categories: CategorySelection::default(),
            difficulty: Difficulty::Easy,
            game_duration: 5,
        }
    }
}

impl ImpostorDraft {
    /// Draft pre-filled from a finished game's settings
    pub fn from_previous(config: &ImpostorConfig) -> Self {
        Self {
            players: config.players.clone(),
            impostor_count: config.impostor_count,
            show_hint: config.show_hint,
            categories: CategorySelection::new(config.selected_categories.clone()),
            difficulty: config.difficulty,
            game_duration: config.game_duration,
        }
    }

    pub fn add_player(&mut self) {
        let name = format!("Jugador {}", self.players.len() + 1);
        self.players.push(name);
    }

    /// Remove a roster entry. The last remaining entry stays.
    pub fn remove_player(&mut self, index: usize) -> Result<(), ConfigError> {
        self.check_index(index)?;
        if self.players.len() > 1 {
            self.players.remove(index);
        }
        Ok(())
    }

    pub fn rename_player(&mut self, index: usize, name: impl Into<String>) -> Result<(), ConfigError> {
        self.check_index(index)?;
        self.players[index] = name.into();
        Ok(())
    }

    /// Swap with the previous entry; no-op at the top
    pub fn move_player_up(&mut self, index: usize) -> Result<(), ConfigError> {
        self.check_index(index)?;
        if index > 0 {
            self.players.swap(index - 1, index);
        }
        Ok(())
    }

    /// Swap with the next entry; no-op at the bottom
    pub fn move_player_down(&mut self, index: usize) -> Result<(), ConfigError> {
        self.check_index(index)?;
        if index + 1 < self.players.len() {
            self.players.swap(index, index + 1);
        }
        Ok(())
    }

    pub fn set_impostor_count(&mut self, count: usize) -> Result<(), ConfigError> {
        if !(1..=MAX_IMPOSTORS).contains(&count) {
            return Err(ConfigError::InvalidImpostorCount(count));
        }
        self.impostor_count = count;
        Ok(())
    }

    pub fn toggle_category(&mut self, id: CategoryId) -> Result<(), ConfigError> {
        self.categories.toggle(id)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_game_duration(&mut self, minutes: u32) -> Result<(), ConfigError> {
        if minutes == 0 {
            return Err(ConfigError::InvalidDuration);
        }
        if minutes > MAX_GAME_MINUTES {
            return Err(ConfigError::DurationTooLong {
                max: MAX_GAME_MINUTES,
            });
        }
        self.game_duration = minutes;
        Ok(())
    }

    pub fn min_players_needed(&self) -> usize {
        self.impostor_count + MIN_CIVILS
    }

    /// One minute per named player
    pub fn recommended_duration(&self) -> u32 {
        self.named_players().count() as u32
    }

    /// Drop blank entries and validate against the content
    pub fn build(&self, content: &WordRepository) -> Result<ImpostorConfig, ConfigError> {
        let config = ImpostorConfig {
            players: self.named_players().map(str::to_string).collect(),
            impostor_count: self.impostor_count,
            show_hint: self.show_hint,
            selected_categories: self.categories.ids().to_vec(),
            difficulty: self.difficulty,
            game_duration: self.game_duration,
        };
        config.validate(content)?;
        Ok(config)
    }

    fn named_players(&self) -> impl Iterator<Item = &str> {
        self.players
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
    }

    fn check_index(&self, index: usize) -> Result<(), ConfigError> {
        if index < self.players.len() {
            Ok(())
        } else {
            Err(ConfigError::InvalidIndex(index))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabooDraft {
    pub teams: Vec<Team>,
    pub categories: CategorySelection,
    pub round_duration: u32,
    pub total_rounds: u32,
}

impl Default for TabooDraft {
    fn default() -> Self {
        Self {
            teams: vec![Team::new(1, "Equipo 1"), Team::new(2, "Equipo 2")],
            categories: CategorySelection::default(),
            round_duration: 60,
            total_rounds: 3,
        }
    }
}

impl TabooDraft {
    /// Append `Equipo N` with a fresh id. Returns the new id.
    pub fn add_team(&mut self) -> Result<TeamId, ConfigError> {
        if self.teams.len() >= MAX_TEAMS {
            return Err(ConfigError::TooManyTeams(MAX_TEAMS));
        }
        let id = self.teams.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let name = format!("Equipo {}", self.teams.len() + 1);
        self.teams.push(Team::new(id, name));
        Ok(id)
    }

    pub fn remove_team(&mut self, id: TeamId) -> Result<(), ConfigError> {
        let pos = self.position(id)?;
        if self.teams.len() <= MIN_TEAMS {
            return Err(ConfigError::TooFewTeams(MIN_TEAMS));
        }
        self.teams.remove(pos);
        Ok(())
    }

    pub fn rename_team(&mut self, id: TeamId, name: impl Into<String>) -> Result<(), ConfigError> {
        let pos = self.position(id)?;
        self.teams[pos].name = name.into();
        Ok(())
    }

    pub fn toggle_category(&mut self, id: CategoryId) -> Result<(), ConfigError> {
        self.categories.toggle(id)
    }

    pub fn set_round_duration(&mut self, seconds: u32) -> Result<(), ConfigError> {
        if seconds == 0 {
            return Err(ConfigError::InvalidDuration);
        }
        self.round_duration = seconds;
        Ok(())
    }

    pub fn set_total_rounds(&mut self, rounds: u32) -> Result<(), ConfigError> {
        if rounds == 0 {
            return Err(ConfigError::InvalidRounds);
        }
        self.total_rounds = rounds;
        Ok(())
    }

    /// Drop unnamed teams and validate what remains
    pub fn build(&self, content: &WordRepository) -> Result<TabooConfig, ConfigError> {
        let teams = self
            .teams
            .iter()
            .filter(|t| !t.name.trim().is_empty())
            .map(|t| Team::new(t.id, t.name.trim()))
            .collect();
        let config = TabooConfig {
            teams,
            selected_categories: self.categories.ids().to_vec(),
            round_duration: self.round_duration,
            total_rounds: self.total_rounds,
        };
        config.validate(content)?;
        Ok(config)
    }

    fn position(&self, id: TeamId) -> Result<usize, ConfigError> {
        self.teams
            .iter()
            .position(|t| t.id == id)
            .ok_or(ConfigError::InvalidIndex(id as usize))
    }
}
