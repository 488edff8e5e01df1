//! Impostor round engine
//!
//! Flow: roles and the secret word are drawn when the game starts, then each
//! player privately reveals their card, a short countdown runs, and the table
//! plays and votes until a side wins or the game is ended by hand.

use super::clock::{ClockView, Countdown};
use crate::content::WordRepository;
use crate::error::{ConfigError, GameError, GameResult};
use crate::types::{CategoryId, Difficulty, Player, Role, SecretWord, Winner};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MIN_PLAYERS: usize = 4;
/// Non-impostors required on top of the impostors
pub const MIN_CIVILS: usize = 3;
pub const MAX_IMPOSTORS: usize = 3;
/// Longest game offered, in minutes
pub const MAX_GAME_MINUTES: u32 = 60;
/// Clock turns red below one minute
pub const TIME_LOW_SECS: u32 = 60;
pub const DEFAULT_COUNTDOWN_SECS: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImpostorConfig {
    pub players: Vec<String>,
    pub impostor_count: usize,
    pub show_hint: bool,
    pub selected_categories: Vec<CategoryId>,
    pub difficulty: Difficulty,
    /// Minutes
    pub game_duration: u32,
}

impl ImpostorConfig {
    /// Check every setup precondition against the given content
    pub fn validate(&self, content: &WordRepository) -> Result<(), ConfigError> {
        if !(1..=MAX_IMPOSTORS).contains(&self.impostor_count) {
            return Err(ConfigError::InvalidImpostorCount(self.impostor_count));
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers { min: MIN_PLAYERS });
        }
        let required = self.impostor_count + MIN_CIVILS;
        if self.players.len() < required {
            return Err(ConfigError::NotEnoughForImpostors {
                required,
                impostors: self.impostor_count,
            });
        }

        let mut seen = HashSet::new();
        for name in &self.players {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateName(name.to_string()));
            }
        }

        if self.selected_categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        if let Some(id) = self
            .selected_categories
            .iter()
            .find(|id| !content.has_impostor_category(**id))
        {
            return Err(ConfigError::UnknownCategory(*id));
        }
        if self.game_duration == 0 {
            return Err(ConfigError::InvalidDuration);
        }
        if self.game_duration > MAX_GAME_MINUTES {
            return Err(ConfigError::DurationTooLong {
                max: MAX_GAME_MINUTES,
            });
        }
        if content
            .lookup(&self.selected_categories, self.difficulty)
            .is_empty()
        {
            return Err(ConfigError::NoWords);
        }
        Ok(())
    }
}

/// Uniformly pick `impostors` distinct seats; everyone else is civil
pub fn assign_roles<R: Rng>(total: usize, impostors: usize, rng: &mut R) -> Vec<Role> {
    let mut roles = vec![Role::Civil; total];
    for index in rand::seq::index::sample(rng, total, impostors).into_iter() {
        roles[index] = Role::Impostor;
    }
    roles
}

/// Uniformly pick one word from the union of the selected categories
pub fn select_word<R: Rng>(
    content: &WordRepository,
    categories: &[CategoryId],
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<SecretWord, ConfigError> {
    content
        .lookup(categories, difficulty)
        .choose(rng)
        .cloned()
        .ok_or(ConfigError::NoWords)
}

/// Decide the game from the roles still at the table.
/// Civils win once no impostor is left; impostors win once they match the civils.
pub fn check_winner(roles: &[Role], active: &[usize]) -> Option<Winner> {
    let impostors = active
        .iter()
        .filter(|i| roles[**i] == Role::Impostor)
        .count();
    let civils = active.len() - impostors;

    if impostors == 0 {
        Some(Winner::Civil)
    } else if civils <= impostors {
        Some(Winner::Impostor)
    } else {
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Elimination {
    pub player: usize,
    pub name: String,
    pub role: Role,
}

/// Emitted once the game is resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImpostorResult {
    pub winner: Winner,
    pub secret_word: String,
    pub hint: String,
    pub players: Vec<String>,
    pub roles: Vec<Role>,
    pub eliminated_players: Vec<Elimination>,
    /// Same setup for "play again"
    pub carry_over: ImpostorConfig,
}

/// Table state while the game is being played
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub clock: Countdown,
    pub starting_speaker: usize,
    pub active: Vec<usize>,
    pub eliminated: Vec<Elimination>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpostorPhase {
    Reveal { index: usize, revealed: bool },
    Countdown { starting_speaker: usize, remaining: u32 },
    Playing(Table),
    Voting(Table),
    Resolved(ImpostorResult),
}

impl ImpostorPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ImpostorPhase::Reveal { .. } => "reveal",
            ImpostorPhase::Countdown { .. } => "countdown",
            ImpostorPhase::Playing(_) => "playing",
            ImpostorPhase::Voting(_) => "voting",
            ImpostorPhase::Resolved(_) => "resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ImpostorEvent {
    /// Uncover the current player's card
    Reveal,
    /// Hand the device to the next player
    Next,
    Tick,
    TogglePause,
    CallVote,
    CancelVote,
    Eliminate { player: usize },
    /// Stop the game without a winner
    End,
}

/// What the current player sees on their card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleCard {
    Civil { word: String },
    Impostor { hint: Option<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ImpostorView {
    Reveal {
        index: usize,
        player: String,
        total: usize,
        revealed: bool,
        /// Only present once revealed
        card: Option<RoleCard>,
        is_last: bool,
    },
    Countdown {
        starting_speaker: String,
        remaining: u32,
    },
    Playing {
        clock: ClockView,
        starting_speaker: String,
        active: Vec<Player>,
        eliminated: Vec<Elimination>,
        voting: bool,
    },
    Resolved {
        result: ImpostorResult,
    },
}

#[derive(Debug, Clone)]
pub struct ImpostorGame {
    config: ImpostorConfig,
    players: Vec<Player>,
    roles: Vec<Role>,
    secret: SecretWord,
    countdown_secs: u32,
    phase: ImpostorPhase,
}

impl ImpostorGame {
    /// Validate the config, assign roles and draw the secret word.
    ///
    /// Roles and word come from two generators forked off `rng`, so the
    /// word draw never changes who the impostors are.
    pub fn start<R: Rng>(
        config: ImpostorConfig,
        content: &WordRepository,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate(content)?;

        let mut role_rng = StdRng::from_rng(rng);
        let mut word_rng = StdRng::from_rng(rng);

        let roles = assign_roles(config.players.len(), config.impostor_count, &mut role_rng);
        let secret = select_word(
            content,
            &config.selected_categories,
            config.difficulty,
            &mut word_rng,
        )?;

        let players = config
            .players
            .iter()
            .enumerate()
            .map(|(index, name)| Player {
                index,
                name: name.trim().to_string(),
            })
            .collect();

        Ok(Self {
            config,
            players,
            roles,
            secret,
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            phase: ImpostorPhase::Reveal {
                index: 0,
                revealed: false,
            },
        })
    }

    /// Seconds of countdown between the last reveal and play
    pub fn with_countdown(mut self, seconds: u32) -> Self {
        self.countdown_secs = seconds;
        self
    }

    pub fn config(&self) -> &ImpostorConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn secret(&self) -> &SecretWord {
        &self.secret
    }

    pub fn phase(&self) -> &ImpostorPhase {
        &self.phase
    }

    pub fn result(&self) -> Option<&ImpostorResult> {
        match &self.phase {
            ImpostorPhase::Resolved(result) => Some(result),
            _ => None,
        }
    }

    /// Apply one event. Returns whether anything changed.
    /// On error the game is left exactly as it was.
    pub fn apply<R: Rng>(&mut self, event: ImpostorEvent, rng: &mut R) -> GameResult<bool> {
        let phase = self.phase.name();
        let invalid = |action| GameError::InvalidAction { action, phase };

        match event {
            ImpostorEvent::Reveal => match &mut self.phase {
                ImpostorPhase::Reveal { revealed, .. } if !*revealed => {
                    *revealed = true;
                    Ok(true)
                }
                _ => Err(invalid("reveal")),
            },

            ImpostorEvent::Next => {
                let ImpostorPhase::Reveal {
                    index,
                    revealed: true,
                } = self.phase
                else {
                    return Err(invalid("advance"));
                };

                if index + 1 < self.players.len() {
                    self.phase = ImpostorPhase::Reveal {
                        index: index + 1,
                        revealed: false,
                    };
                } else {
                    let starting_speaker = rng.random_range(0..self.players.len());
                    tracing::debug!(
                        "All roles revealed, {} starts",
                        self.players[starting_speaker].name
                    );
                    self.phase = if self.countdown_secs == 0 {
                        ImpostorPhase::Playing(self.new_table(starting_speaker))
                    } else {
                        ImpostorPhase::Countdown {
                            starting_speaker,
                            remaining: self.countdown_secs,
                        }
                    };
                }
                Ok(true)
            }

            ImpostorEvent::Tick => match &mut self.phase {
                ImpostorPhase::Countdown {
                    starting_speaker,
                    remaining,
                } => {
                    *remaining = remaining.saturating_sub(1);
                    if *remaining == 0 {
                        let speaker = *starting_speaker;
                        self.phase = ImpostorPhase::Playing(self.new_table(speaker));
                    }
                    Ok(true)
                }
                // Running out of time only flags the clock; the table keeps playing
                ImpostorPhase::Playing(table) | ImpostorPhase::Voting(table) => {
                    Ok(table.clock.tick())
                }
                _ => Ok(false),
            },

            ImpostorEvent::TogglePause => match &mut self.phase {
                ImpostorPhase::Playing(table) | ImpostorPhase::Voting(table) => {
                    table.clock.toggle_pause();
                    Ok(true)
                }
                _ => Err(invalid("pause")),
            },

            ImpostorEvent::CallVote => match &mut self.phase {
                ImpostorPhase::Playing(table) => {
                    let table = std::mem::take(table);
                    self.phase = ImpostorPhase::Voting(table);
                    Ok(true)
                }
                _ => Err(invalid("call a vote")),
            },

            ImpostorEvent::CancelVote => match &mut self.phase {
                ImpostorPhase::Voting(table) => {
                    let table = std::mem::take(table);
                    self.phase = ImpostorPhase::Playing(table);
                    Ok(true)
                }
                _ => Err(invalid("cancel a vote")),
            },

            ImpostorEvent::Eliminate { player } => {
                let ImpostorPhase::Voting(table) = &mut self.phase else {
                    return Err(invalid("eliminate"));
                };
                let Some(position) = table.active.iter().position(|i| *i == player) else {
                    let name = self
                        .players
                        .get(player)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| format!("#{}", player));
                    return Err(GameError::NotActive(name));
                };

                table.active.remove(position);
                table.eliminated.push(Elimination {
                    player,
                    name: self.players[player].name.clone(),
                    role: self.roles[player],
                });

                if let Some(winner) = check_winner(&self.roles, &table.active) {
                    let eliminated = std::mem::take(&mut table.eliminated);
                    self.phase = ImpostorPhase::Resolved(self.build_result(winner, eliminated));
                }
                Ok(true)
            }

            ImpostorEvent::End => match &mut self.phase {
                ImpostorPhase::Playing(table) | ImpostorPhase::Voting(table) => {
                    let eliminated = std::mem::take(&mut table.eliminated);
                    self.phase =
                        ImpostorPhase::Resolved(self.build_result(Winner::None, eliminated));
                    Ok(true)
                }
                _ => Err(invalid("end the game")),
            },
        }
    }

    /// Client snapshot of the current phase
    pub fn view(&self) -> ImpostorView {
        match &self.phase {
            ImpostorPhase::Reveal { index, revealed } => ImpostorView::Reveal {
                index: *index,
                player: self.players[*index].name.clone(),
                total: self.players.len(),
                revealed: *revealed,
                card: revealed.then(|| self.card_for(*index)),
                is_last: *index + 1 == self.players.len(),
            },
            ImpostorPhase::Countdown {
                starting_speaker,
                remaining,
            } => ImpostorView::Countdown {
                starting_speaker: self.players[*starting_speaker].name.clone(),
                remaining: *remaining,
            },
            ImpostorPhase::Playing(table) | ImpostorPhase::Voting(table) => {
                ImpostorView::Playing {
                    clock: table.clock.view(TIME_LOW_SECS),
                    starting_speaker: self.players[table.starting_speaker].name.clone(),
                    active: table
                        .active
                        .iter()
                        .map(|i| self.players[*i].clone())
                        .collect(),
                    eliminated: table.eliminated.clone(),
                    voting: matches!(self.phase, ImpostorPhase::Voting(_)),
                }
            }
            ImpostorPhase::Resolved(result) => ImpostorView::Resolved {
                result: result.clone(),
            },
        }
    }

    /// The card shown to one player: the word for civils, the hint (if enabled) for impostors
    pub fn card_for(&self, index: usize) -> RoleCard {
        match self.roles[index] {
            Role::Civil => RoleCard::Civil {
                word: self.secret.word.clone(),
            },
            Role::Impostor => RoleCard::Impostor {
                hint: self.config.show_hint.then(|| self.secret.hint.clone()),
            },
        }
    }

    fn new_table(&self, starting_speaker: usize) -> Table {
        Table {
            clock: Countdown::start(self.config.game_duration.saturating_mul(60)),
            starting_speaker,
            active: (0..self.players.len()).collect(),
            eliminated: Vec::new(),
        }
    }

    fn build_result(&self, winner: Winner, eliminated: Vec<Elimination>) -> ImpostorResult {
        ImpostorResult {
            winner,
            secret_word: self.secret.word.clone(),
            hint: self.secret.hint.clone(),
            players: self.players.iter().map(|p| p.name.clone()).collect(),
            roles: self.roles.clone(),
            eliminated_players: eliminated,
            carry_over: self.config.clone(),
        }
    }
}
