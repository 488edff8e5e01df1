//! Taboo round engine
//!
//! Teams take one timed turn each per round. During a turn the describer's
//! team earns a point per guessed word and loses one per forbidden term used.
//! Words are not repeated until every word of the selected categories has
//! been shown, after which the cycle starts over.

use super::clock::{ClockView, Countdown};
use super::score::{apply_delta, leaderboard};
use crate::content::WordRepository;
use crate::error::{ConfigError, GameError, GameResult};
use crate::types::{CategoryId, TabooCard, Team, TeamId};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MIN_TEAMS: usize = 2;
pub const MAX_TEAMS: usize = 6;
/// Clock turns red at ten seconds or less
pub const TIME_LOW_SECS: u32 = 10;
pub const DEFAULT_COUNTDOWN_SECS: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabooConfig {
    pub teams: Vec<Team>,
    pub selected_categories: Vec<CategoryId>,
    /// Seconds per turn
    pub round_duration: u32,
    pub total_rounds: u32,
}

impl TabooConfig {
    pub fn validate(&self, content: &WordRepository) -> Result<(), ConfigError> {
        if !(MIN_TEAMS..=MAX_TEAMS).contains(&self.teams.len()) {
            return Err(ConfigError::TeamCount {
                min: MIN_TEAMS,
                max: MAX_TEAMS,
                got: self.teams.len(),
            });
        }

        let mut seen = HashSet::new();
        for team in &self.teams {
            let name = team.name.trim();
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
            .find(|id| !content.has_taboo_category(**id))
        {
            return Err(ConfigError::UnknownCategory(*id));
        }
        if self.round_duration == 0 {
            return Err(ConfigError::InvalidDuration);
        }
        if self.total_rounds == 0 {
            return Err(ConfigError::InvalidRounds);
        }
        if content.lookup_taboo(&self.selected_categories).is_empty() {
            return Err(ConfigError::NoWords);
        }
        Ok(())
    }
}

/// Draw a card whose word has not been shown in the current cycle.
/// Once every word has been used the cycle restarts from the full deck.
pub fn draw_card<R: Rng>(
    deck: &[TabooCard],
    used_words: &mut Vec<String>,
    rng: &mut R,
) -> Option<TabooCard> {
    let available: Vec<&TabooCard> = deck
        .iter()
        .filter(|card| !used_words.contains(&card.word))
        .collect();

    let card = match available.choose(rng) {
        Some(card) => (*card).clone(),
        None => {
            used_words.clear();
            deck.choose(rng)?.clone()
        }
    };
    used_words.push(card.word.clone());
    Some(card)
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnStats {
    pub correct: u32,
    pub skipped: u32,
    pub forbidden: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub card: TabooCard,
    /// Running points for this turn; may be negative
    pub delta: i32,
    pub clock: Countdown,
    pub stats: TurnStats,
}

/// Outcome of the most recent finished turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnSummary {
    pub team_id: TeamId,
    pub team_name: String,
    pub round: u32,
    pub delta: i32,
    /// Team total after applying the delta
    pub score: i32,
    pub stats: TurnStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabooPhase {
    /// Waiting for the team to start; `countdown` runs once they do
    PreTurn { countdown: Option<u32> },
    InTurn(Turn),
    /// Every team played this round; standings are shown
    RoundComplete,
    Finished,
}

impl TabooPhase {
    pub fn name(&self) -> &'static str {
        match self {
            TabooPhase::PreTurn { .. } => "pre_turn",
            TabooPhase::InTurn(_) => "in_turn",
            TabooPhase::RoundComplete => "round_complete",
            TabooPhase::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TabooEvent {
    BeginTurn,
    Tick,
    TogglePause,
    Correct,
    Skip,
    Forbidden,
    EndTurn,
    NextRound,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabooRoundResult {
    pub teams: Vec<Team>,
    pub current_team_index: usize,
    pub current_round: u32,
    pub total_rounds: u32,
    pub used_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabooFinalResult {
    /// Sorted by score, ties in team order
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TabooView {
    PreTurn {
        team: Team,
        round: u32,
        total_rounds: u32,
        round_duration: u32,
        countdown: Option<u32>,
        last_turn: Option<TurnSummary>,
    },
    InTurn {
        team: Team,
        round: u32,
        total_rounds: u32,
        card: TabooCard,
        delta: i32,
        clock: ClockView,
        stats: TurnStats,
    },
    Standings {
        round: u32,
        total_rounds: u32,
        rounds_left: u32,
        leaderboard: Vec<Team>,
        last_turn: Option<TurnSummary>,
    },
    Final {
        result: TabooFinalResult,
        last_turn: Option<TurnSummary>,
    },
}

#[derive(Debug, Clone)]
pub struct TabooGame {
    config: TabooConfig,
    teams: Vec<Team>,
    deck: Vec<TabooCard>,
    used_words: Vec<String>,
    current_team: usize,
    current_round: u32,
    countdown_secs: u32,
    last_turn: Option<TurnSummary>,
    phase: TabooPhase,
}

impl TabooGame {
    /// Validate the config and seat the first team of round one.
    /// Team scores start at zero whatever the config carried.
    pub fn start(config: TabooConfig, content: &WordRepository) -> Result<Self, ConfigError> {
        config.validate(content)?;

        let teams = config
            .teams
            .iter()
            .map(|t| Team::new(t.id, t.name.trim()))
            .collect();
        let deck = content.lookup_taboo(&config.selected_categories);

        Ok(Self {
            config,
            teams,
            deck,
            used_words: Vec::new(),
            current_team: 0,
            current_round: 1,
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            last_turn: None,
            phase: TabooPhase::PreTurn { countdown: None },
        })
    }

    /// Seconds of countdown before each turn
    pub fn with_countdown(mut self, seconds: u32) -> Self {
        self.countdown_secs = seconds;
        self
    }

    pub fn config(&self) -> &TabooConfig {
        &self.config
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn current_team(&self) -> &Team {
        &self.teams[self.current_team]
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    pub fn phase(&self) -> &TabooPhase {
        &self.phase
    }

    pub fn last_turn(&self) -> Option<&TurnSummary> {
        self.last_turn.as_ref()
    }

    pub fn is_final(&self) -> bool {
        self.phase == TabooPhase::Finished
    }

    /// Apply one event. Returns whether anything changed.
    pub fn apply<R: Rng>(&mut self, event: TabooEvent, rng: &mut R) -> GameResult<bool> {
        let phase = self.phase.name();
        let invalid = |action| GameError::InvalidAction { action, phase };

        match event {
            TabooEvent::BeginTurn => {
                if self.phase != (TabooPhase::PreTurn { countdown: None }) {
                    return Err(invalid("begin a turn"));
                }
                if self.countdown_secs == 0 {
                    self.start_turn(rng)?;
                } else {
                    self.phase = TabooPhase::PreTurn {
                        countdown: Some(self.countdown_secs),
                    };
                }
                Ok(true)
            }

            TabooEvent::Tick => match &mut self.phase {
                TabooPhase::PreTurn {
                    countdown: Some(remaining),
                } => {
                    *remaining = remaining.saturating_sub(1);
                    if *remaining == 0 {
                        self.start_turn(rng)?;
                    }
                    Ok(true)
                }
                TabooPhase::InTurn(turn) => {
                    let changed = turn.clock.tick();
                    if turn.clock.is_expired() {
                        self.end_turn();
                        return Ok(true);
                    }
                    Ok(changed)
                }
                _ => Ok(false),
            },

            TabooEvent::TogglePause => match &mut self.phase {
                TabooPhase::InTurn(turn) => {
                    turn.clock.toggle_pause();
                    Ok(true)
                }
                _ => Err(invalid("pause")),
            },

            TabooEvent::Correct | TabooEvent::Skip | TabooEvent::Forbidden => {
                let TabooPhase::InTurn(turn) = &mut self.phase else {
                    return Err(invalid("score a word"));
                };
                if turn.clock.is_expired() {
                    return Err(GameError::TimeUp);
                }

                // Every action consumes a word, whatever its outcome
                let card = draw_card(&self.deck, &mut self.used_words, rng)
                    .ok_or(ConfigError::NoWords)?;
                match event {
                    TabooEvent::Correct => {
                        turn.delta += 1;
                        turn.stats.correct += 1;
                    }
                    TabooEvent::Forbidden => {
                        turn.delta -= 1;
                        turn.stats.forbidden += 1;
                    }
                    _ => turn.stats.skipped += 1,
                }
                turn.card = card;
                Ok(true)
            }

            TabooEvent::EndTurn => {
                if !matches!(self.phase, TabooPhase::InTurn(_)) {
                    return Err(invalid("end the turn"));
                }
                self.end_turn();
                Ok(true)
            }

            TabooEvent::NextRound => {
                if self.phase != TabooPhase::RoundComplete {
                    return Err(invalid("start the next round"));
                }
                self.current_round += 1;
                self.current_team = 0;
                self.phase = TabooPhase::PreTurn { countdown: None };
                tracing::debug!("Starting round {}", self.current_round);
                Ok(true)
            }
        }
    }

    fn start_turn<R: Rng>(&mut self, rng: &mut R) -> GameResult<()> {
        let card =
            draw_card(&self.deck, &mut self.used_words, rng).ok_or(ConfigError::NoWords)?;
        self.phase = TabooPhase::InTurn(Turn {
            card,
            delta: 0,
            clock: Countdown::start(self.config.round_duration),
            stats: TurnStats::default(),
        });
        Ok(())
    }

    /// Bank the running delta for the current team and move to the next seat
    fn end_turn(&mut self) {
        let TabooPhase::InTurn(turn) = &self.phase else {
            return;
        };
        let (delta, stats) = (turn.delta, turn.stats);

        let team = &mut self.teams[self.current_team];
        team.score = apply_delta(team.score, delta);
        self.last_turn = Some(TurnSummary {
            team_id: team.id,
            team_name: team.name.clone(),
            round: self.current_round,
            delta,
            score: team.score,
            stats,
        });

        if self.current_team + 1 < self.teams.len() {
            self.current_team += 1;
            self.phase = TabooPhase::PreTurn { countdown: None };
        } else if self.current_round >= self.config.total_rounds {
            self.phase = TabooPhase::Finished;
        } else {
            self.phase = TabooPhase::RoundComplete;
        }
    }

    pub fn round_result(&self) -> TabooRoundResult {
        TabooRoundResult {
            teams: self.teams.clone(),
            current_team_index: self.current_team,
            current_round: self.current_round,
            total_rounds: self.config.total_rounds,
            used_words: self.used_words.clone(),
        }
    }

    pub fn final_result(&self) -> Option<TabooFinalResult> {
        self.is_final().then(|| TabooFinalResult {
            teams: leaderboard(&self.teams),
        })
    }

    pub fn view(&self) -> TabooView {
        match &self.phase {
            TabooPhase::PreTurn { countdown } => TabooView::PreTurn {
                team: self.current_team().clone(),
                round: self.current_round,
                total_rounds: self.config.total_rounds,
                round_duration: self.config.round_duration,
                countdown: *countdown,
                last_turn: self.last_turn.clone(),
            },
            TabooPhase::InTurn(turn) => TabooView::InTurn {
                team: self.current_team().clone(),
                round: self.current_round,
                total_rounds: self.config.total_rounds,
                card: turn.card.clone(),
                delta: turn.delta,
                // Inclusive threshold
                clock: turn.clock.view(TIME_LOW_SECS + 1),
                stats: turn.stats,
            },
            TabooPhase::RoundComplete => TabooView::Standings {
                round: self.current_round,
                total_rounds: self.config.total_rounds,
                rounds_left: self.config.total_rounds - self.current_round,
                leaderboard: leaderboard(&self.teams),
                last_turn: self.last_turn.clone(),
            },
            TabooPhase::Finished => TabooView::Final {
                result: TabooFinalResult {
                    teams: leaderboard(&self.teams),
                },
                last_turn: self.last_turn.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(teams: usize, rounds: u32) -> TabooConfig {
        TabooConfig {
            teams: (1..=teams as u32)
                .map(|i| Team::new(i, format!("Equipo {}", i)))
                .collect(),
            selected_categories: vec![1],
            round_duration: 60,
            total_rounds: rounds,
        }
    }

    fn card(word: &str) -> TabooCard {
        TabooCard {
            word: word.to_string(),
            forbidden: ["a", "b", "c", "d", "e"].map(String::from),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn started(teams: usize, rounds: u32) -> (TabooGame, StdRng) {
        let content = WordRepository::builtin();
        let mut rng = rng();
        let mut game = TabooGame::start(config(teams, rounds), &content)
            .unwrap()
            .with_countdown(0);
        game.apply(TabooEvent::BeginTurn, &mut rng).unwrap();
        (game, rng)
    }

    fn play_turn(game: &mut TabooGame, rng: &mut StdRng, events: &[TabooEvent]) {
        if game.phase() == &(TabooPhase::PreTurn { countdown: None }) {
            game.apply(TabooEvent::BeginTurn, rng).unwrap();
        }
        for event in events {
            game.apply(*event, rng).unwrap();
        }
        game.apply(TabooEvent::EndTurn, rng).unwrap();
    }

    #[test]
    fn test_validate_team_limits() {
        let content = WordRepository::builtin();
        assert_eq!(
            config(1, 3).validate(&content),
            Err(ConfigError::TeamCount {
                min: 2,
                max: 6,
                got: 1
            })
        );
        assert!(config(7, 3).validate(&content).is_err());
        assert!(config(6, 3).validate(&content).is_ok());
    }

    #[test]
    fn test_validate_names_and_settings() {
        let content = WordRepository::builtin();

        let mut dup = config(3, 1);
        dup.teams[2].name = "Equipo 1".to_string();
        assert_eq!(
            dup.validate(&content),
            Err(ConfigError::DuplicateName("Equipo 1".to_string()))
        );

        let mut blank = config(2, 1);
        blank.teams[0].name = "".to_string();
        assert_eq!(blank.validate(&content), Err(ConfigError::EmptyName));

        let mut none = config(2, 1);
        none.selected_categories.clear();
        assert_eq!(none.validate(&content), Err(ConfigError::NoCategories));

        assert_eq!(
            config(2, 0).validate(&content),
            Err(ConfigError::InvalidRounds)
        );

        let mut instant = config(2, 1);
        instant.round_duration = 0;
        assert_eq!(instant.validate(&content), Err(ConfigError::InvalidDuration));
    }

    #[test]
    fn test_draw_card_cycles_without_repeats() {
        let deck = vec![card("sol"), card("luna")];
        let mut used = Vec::new();
        let mut rng = rng();

        let first = draw_card(&deck, &mut used, &mut rng).unwrap();
        let second = draw_card(&deck, &mut used, &mut rng).unwrap();
        assert_ne!(first.word, second.word);
        assert_eq!(used.len(), 2);

        // Exhausted: the used set restarts with the new draw
        let third = draw_card(&deck, &mut used, &mut rng).unwrap();
        assert_eq!(used, vec![third.word.clone()]);
    }

    #[test]
    fn test_draw_card_empty_deck() {
        let mut used = Vec::new();
        assert!(draw_card(&[], &mut used, &mut rng()).is_none());
    }

    #[test]
    fn test_forbidden_floor_applies_to_total() {
        let (mut game, mut rng) = started(2, 1);
        play_turn(
            &mut game,
            &mut rng,
            &[TabooEvent::Correct, TabooEvent::Forbidden, TabooEvent::Forbidden],
        );

        let summary = game.last_turn().unwrap();
        assert_eq!(summary.delta, -1);
        assert_eq!(summary.score, 0);
        assert_eq!(game.teams()[0].score, 0);
    }

    #[test]
    fn test_running_delta_can_go_negative() {
        let (mut game, mut rng) = started(2, 1);
        game.apply(TabooEvent::Forbidden, &mut rng).unwrap();
        let TabooView::InTurn { delta, stats, .. } = game.view() else {
            panic!("Expected in-turn view");
        };
        assert_eq!(delta, -1);
        assert_eq!(stats.forbidden, 1);
    }

    #[test]
    fn test_negative_delta_reduces_positive_total() {
        let (mut game, mut rng) = started(2, 2);
        play_turn(
            &mut game,
            &mut rng,
            &[TabooEvent::Correct, TabooEvent::Correct, TabooEvent::Correct],
        );
        play_turn(&mut game, &mut rng, &[]);
        game.apply(TabooEvent::NextRound, &mut rng).unwrap();
        play_turn(
            &mut game,
            &mut rng,
            &[TabooEvent::Forbidden, TabooEvent::Skip, TabooEvent::Forbidden],
        );
        assert_eq!(game.teams()[0].score, 1);
    }

    #[test]
    fn test_every_action_consumes_a_word() {
        let (mut game, mut rng) = started(2, 1);
        assert_eq!(game.used_words().len(), 1);
        for event in [TabooEvent::Correct, TabooEvent::Skip, TabooEvent::Forbidden] {
            game.apply(event, &mut rng).unwrap();
        }
        assert_eq!(game.used_words().len(), 4);
    }

    #[test]
    fn test_round_and_game_completion() {
        let (mut game, mut rng) = started(2, 2);

        play_turn(&mut game, &mut rng, &[TabooEvent::Correct]);
        assert_eq!(game.round_result().current_team_index, 1);
        assert_eq!(game.current_round(), 1);

        play_turn(
            &mut game,
            &mut rng,
            &[TabooEvent::Correct, TabooEvent::Correct],
        );
        assert_eq!(game.phase(), &TabooPhase::RoundComplete);
        let TabooView::Standings {
            rounds_left,
            leaderboard,
            ..
        } = game.view()
        else {
            panic!("Expected standings");
        };
        assert_eq!(rounds_left, 1);
        assert_eq!(leaderboard[0].name, "Equipo 2");

        let used_before = game.used_words().to_vec();
        game.apply(TabooEvent::NextRound, &mut rng).unwrap();
        let result = game.round_result();
        assert_eq!(result.current_round, 2);
        assert_eq!(result.current_team_index, 0);
        assert_eq!(result.used_words, used_before);

        play_turn(&mut game, &mut rng, &[TabooEvent::Correct]);
        play_turn(&mut game, &mut rng, &[]);
        assert!(game.is_final());

        let final_result = game.final_result().unwrap();
        let scores: Vec<_> = final_result
            .teams
            .iter()
            .map(|t| (t.name.as_str(), t.score))
            .collect();
        // Tied at 2: input order is kept
        assert_eq!(scores, vec![("Equipo 1", 2), ("Equipo 2", 2)]);
    }

    #[test]
    fn test_timer_expiry_ends_turn() {
        let content = WordRepository::builtin();
        let mut rng = rng();
        let mut cfg = config(3, 1);
        cfg.round_duration = 5;
        let mut game = TabooGame::start(cfg, &content).unwrap();

        game.apply(TabooEvent::BeginTurn, &mut rng).unwrap();
        assert_eq!(
            game.phase(),
            &TabooPhase::PreTurn {
                countdown: Some(3)
            }
        );
        for _ in 0..3 {
            game.apply(TabooEvent::Tick, &mut rng).unwrap();
        }
        game.apply(TabooEvent::Correct, &mut rng).unwrap();

        for _ in 0..5 {
            game.apply(TabooEvent::Tick, &mut rng).unwrap();
        }
        assert_eq!(game.teams()[0].score, 1);
        assert_eq!(game.current_team().name, "Equipo 2");
        assert!(matches!(game.phase(), TabooPhase::PreTurn { countdown: None }));
    }

    #[test]
    fn test_paused_turn_does_not_expire() {
        let (mut game, mut rng) = started(2, 1);
        game.apply(TabooEvent::TogglePause, &mut rng).unwrap();
        for _ in 0..120 {
            assert!(!game.apply(TabooEvent::Tick, &mut rng).unwrap());
        }
        assert!(matches!(game.phase(), TabooPhase::InTurn(_)));
    }

    #[test]
    fn test_actions_outside_turn_are_rejected() {
        let content = WordRepository::builtin();
        let mut rng = rng();
        let mut game = TabooGame::start(config(2, 1), &content).unwrap();

        assert!(game.apply(TabooEvent::Correct, &mut rng).is_err());
        assert!(game.apply(TabooEvent::EndTurn, &mut rng).is_err());
        assert!(game.apply(TabooEvent::NextRound, &mut rng).is_err());
        assert_eq!(game.used_words().len(), 0);
    }

    #[test]
    fn test_start_resets_scores() {
        let content = WordRepository::builtin();
        let mut cfg = config(2, 1);
        cfg.teams[0].score = 9;
        let game = TabooGame::start(cfg, &content).unwrap();
        assert!(game.teams().iter().all(|t| t.score == 0));
    }
}
