use serde::{Deserialize, Serialize};

/// Opaque ID types
pub type CategoryId = u32;
pub type TeamId = u32;
pub type SessionId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    /// Every tier of the selected categories
    All,
}

impl Difficulty {
    /// Concrete word tiers covered by this selection
    pub fn tiers(self) -> &'static [Difficulty] {
        match self {
            Difficulty::Easy => &[Difficulty::Easy],
            Difficulty::Medium => &[Difficulty::Medium],
            Difficulty::Hard => &[Difficulty::Hard],
            Difficulty::All => &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Civil,
    Impostor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
    Civil,
    Impostor,
    /// Game ended manually
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub score: i32,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
        }
    }
}

/// A single impostor word as stored in a category tier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub hint: String,
}

/// The word drawn for one impostor game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretWord {
    pub word: String,
    pub hint: String,
    pub difficulty: Difficulty,
    pub category: CategoryId,
}

/// A taboo card: the word to describe and the five terms that may not be said
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabooCard {
    pub word: String,
    pub forbidden: [String; 5],
}

/// Category listing for the pickers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub words: usize,
}
