//! Word/category repository
//!
//! Read-only themed word lists for both games. Loaded once at startup,
//! either from the built-in tables or from a JSON content pack.

mod builtin;

use crate::types::{CategoryId, CategorySummary, Difficulty, SecretWord, TabooCard, WordEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors that can occur while loading a content pack
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read content pack: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse content pack: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Impostor category with one word list per difficulty tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpostorCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub easy: Vec<WordEntry>,
    #[serde(default)]
    pub medium: Vec<WordEntry>,
    #[serde(default)]
    pub hard: Vec<WordEntry>,
}

impl ImpostorCategory {
    fn tier(&self, difficulty: Difficulty) -> &[WordEntry] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::All => &[],
        }
    }

    fn word_count(&self) -> usize {
        self.easy.len() + self.medium.len() + self.hard.len()
    }
}

fn entries(list: &[(&str, &str)]) -> Vec<WordEntry> {
    list.iter()
        .map(|(word, hint)| WordEntry {
            word: word.to_string(),
            hint: hint.to_string(),
        })
        .collect()
}

/// Taboo category: a flat list of self-contained cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabooCategory {
    pub id: CategoryId,
    pub name: String,
    pub words: Vec<TabooCard>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordRepository {
    #[serde(default)]
    pub impostor: Vec<ImpostorCategory>,
    #[serde(default)]
    pub taboo: Vec<TabooCategory>,
}

impl WordRepository {
    /// Repository backed by the tables shipped with the app
    pub fn builtin() -> Self {
        let impostor = builtin::IMPOSTOR
            .iter()
            .map(|table| ImpostorCategory {
                id: table.id,
                name: table.name.to_string(),
                easy: entries(table.easy),
                medium: entries(table.medium),
                hard: entries(table.hard),
            })
            .collect();

        let taboo = builtin::TABOO
            .iter()
            .map(|table| TabooCategory {
                id: table.id,
                name: table.name.to_string(),
                words: table
                    .cards
                    .iter()
                    .map(|(word, forbidden)| TabooCard {
                        word: word.to_string(),
                        forbidden: forbidden.map(str::to_string),
                    })
                    .collect(),
            })
            .collect();

        Self { impostor, taboo }
    }

    /// Parse a JSON content pack
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON content pack from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// All impostor words of the selected categories at the given difficulty.
    /// Categories are visited in selection order; unknown ids contribute nothing.
    pub fn lookup(&self, category_ids: &[CategoryId], difficulty: Difficulty) -> Vec<SecretWord> {
        let mut words = Vec::new();
        for id in category_ids {
            let Some(category) = self.impostor.iter().find(|c| c.id == *id) else {
                continue;
            };
            for tier in difficulty.tiers() {
                words.extend(category.tier(*tier).iter().map(|entry| SecretWord {
                    word: entry.word.clone(),
                    hint: entry.hint.clone(),
                    difficulty: *tier,
                    category: category.id,
                }));
            }
        }
        words
    }

    /// All taboo cards of the selected categories, in selection order
    pub fn lookup_taboo(&self, category_ids: &[CategoryId]) -> Vec<TabooCard> {
        category_ids
            .iter()
            .filter_map(|id| self.taboo.iter().find(|c| c.id == *id))
            .flat_map(|c| c.words.iter().cloned())
            .collect()
    }

    pub fn has_impostor_category(&self, id: CategoryId) -> bool {
        self.impostor.iter().any(|c| c.id == id)
    }

    pub fn has_taboo_category(&self, id: CategoryId) -> bool {
        self.taboo.iter().any(|c| c.id == id)
    }

    pub fn impostor_categories(&self) -> Vec<CategorySummary> {
        self.impostor
            .iter()
            .map(|c| CategorySummary {
                id: c.id,
                name: c.name.clone(),
                words: c.word_count(),
            })
            .collect()
    }

    pub fn taboo_categories(&self) -> Vec<CategorySummary> {
        self.taboo
            .iter()
            .map(|c| CategorySummary {
                id: c.id,
                name: c.name.clone(),
                words: c.words.len(),
            })
            .collect()
    }
}
