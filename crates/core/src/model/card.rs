use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card statement cannot be empty")]
    EmptyStatement,

    #[error("card explanation cannot be empty")]
    EmptyExplanation,

    #[error("invalid label: {0:?} (expected MYTH or FACT)")]
    InvalidLabel(String),

    #[error("invalid difficulty: {0:?} (expected easy, medium or hard)")]
    InvalidDifficulty(String),
}

//
// ─── LABEL ─────────────────────────────────────────────────────────────────────
//

/// Ground-truth classification of a statement, and the type of a player's guess.
///
/// The set is closed: every card is either a myth or a fact, and every
/// guess picks one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    Myth,
    Fact,
}

impl Label {
    /// Canonical uppercase wire form, matching the card table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Myth => "MYTH",
            Label::Fact => "FACT",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MYTH" => Ok(Label::Myth),
            "FACT" => Ok(Label::Fact),
            _ => Err(CardError::InvalidLabel(s.to_string())),
        }
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty tier of a card, used only for deck filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(CardError::InvalidDifficulty(s.to_string())),
        }
    }
}

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// One quiz unit: a statement, its ground-truth label, the explanation
/// shown after reveal, and follow-up discussion prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub statement: String,
    pub label: Label,
    pub explanation: String,
    pub discussion: Vec<String>,
    pub difficulty: Difficulty,
}

impl Card {
    /// Creates a card, validating the non-empty text invariants.
    ///
    /// # Errors
    ///
    /// Returns `CardError::EmptyStatement` or `CardError::EmptyExplanation`
    /// when the respective text is blank.
    pub fn new(
        statement: impl Into<String>,
        label: Label,
        explanation: impl Into<String>,
        discussion: Vec<String>,
        difficulty: Difficulty,
    ) -> Result<Self, CardError> {
        let statement = statement.into();
        if statement.trim().is_empty() {
            return Err(CardError::EmptyStatement);
        }
        let explanation = explanation.into();
        if explanation.trim().is_empty() {
            return Err(CardError::EmptyExplanation);
        }

        Ok(Self {
            statement,
            label,
            explanation,
            discussion,
            difficulty,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
