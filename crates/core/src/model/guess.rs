use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CardId, Label};

/// Record of one completed card within a session.
///
/// Appended to the session history when the player advances past a card,
/// and used for the end-of-session review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessLog {
    pub card_id: CardId,
    /// Position of the card within the session's deck (0-based).
    pub position: usize,
    pub statement: String,
    pub label: Label,
    pub choice: Label,
    pub is_correct: bool,
    pub explanation: String,
    pub answered_at: DateTime<Utc>,
}

impl GuessLog {
    #[must_use]
    pub fn new(
        card_id: CardId,
        position: usize,
        statement: impl Into<String>,
        label: Label,
        choice: Label,
        explanation: impl Into<String>,
        answered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            card_id,
            position,
            statement: statement.into(),
            label,
            choice,
            is_correct: choice == label,
            explanation: explanation.into(),
            answered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn log_derives_correctness_from_choice_and_label() {
        let hit = GuessLog::new(
            CardId::new(0),
            0,
            "claim",
            Label::Myth,
            Label::Myth,
            "why",
            fixed_now(),
        );
        assert!(hit.is_correct);

        let miss = GuessLog::new(
            CardId::new(1),
            1,
            "claim",
            Label::Fact,
            Label::Myth,
            "why",
            fixed_now(),
        );
        assert!(!miss.is_correct);
    }
}
