use serde::Serialize;

use quiz_core::model::{Card, Difficulty, Label};

use super::progress::SessionProgress;
use super::service::SessionService;

/// Front face of the current card: everything a renderer may show
/// before the reveal.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no layout or theming assumptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardFace {
    pub statement: String,
    pub difficulty: Difficulty,
    pub discussion_count: usize,
}

impl CardFace {
    #[must_use]
    pub fn of(card: &Card) -> Self {
        Self {
            statement: card.statement.clone(),
            difficulty: card.difficulty,
            discussion_count: card.discussion.len(),
        }
    }
}

/// Back face of the current card: ground truth, explanation, prompts.
///
/// Only present in a snapshot while the card is flipped, so a renderer
/// cannot leak the answer before the player commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardBack {
    pub label: Label,
    pub explanation: String,
    pub discussion: Vec<String>,
}

impl CardBack {
    #[must_use]
    pub fn of(card: &Card) -> Self {
        Self {
            label: card.label,
            explanation: card.explanation.clone(),
            discussion: card.discussion.clone(),
        }
    }
}

/// Presentation-agnostic snapshot of a session, rebuilt after every
/// transition and handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// `None` once the deck is exhausted.
    pub card: Option<CardFace>,
    /// `None` unless the current card is flipped.
    pub back: Option<CardBack>,
    pub progress: SessionProgress,
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub answered: bool,
    pub choice: Option<Label>,
    pub last_guess_correct: Option<bool>,
    pub missed_count: usize,
    pub is_complete: bool,
}

impl SessionSnapshot {
    #[must_use]
    pub fn of(session: &SessionService) -> Self {
        let card = session.current_card().ok();
        Self {
            card: card.map(CardFace::of),
            back: card.filter(|_| session.is_flipped()).map(CardBack::of),
            progress: session.progress(),
            score: session.score(),
            streak: session.streak(),
            best_streak: session.best_streak(),
            answered: session.is_answered(),
            choice: session.choice(),
            last_guess_correct: session.last_guess_correct(),
            missed_count: session.missed().len(),
            is_complete: session.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::plan::{DifficultyFilter, OrderMode};
    use quiz_core::Catalog;
    use quiz_core::time::fixed_now;
    use std::sync::Arc;

    fn start() -> SessionService {
        SessionService::start(
            Arc::new(Catalog::builtin()),
            OrderMode::InOrder,
            DifficultyFilter::All,
            fixed_now(),
        )
    }

    #[test]
    fn snapshot_hides_back_face_until_flipped() {
        let mut session = start();
        let before = SessionSnapshot::of(&session);
        assert!(before.card.is_some());
        assert!(before.back.is_none());
        assert!(!before.answered);

        let label = session.current_card().unwrap().label;
        session.submit_guess(label, fixed_now()).unwrap();
        let answered = SessionSnapshot::of(&session);
        assert!(answered.answered);
        assert_eq!(answered.last_guess_correct, Some(true));
        assert!(answered.back.is_none());

        session.toggle_flip().unwrap();
        let flipped = SessionSnapshot::of(&session);
        let back = flipped.back.expect("back face visible after flip");
        assert_eq!(back.label, label);
        assert!(!back.explanation.is_empty());
    }

    #[test]
    fn snapshot_of_completed_session_has_no_card() {
        let mut session = start();
        while !session.is_complete() {
            session.submit_guess(Label::Myth, fixed_now()).unwrap();
            session.toggle_flip().unwrap();
            session.advance(fixed_now()).unwrap();
        }

        let snapshot = SessionSnapshot::of(&session);
        assert!(snapshot.card.is_none());
        assert!(snapshot.back.is_none());
        assert!(snapshot.is_complete);
        assert_eq!(snapshot.progress.remaining, 0);
    }
}
