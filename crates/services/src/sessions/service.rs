use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use quiz_core::Catalog;
use quiz_core::model::{Card, CardId, GuessLog, Label, SessionSummary};

use super::plan::{DeckPlan, DifficultyFilter, OrderMode};
use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One player's run through a deck.
///
/// Owns all mutable per-session state and enforces the legal sequencing
/// of player actions per card: guess, then flip, then advance. Every
/// transition is synchronous and total; a rejected transition returns a
/// `SessionError` and leaves the state untouched.
pub struct SessionService {
    catalog: Arc<Catalog>,
    deck: Vec<CardId>,
    cursor: usize,
    score: u32,
    streak: u32,
    best_streak: u32,
    answered: bool,
    choice: Option<Label>,
    is_correct: Option<bool>,
    flipped: bool,
    answered_at: Option<DateTime<Utc>>,
    missed: BTreeSet<CardId>,
    history: Vec<GuessLog>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionService {
    /// Start a fresh session over the catalog.
    ///
    /// An empty filtered deck is not an error: the session starts in the
    /// complete state with a final score of 0/0.
    #[must_use]
    pub fn start(
        catalog: Arc<Catalog>,
        order_mode: OrderMode,
        filter: DifficultyFilter,
        started_at: DateTime<Utc>,
    ) -> Self {
        let deck = DeckPlan::build(&catalog, order_mode, filter);
        let completed_at = deck.is_empty().then_some(started_at);

        Self {
            catalog,
            deck,
            cursor: 0,
            score: 0,
            streak: 0,
            best_streak: 0,
            answered: false,
            choice: None,
            is_correct: None,
            flipped: false,
            answered_at: None,
            missed: BTreeSet::new(),
            history: Vec::new(),
            started_at,
            completed_at,
        }
    }

    //
    // ─── READ MODEL ────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The traversal order of this pass, as catalog indices.
    #[must_use]
    pub fn deck(&self) -> &[CardId] {
        &self.deck
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Correct guesses so far. Reported out of the deck length once the
    /// session completes; out of the cursor while in progress.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// The player's guess for the current card, if submitted.
    #[must_use]
    pub fn choice(&self) -> Option<Label> {
        self.choice
    }

    /// Whether the last guess was correct; valid only while the current
    /// card is answered.
    #[must_use]
    pub fn last_guess_correct(&self) -> Option<bool> {
        self.is_correct
    }

    #[must_use]
    pub fn history(&self) -> &[GuessLog] {
        &self.history
    }

    /// Catalog indices answered incorrectly in the current pass.
    #[must_use]
    pub fn missed(&self) -> &BTreeSet<CardId> {
        &self.missed
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.deck.len()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.deck.len(),
            completed: self.cursor,
            remaining: self.deck.len().saturating_sub(self.cursor),
            is_complete: self.is_complete(),
        }
    }

    /// The card currently being played.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the deck is exhausted.
    pub fn current_card(&self) -> Result<&Card, SessionError> {
        let id = self.current_id().ok_or(SessionError::Completed)?;
        Ok(self.catalog.get(id)?)
    }

    fn current_id(&self) -> Option<CardId> {
        self.deck.get(self.cursor).copied()
    }

    /// Build the final summary for a completed pass.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InProgress` while cards remain.
    pub fn build_summary(&self) -> Result<SessionSummary, SessionError> {
        let completed_at = self.completed_at.ok_or(SessionError::InProgress)?;
        Ok(SessionSummary::from_logs(
            self.started_at,
            completed_at,
            self.best_streak,
            &self.history,
        )?)
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Submit the player's guess for the current card and lock it in.
    ///
    /// A correct guess bumps score and streak; an incorrect one resets
    /// the streak and remembers the card for practice replay. Returns
    /// whether the guess was correct.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after deck exhaustion and
    /// `SessionError::AlreadyAnswered` on a second guess for one card.
    pub fn submit_guess(
        &mut self,
        choice: Label,
        now: DateTime<Utc>,
    ) -> Result<bool, SessionError> {
        let id = self.current_id().ok_or(SessionError::Completed)?;
        if self.answered {
            return Err(SessionError::AlreadyAnswered);
        }

        let label = self.catalog.classification_of(id)?;
        let is_correct = choice == label;

        self.choice = Some(choice);
        self.is_correct = Some(is_correct);
        self.answered = true;
        self.answered_at = Some(now);

        if is_correct {
            self.score += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
            self.missed.insert(id);
        }

        Ok(is_correct)
    }

    /// Toggle the explanation face of the current card.
    ///
    /// Flipping is available only after a guess has been submitted, so
    /// the player commits before the reveal. Pure toggle; score and
    /// answer state are unaffected. Returns the new flipped value.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after deck exhaustion and
    /// `SessionError::NotAnswered` before a guess.
    pub fn toggle_flip(&mut self) -> Result<bool, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if !self.answered {
            return Err(SessionError::NotAnswered);
        }
        self.flipped = !self.flipped;
        Ok(self.flipped)
    }

    /// Move past the current card, recording it in the history.
    ///
    /// Requires a locked guess and a revealed explanation. Forcing the
    /// reveal before moving on is an intentional product rule, enforced
    /// here rather than left to button wiring in a front end.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after deck exhaustion,
    /// `SessionError::NotAnswered` before a guess, and
    /// `SessionError::NotFlipped` before the reveal.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        let id = self.current_id().ok_or(SessionError::Completed)?;
        let Some(choice) = self.choice.filter(|_| self.answered) else {
            return Err(SessionError::NotAnswered);
        };
        if !self.flipped {
            return Err(SessionError::NotFlipped);
        }

        let card = self.catalog.get(id)?;
        self.history.push(GuessLog::new(
            id,
            self.cursor,
            card.statement.clone(),
            card.label,
            choice,
            card.explanation.clone(),
            self.answered_at.unwrap_or(now),
        ));

        self.cursor += 1;
        self.reset_card_state();

        if self.cursor >= self.deck.len() {
            self.completed_at = Some(now);
        }

        Ok(())
    }

    /// Discard this pass and rebuild the deck from scratch.
    ///
    /// Always legal; resets every counter, the missed set and the history.
    pub fn restart(
        &mut self,
        order_mode: OrderMode,
        filter: DifficultyFilter,
        now: DateTime<Utc>,
    ) {
        self.deck = DeckPlan::build(&self.catalog, order_mode, filter);
        self.missed.clear();
        self.reset_pass_state(now);
    }

    /// Replay the cards missed in the prior pass, in random order.
    ///
    /// Counters reset as on restart and the missed set is cleared so the
    /// new pass accumulates its own misses. With an empty missed set this
    /// is a no-op returning `false`; callers check the return value.
    pub fn practice_missed(&mut self, now: DateTime<Utc>) -> bool {
        if self.missed.is_empty() {
            return false;
        }

        self.deck = DeckPlan::practice(&self.missed);
        self.missed.clear();
        self.reset_pass_state(now);
        true
    }

    fn reset_card_state(&mut self) {
        self.answered = false;
        self.choice = None;
        self.is_correct = None;
        self.flipped = false;
        self.answered_at = None;
    }

    fn reset_pass_state(&mut self, now: DateTime<Utc>) {
        self.cursor = 0;
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.history.clear();
        self.started_at = now;
        self.completed_at = self.deck.is_empty().then_some(now);
        self.reset_card_state();
    }
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("deck_len", &self.deck.len())
            .field("cursor", &self.cursor)
            .field("score", &self.score)
            .field("streak", &self.streak)
            .field("answered", &self.answered)
            .field("flipped", &self.flipped)
            .field("missed_len", &self.missed.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
