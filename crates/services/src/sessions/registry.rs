use std::collections::HashMap;
use std::sync::Arc;

use quiz_core::model::{Label, SessionId, SessionSummary};
use quiz_core::{Catalog, Clock};

use super::plan::{DifficultyFilter, OrderMode};
use super::service::SessionService;
use super::view::SessionSnapshot;
use crate::error::SessionError;

/// Result of one mutating action against a registered session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionActionResult {
    /// Outcome of the guess, for actions that submit one.
    pub is_correct: Option<bool>,
    pub score: u32,
    pub streak: u32,
    pub is_complete: bool,
}

impl SessionActionResult {
    fn of(session: &SessionService, is_correct: Option<bool>) -> Self {
        Self {
            is_correct,
            score: session.score(),
            streak: session.streak(),
            is_complete: session.is_complete(),
        }
    }
}

/// Owns the live sessions of a hosting layer, keyed by `SessionId`.
///
/// Each session is only ever touched through its own key, sequentially,
/// so no finer-grained synchronization is needed: a hosting layer that
/// serves several players wraps the registry as a whole.
pub struct SessionRegistry {
    clock: Clock,
    catalog: Arc<Catalog>,
    next_id: u64,
    sessions: HashMap<SessionId, SessionService>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>) -> Self {
        Self {
            clock,
            catalog,
            next_id: 1,
            sessions: HashMap::new(),
        }
    }

    /// Convenience constructor over the compiled-in catalog.
    #[must_use]
    pub fn with_builtin_catalog(clock: Clock) -> Self {
        Self::new(clock, Arc::new(Catalog::builtin()))
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Create a fresh session and return its key.
    pub fn start(&mut self, order_mode: OrderMode, filter: DifficultyFilter) -> SessionId {
        let id = SessionId::new(self.next_id);
        self.next_id += 1;

        let session = SessionService::start(
            Arc::clone(&self.catalog),
            order_mode,
            filter,
            self.clock.now(),
        );
        self.sessions.insert(id, session);
        id
    }

    /// Submit a guess for the session's current card.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` for a missing key, otherwise
    /// whatever the underlying transition rejects with.
    pub fn submit_guess(
        &mut self,
        id: SessionId,
        choice: Label,
    ) -> Result<SessionActionResult, SessionError> {
        let now = self.clock.now();
        let session = self.get_mut(id)?;
        let is_correct = session.submit_guess(choice, now)?;
        Ok(SessionActionResult::of(session, Some(is_correct)))
    }

    /// Toggle the current card's explanation face.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` for a missing key, otherwise
    /// whatever the underlying transition rejects with.
    pub fn toggle_flip(&mut self, id: SessionId) -> Result<SessionActionResult, SessionError> {
        let session = self.get_mut(id)?;
        session.toggle_flip()?;
        Ok(SessionActionResult::of(session, None))
    }

    /// Advance the session past its current card.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` for a missing key, otherwise
    /// whatever the underlying transition rejects with.
    pub fn advance(&mut self, id: SessionId) -> Result<SessionActionResult, SessionError> {
        let now = self.clock.now();
        let session = self.get_mut(id)?;
        session.advance(now)?;
        Ok(SessionActionResult::of(session, None))
    }

    /// Rebuild the session's deck and reset its counters.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` for a missing key.
    pub fn restart(
        &mut self,
        id: SessionId,
        order_mode: OrderMode,
        filter: DifficultyFilter,
    ) -> Result<SessionActionResult, SessionError> {
        let now = self.clock.now();
        let session = self.get_mut(id)?;
        session.restart(order_mode, filter, now);
        Ok(SessionActionResult::of(session, None))
    }

    /// Start a practice pass over the session's missed cards.
    ///
    /// Returns `Ok(false)` (and leaves the session untouched) when there
    /// is nothing to practice.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` for a missing key.
    pub fn practice_missed(&mut self, id: SessionId) -> Result<bool, SessionError> {
        let now = self.clock.now();
        let session = self.get_mut(id)?;
        Ok(session.practice_missed(now))
    }

    /// Read-model snapshot for rendering.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` for a missing key.
    pub fn snapshot(&self, id: SessionId) -> Result<SessionSnapshot, SessionError> {
        let session = self.get(id)?;
        Ok(SessionSnapshot::of(session))
    }

    /// Final summary of a completed session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` for a missing key and
    /// `SessionError::InProgress` while cards remain.
    pub fn summary(&self, id: SessionId) -> Result<SessionSummary, SessionError> {
        self.get(id)?.build_summary()
    }

    /// Drop a session at the end of its sitting.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownSession` for a missing key.
    pub fn end(&mut self, id: SessionId) -> Result<(), SessionError> {
        self.sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionError::UnknownSession(id))
    }

    fn get(&self, id: SessionId) -> Result<&SessionService, SessionError> {
        self.sessions
            .get(&id)
            .ok_or(SessionError::UnknownSession(id))
    }

    fn get_mut(&mut self, id: SessionId) -> Result<&mut SessionService, SessionError> {
        self.sessions
            .get_mut(&id)
            .ok_or(SessionError::UnknownSession(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    fn registry() -> SessionRegistry {
        SessionRegistry::with_builtin_catalog(fixed_clock())
    }

    #[test]
    fn start_hands_out_distinct_keys() {
        let mut registry = registry();
        let a = registry.start(OrderMode::InOrder, DifficultyFilter::All);
        let b = registry.start(OrderMode::InOrder, DifficultyFilter::All);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn sessions_do_not_interleave() {
        let mut registry = registry();
        let a = registry.start(OrderMode::InOrder, DifficultyFilter::All);
        let b = registry.start(OrderMode::InOrder, DifficultyFilter::All);

        registry.submit_guess(a, Label::Myth).unwrap();

        let snap_a = registry.snapshot(a).unwrap();
        let snap_b = registry.snapshot(b).unwrap();
        assert!(snap_a.answered);
        assert!(!snap_b.answered);
        assert_eq!(snap_b.score, 0);
    }

    #[test]
    fn unknown_key_is_rejected_everywhere() {
        let mut registry = registry();
        let ghost = quiz_core::model::SessionId::new(999);

        assert!(matches!(
            registry.submit_guess(ghost, Label::Fact).unwrap_err(),
            SessionError::UnknownSession(_)
        ));
        assert!(matches!(
            registry.snapshot(ghost).unwrap_err(),
            SessionError::UnknownSession(_)
        ));
        assert!(matches!(
            registry.end(ghost).unwrap_err(),
            SessionError::UnknownSession(_)
        ));
    }

    #[test]
    fn ended_session_is_gone() {
        let mut registry = registry();
        let id = registry.start(OrderMode::Shuffle, DifficultyFilter::All);
        registry.end(id).unwrap();

        assert!(registry.is_empty());
        assert!(registry.snapshot(id).is_err());
    }

    #[test]
    fn action_results_carry_the_running_score() {
        let mut registry = registry();
        let id = registry.start(OrderMode::InOrder, DifficultyFilter::All);

        // Builtin card 0 is a myth.
        let result = registry.submit_guess(id, Label::Myth).unwrap();
        assert_eq!(result.is_correct, Some(true));
        assert_eq!(result.score, 1);
        assert_eq!(result.streak, 1);
        assert!(!result.is_complete);

        let flipped = registry.toggle_flip(id).unwrap();
        assert_eq!(flipped.is_correct, None);
        assert_eq!(flipped.score, 1);
    }
}
