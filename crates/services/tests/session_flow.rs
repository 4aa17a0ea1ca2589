use std::collections::BTreeSet;

use quiz_core::model::{CardId, Label};
use quiz_core::time::fixed_clock;
use services::{DifficultyFilter, OrderMode, SessionError, SessionRegistry};

/// Drive a full pass through the builtin catalog via the registry,
/// always guessing MYTH, then replay the missed cards.
#[test]
fn registry_runs_a_full_pass_and_a_practice_pass() {
    let mut registry = SessionRegistry::with_builtin_catalog(fixed_clock());
    let catalog = registry.catalog().clone();
    let id = registry.start(OrderMode::InOrder, DifficultyFilter::All);

    let fact_ids: BTreeSet<CardId> = catalog
        .ids()
        .filter(|card_id| catalog.classification_of(*card_id).unwrap() == Label::Fact)
        .collect();
    assert!(!fact_ids.is_empty(), "builtin catalog should contain facts");

    registry.submit_guess(id, Label::Myth).unwrap();
    let last = loop {
        registry.toggle_flip(id).unwrap();
        let result = registry.advance(id).unwrap();
        if result.is_complete {
            break result;
        }
        registry.submit_guess(id, Label::Myth).unwrap();
    };

    let total = catalog.size() as u32;
    let expected_score = total - fact_ids.len() as u32;
    assert_eq!(last.score, expected_score);

    let summary = registry.summary(id).unwrap();
    assert_eq!(summary.total(), total);
    assert_eq!(summary.correct(), expected_score);
    assert_eq!(summary.missed(), fact_ids.len() as u32);

    let snapshot = registry.snapshot(id).unwrap();
    assert!(snapshot.is_complete);
    assert_eq!(snapshot.missed_count, fact_ids.len());

    // Practice pass: exactly the FACT cards come back, and guessing FACT
    // on each of them yields a clean score.
    assert!(registry.practice_missed(id).unwrap());
    let practice = registry.snapshot(id).unwrap();
    assert!(!practice.is_complete);
    assert_eq!(practice.progress.total, fact_ids.len());
    assert_eq!(practice.score, 0);

    let mut completed = false;
    while !completed {
        let result = registry.submit_guess(id, Label::Fact).unwrap();
        assert_eq!(result.is_correct, Some(true));
        registry.toggle_flip(id).unwrap();
        completed = registry.advance(id).unwrap().is_complete;
    }

    let practice_summary = registry.summary(id).unwrap();
    assert_eq!(practice_summary.total(), fact_ids.len() as u32);
    assert_eq!(practice_summary.missed(), 0);

    // A clean pass leaves nothing further to practice.
    assert!(!registry.practice_missed(id).unwrap());

    registry.end(id).unwrap();
    assert!(matches!(
        registry.snapshot(id).unwrap_err(),
        SessionError::UnknownSession(_)
    ));
}

/// The guess/flip/advance guards hold when driven through the registry.
#[test]
fn registry_surfaces_transition_guards() {
    let mut registry = SessionRegistry::with_builtin_catalog(fixed_clock());
    let id = registry.start(OrderMode::InOrder, DifficultyFilter::All);

    assert_eq!(
        registry.toggle_flip(id).unwrap_err(),
        SessionError::NotAnswered
    );
    assert_eq!(registry.advance(id).unwrap_err(), SessionError::NotAnswered);

    registry.submit_guess(id, Label::Fact).unwrap();
    assert_eq!(
        registry.submit_guess(id, Label::Myth).unwrap_err(),
        SessionError::AlreadyAnswered
    );
    assert_eq!(registry.advance(id).unwrap_err(), SessionError::NotFlipped);

    registry.toggle_flip(id).unwrap();
    registry.advance(id).unwrap();

    let snapshot = registry.snapshot(id).unwrap();
    assert_eq!(snapshot.progress.completed, 1);
    assert!(!snapshot.answered);
}
