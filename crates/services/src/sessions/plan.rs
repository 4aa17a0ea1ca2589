use rand::rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use quiz_core::Catalog;
use quiz_core::model::{Card, CardId, Difficulty};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanParseError {
    #[error("invalid card order: {0:?} (expected shuffle or in-order)")]
    InvalidOrderMode(String),

    #[error("invalid difficulty filter: {0:?} (expected all, easy, medium or hard)")]
    InvalidDifficultyFilter(String),
}

//
// ─── ORDER MODE ────────────────────────────────────────────────────────────────
//

/// Traversal order for a freshly built deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderMode {
    /// Uniform random permutation of the matching cards.
    #[default]
    Shuffle,
    /// Natural catalog order.
    InOrder,
}

impl OrderMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OrderMode::Shuffle => "shuffle",
            OrderMode::InOrder => "in-order",
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderMode {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shuffle" => Ok(OrderMode::Shuffle),
            "in-order" | "in_order" | "inorder" => Ok(OrderMode::InOrder),
            _ => Err(PlanParseError::InvalidOrderMode(s.to_string())),
        }
    }
}

//
// ─── DIFFICULTY FILTER ─────────────────────────────────────────────────────────
//

/// Restricts a deck to cards of one difficulty tier, or admits all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Returns true when the card passes the filter.
    #[must_use]
    pub fn matches(self, card: &Card) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(tier) => card.difficulty == tier,
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyFilter::All => f.write_str("all"),
            DifficultyFilter::Only(tier) => f.write_str(tier.as_str()),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(DifficultyFilter::All);
        }
        trimmed
            .parse::<Difficulty>()
            .map(DifficultyFilter::Only)
            .map_err(|_| PlanParseError::InvalidDifficultyFilter(s.to_string()))
    }
}

//
// ─── DECK PLAN ─────────────────────────────────────────────────────────────────
//

/// Builds the traversal order over catalog indices for one session pass.
pub struct DeckPlan;

impl DeckPlan {
    /// Collect the ids of catalog entries matching the filter, in catalog
    /// order, then shuffle when requested.
    ///
    /// Each matching card appears exactly once; an empty result is legal
    /// and means the session starts already complete.
    #[must_use]
    pub fn build(catalog: &Catalog, order_mode: OrderMode, filter: DifficultyFilter) -> Vec<CardId> {
        let mut deck: Vec<CardId> = catalog
            .ids()
            .zip(catalog.iter())
            .filter(|(_, card)| filter.matches(card))
            .map(|(id, _)| id)
            .collect();

        if order_mode == OrderMode::Shuffle {
            let mut rng = rng();
            deck.as_mut_slice().shuffle(&mut rng);
        }

        deck
    }

    /// A shuffled deck of exactly the missed cards from a prior pass.
    #[must_use]
    pub fn practice(missed: &BTreeSet<CardId>) -> Vec<CardId> {
        let mut deck: Vec<CardId> = missed.iter().copied().collect();
        let mut rng = rng();
        deck.as_mut_slice().shuffle(&mut rng);
        deck
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_all_is_a_permutation_of_catalog_ids() {
        let catalog = Catalog::builtin();
        let deck = DeckPlan::build(&catalog, OrderMode::Shuffle, DifficultyFilter::All);

        assert_eq!(deck.len(), catalog.size());
        let unique: BTreeSet<CardId> = deck.iter().copied().collect();
        assert_eq!(unique.len(), catalog.size());
        assert!(unique.iter().all(|id| id.value() < catalog.size()));
    }

    #[test]
    fn in_order_all_matches_natural_order() {
        let catalog = Catalog::builtin();
        let deck = DeckPlan::build(&catalog, OrderMode::InOrder, DifficultyFilter::All);
        let expected: Vec<CardId> = catalog.ids().collect();
        assert_eq!(deck, expected);
    }

    #[test]
    fn filter_keeps_only_matching_difficulty() {
        let catalog = Catalog::builtin();
        let deck = DeckPlan::build(
            &catalog,
            OrderMode::InOrder,
            DifficultyFilter::Only(Difficulty::Hard),
        );

        assert!(!deck.is_empty());
        for id in &deck {
            assert_eq!(catalog.get(*id).unwrap().difficulty, Difficulty::Hard);
        }

        let expected = catalog
            .iter()
            .filter(|c| c.difficulty == Difficulty::Hard)
            .count();
        assert_eq!(deck.len(), expected);
    }

    #[test]
    fn practice_deck_covers_exactly_the_missed_set() {
        let missed: BTreeSet<CardId> = [1, 4, 7].into_iter().map(CardId::new).collect();
        let deck = DeckPlan::practice(&missed);

        assert_eq!(deck.len(), missed.len());
        let covered: BTreeSet<CardId> = deck.into_iter().collect();
        assert_eq!(covered, missed);
    }

    #[test]
    fn order_mode_parses_both_spellings() {
        assert_eq!("shuffle".parse::<OrderMode>().unwrap(), OrderMode::Shuffle);
        assert_eq!("In-Order".parse::<OrderMode>().unwrap(), OrderMode::InOrder);
        assert!("random".parse::<OrderMode>().is_err());
    }

    #[test]
    fn difficulty_filter_parses() {
        assert_eq!(
            "all".parse::<DifficultyFilter>().unwrap(),
            DifficultyFilter::All
        );
        assert_eq!(
            "hard".parse::<DifficultyFilter>().unwrap(),
            DifficultyFilter::Only(Difficulty::Hard)
        );
        assert!("brutal".parse::<DifficultyFilter>().is_err());
    }
}
