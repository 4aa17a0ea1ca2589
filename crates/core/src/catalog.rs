use thiserror::Error;

use crate::model::{Card, CardId, Difficulty, Label};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog cannot be empty")]
    Empty,

    #[error("card index {index} out of range for catalog of size {size}")]
    OutOfRange { index: usize, size: usize },
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable, indexable sequence of quiz cards.
///
/// Constructed once at process start; sessions refer to cards by
/// `CardId` (position in this sequence) and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    /// Creates a catalog from a list of cards.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` when the list is empty.
    pub fn new(cards: Vec<Card>) -> Result<Self, CatalogError> {
        if cards.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { cards })
    }

    /// Number of cards in the catalog.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    /// Looks up a card by its catalog position.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::OutOfRange` for an index outside
    /// `[0, size())`. An out-of-range id is a programmer error, not a
    /// condition a player can trigger.
    pub fn get(&self, id: CardId) -> Result<&Card, CatalogError> {
        self.cards.get(id.value()).ok_or(CatalogError::OutOfRange {
            index: id.value(),
            size: self.cards.len(),
        })
    }

    /// Ground-truth classification of the card at the given position.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::OutOfRange` for an index outside `[0, size())`.
    pub fn classification_of(&self, id: CardId) -> Result<Label, CatalogError> {
        self.get(id).map(|card| card.label)
    }

    /// Iterates over all card ids in natural catalog order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        (0..self.cards.len()).map(CardId::new)
    }

    /// Iterates over all cards in natural catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// The compiled-in "Language Myths & Facts" card table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            cards: builtin_cards(),
        }
    }
}

fn card(
    statement: &str,
    label: Label,
    explanation: &str,
    discussion: &[&str],
    difficulty: Difficulty,
) -> Card {
    Card {
        statement: statement.to_string(),
        label,
        explanation: explanation.to_string(),
        discussion: discussion.iter().map(ToString::to_string).collect(),
        difficulty,
    }
}

fn builtin_cards() -> Vec<Card> {
    vec![
        card(
            "French is the most romantic language.",
            Label::Myth,
            "'Romantic' refers to Romance languages derived from Latin, not emotional \
             qualities. The idea that French is inherently more romantic is a cultural \
             stereotype.",
            &[
                "Why do certain languages get stereotyped as 'romantic' or 'harsh'?",
                "How much does media influence our perception of languages?",
            ],
            Difficulty::Easy,
        ),
        card(
            "German has words that are impossible to translate.",
            Label::Myth,
            "Any idea can be translated, though sometimes with a phrase instead of a \
             single word. Translation is about meaning, not strict word-for-word matching.",
            &[
                "Does translation require word-for-word equivalence?",
                "Can cultural concepts be translated without losing nuance?",
            ],
            Difficulty::Medium,
        ),
        card(
            "Sanskrit is the most scientific language in the world.",
            Label::Myth,
            "All languages are systematic and rule-governed. No language is inherently \
             more scientific or superior than another.",
            &[
                "What do people usually mean by 'scientific language'?",
                "Is systematic grammar the same as scientific superiority?",
            ],
            Difficulty::Hard,
        ),
        card(
            "African American English (AAE) is 'bad English.'",
            Label::Myth,
            "AAE has consistent grammar and linguistic patterns. It is a legitimate \
             dialect, not incorrect English.",
            &[
                "Why are some dialects stigmatized?",
                "Who decides what counts as 'correct' English?",
            ],
            Difficulty::Easy,
        ),
        card(
            "Hindi and Urdu are completely different languages.",
            Label::Myth,
            "In everyday speech, Hindi and Urdu are largely mutually intelligible. They \
             differ mainly in script and formal vocabulary choices.",
            &[
                "What makes two varieties separate languages rather than dialects?",
                "Is the distinction linguistic or political?",
            ],
            Difficulty::Medium,
        ),
        card(
            "Sign language is the same everywhere in the world.",
            Label::Myth,
            "There are many different sign languages, each with its own grammar and \
             lexicon. ASL and BSL, for example, are not mutually intelligible.",
            &[
                "Why do people assume sign languages are universal?",
                "What does this reveal about misconceptions about Deaf communities?",
            ],
            Difficulty::Easy,
        ),
        card(
            "English will eventually replace all other languages.",
            Label::Myth,
            "Language survival depends on community identity, policy, and \
             intergenerational transmission. Multilingualism is the global norm.",
            &[
                "Is multilingualism the global norm?",
                "What factors actually cause language death?",
            ],
            Difficulty::Medium,
        ),
        card(
            "Shakespeare used perfect English.",
            Label::Myth,
            "Shakespeare experimented with English creatively and extensively. His \
             language reflects change and innovation, not an absolute perfect standard.",
            &[
                "Why do we treat older forms of language as 'purer'?",
                "Is there such a thing as perfect grammar?",
            ],
            Difficulty::Medium,
        ),
        card(
            "Dictionaries decide what's correct.",
            Label::Myth,
            "Most dictionaries describe actual usage patterns. They document language; \
             they do not single-handedly create it.",
            &[
                "What is the difference between prescriptive and descriptive grammar?",
                "Should dictionaries influence language use?",
            ],
            Difficulty::Easy,
        ),
        card(
            "Texting and social media are destroying language.",
            Label::Myth,
            "Digital communication has its own conventions and creativity. People \
             generally switch register effectively across informal and formal contexts.",
            &[
                "Do you change how you write in different contexts?",
                "Is informal writing a threat to formal language skills?",
            ],
            Difficulty::Easy,
        ),
        card(
            "There's only one correct English.",
            Label::Myth,
            "There are many valid Englishes globally. Standard English is one socially \
             privileged variety among many.",
            &[
                "What is Standard English?",
                "Should schools teach only one variety?",
            ],
            Difficulty::Easy,
        ),
        card(
            "Babies can distinguish all speech sounds in the world at birth.",
            Label::Fact,
            "Infants initially perceive a broad range of phonetic contrasts, then \
             specialize based on the sound patterns they hear most in their environment.",
            &[
                "Why does this ability narrow over time?",
                "What does this tell us about language acquisition?",
            ],
            Difficulty::Hard,
        ),
        card(
            "Some languages have no word for 'blue.'",
            Label::Fact,
            "Languages categorize colors differently. Some do not separate blue and \
             green into distinct basic color terms.",
            &[
                "Does language influence perception of color?",
                "How does this relate to linguistic relativity?",
            ],
            Difficulty::Hard,
        ),
        card(
            "Children today have a smaller vocabulary than previous generations.",
            Label::Myth,
            "Vocabulary changes with social and technological change. New domains create \
             new lexical knowledge rather than simply reducing it.",
            &[
                "Do digital environments create new lexical fields?",
                "How can vocabulary size be measured accurately?",
            ],
            Difficulty::Medium,
        ),
    ]
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_is_rejected() {
        let err = Catalog::new(Vec::new()).unwrap_err();
        assert_eq!(err, CatalogError::Empty);
    }

    #[test]
    fn builtin_catalog_upholds_card_invariants() {
        let catalog = Catalog::builtin();
        assert!(catalog.size() > 0);
        for card in catalog.iter() {
            // Re-validating through the checked constructor covers the
            // non-empty statement/explanation invariant for every entry.
            Card::new(
                card.statement.clone(),
                card.label,
                card.explanation.clone(),
                card.discussion.clone(),
                card.difficulty,
            )
            .unwrap();
        }
    }

    #[test]
    fn builtin_catalog_has_both_labels() {
        let catalog = Catalog::builtin();
        assert!(catalog.iter().any(|c| c.label == Label::Myth));
        assert!(catalog.iter().any(|c| c.label == Label::Fact));
    }

    #[test]
    fn get_rejects_out_of_range_index() {
        let catalog = Catalog::builtin();
        let err = catalog.get(CardId::new(catalog.size())).unwrap_err();
        assert!(matches!(err, CatalogError::OutOfRange { .. }));
    }

    #[test]
    fn classification_matches_card_label() {
        let catalog = Catalog::builtin();
        for id in catalog.ids() {
            let card = catalog.get(id).unwrap();
            assert_eq!(catalog.classification_of(id).unwrap(), card.label);
        }
    }

    #[test]
    fn ids_cover_natural_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<usize> = catalog.ids().map(|id| id.value()).collect();
        let expected: Vec<usize> = (0..catalog.size()).collect();
        assert_eq!(ids, expected);
    }
}
