use std::cmp::Ordering;

use crate::{
    error::ApiError,
    models::{Deck, DeckCard, Validation},
};

/// Holds the single authoritative deck snapshot.
///
/// The snapshot is only ever replaced wholesale by a reload; mutations never
/// patch it locally.
#[derive(Debug, Default)]
pub struct DeckStore {
    deck_id: Option<u32>,
    current: Option<Deck>,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    pub generation: u64,
    pub deck_id: u32,
}

#[derive(Debug, PartialEq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was started after this one; result dropped.
    Stale,
    Failed(ApiError),
}

impl DeckStore {
    pub fn new(deck_id: Option<u32>) -> Self {
        Self {
            deck_id,
            ..Default::default()
        }
    }

    pub fn deck_id(&self) -> Option<u32> {
        self.deck_id
    }

    pub fn current(&self) -> Option<&Deck> {
        self.current.as_ref()
    }

    /// Starts a reload. `None` when no deck id is known.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        let deck_id = self.deck_id?;
        self.generation += 1;
        Some(LoadTicket {
            generation: self.generation,
            deck_id,
        })
    }

    pub fn finish_load(&mut self, generation: u64, result: Result<Deck, ApiError>) -> LoadOutcome {
        if generation != self.generation {
            log::debug!("Dropping stale deck load {}", generation);
            return LoadOutcome::Stale;
        }

        match result {
            Ok(deck) => {
                log::info!("Loaded deck '{}' ({} entries)", deck.name, deck.cards.len());
                self.current = Some(deck);
                LoadOutcome::Applied
            }
            Err(e) => {
                log::error!("Failed to load deck: {}", e);
                LoadOutcome::Failed(e)
            }
        }
    }

    pub fn find_card(&self, card_id: &str) -> Option<&DeckCard> {
        self.current
            .as_ref()?
            .cards
            .iter()
            .find(|dc| dc.card_id == card_id)
    }

    pub fn has_commander(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|deck| deck.cards.iter().any(|dc| dc.is_commander))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationBadge {
    pub valid: bool,
    /// Errors then warnings, one per line. Only set on invalid decks.
    pub tooltip: Option<String>,
}

impl ValidationBadge {
    fn from_validation(validation: &Validation) -> Self {
        let lines: Vec<&str> = validation
            .errors
            .iter()
            .chain(validation.warnings.iter())
            .map(String::as_str)
            .collect();

        Self {
            valid: validation.valid,
            tooltip: (!validation.valid && !lines.is_empty()).then(|| lines.join("\n")),
        }
    }

    pub fn label(&self) -> &'static str {
        if self.valid {
            "✓ Valid Deck"
        } else {
            "✗ Invalid Deck"
        }
    }
}

/// Everything the deck pane shows, computed from the snapshot alone.
#[derive(Debug)]
pub struct DeckView<'a> {
    pub name: &'a str,
    pub total_cards: u32,
    pub validation: Option<ValidationBadge>,
    pub commander: Option<&'a DeckCard>,
    /// Non-commander cards, ordered by name.
    pub cards: Vec<&'a DeckCard>,
}

impl<'a> DeckView<'a> {
    pub fn project(deck: &'a Deck) -> Self {
        let total_cards = deck.cards.iter().fold(0, |acc, dc| acc + dc.quantity);
        let commander = deck.cards.iter().find(|dc| dc.is_commander);

        let mut cards: Vec<&DeckCard> = deck.cards.iter().filter(|dc| !dc.is_commander).collect();
        cards.sort_by(|a, b| compare_names(a.name(), b.name()));

        Self {
            name: &deck.name,
            total_cards,
            validation: deck.validation.as_ref().map(ValidationBadge::from_validation),
            commander,
            cards,
        }
    }
}

/// Case-insensitive first, exact order as the tie-break.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
#[path = "deck_tests.rs"]
mod tests;
