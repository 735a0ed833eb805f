//! Debounced card search.
//!
//! Every keystroke bumps a generation counter and arms a debounce timer tagged
//! with it. Only the timer (and then the response) carrying the current
//! generation is acted upon, so superseded requests never overwrite newer
//! results.

use std::time::Duration;

use crate::{error::ApiError, models::Card};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Idle,
    TooShort,
    Querying,
    Results(Vec<Card>),
    Empty,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug)]
pub struct SearchPanel {
    query: String,
    generation: u64,
    status: SearchStatus,
}

impl Default for SearchPanel {
    fn default() -> Self {
        Self {
            query: String::new(),
            generation: 0,
            status: SearchStatus::Idle,
        }
    }
}

impl SearchPanel {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// Records the new input; returns the generation the debounce timer must
    /// carry.
    pub fn on_input(&mut self, value: String) -> u64 {
        self.query = value;
        self.generation += 1;
        self.generation
    }

    /// Debounce timer fired. Yields a request only for the latest keystroke
    /// and only for queries of at least [`MIN_QUERY_CHARS`] characters.
    pub fn on_debounce_elapsed(&mut self, generation: u64) -> Option<SearchRequest> {
        if generation != self.generation {
            return None;
        }

        let query = self.query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            self.status = SearchStatus::TooShort;
            return None;
        }

        self.status = SearchStatus::Querying;
        Some(SearchRequest {
            generation,
            query: query.to_owned(),
        })
    }

    /// Applies a response; returns `false` when it belongs to a superseded
    /// request and was dropped.
    pub fn on_response(&mut self, generation: u64, result: Result<Vec<Card>, ApiError>) -> bool {
        if generation != self.generation {
            log::debug!(
                "Dropping stale search response (generation {} < {})",
                generation,
                self.generation
            );
            return false;
        }

        self.status = match result {
            Ok(cards) if cards.is_empty() => SearchStatus::Empty,
            Ok(cards) => SearchStatus::Results(cards),
            Err(e) => {
                log::error!("Search error: {}", e);
                SearchStatus::Error
            }
        };
        true
    }

    pub fn results(&self) -> &[Card] {
        match &self.status {
            SearchStatus::Results(cards) => cards,
            _ => &[],
        }
    }

    pub fn find_result(&self, card_id: &str) -> Option<&Card> {
        self.results().iter().find(|c| c.id == card_id)
    }

    /// Placeholder text for every non-result state.
    pub fn message(&self) -> Option<&'static str> {
        match self.status {
            SearchStatus::Idle | SearchStatus::Results(_) => None,
            SearchStatus::TooShort => Some("Enter at least 2 characters to search"),
            SearchStatus::Querying => Some("Searching..."),
            SearchStatus::Empty => Some("No cards found"),
            SearchStatus::Error => Some("Error searching cards. Please try again."),
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
