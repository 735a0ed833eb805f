//! Client for the deck builder REST API

mod cards;
mod client;
mod decks;

pub use client::ApiClient;

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
