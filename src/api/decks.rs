use serde_json::Value;

use super::ApiClient;
use crate::{
    error::ApiResult,
    models::{AddCardRequest, Deck, DeckCardUpdate, ImportRequest, ImportSummary},
};

impl ApiClient {
    /// Deck with its cards and the server-side validation result.
    pub async fn get_deck(&self, deck_id: u32) -> ApiResult<Deck> {
        self.get(&format!("/decks/{}", deck_id)).await
    }

    pub async fn add_card(&self, deck_id: u32, request: &AddCardRequest) -> ApiResult<()> {
        let _: Value = self
            .post(&format!("/decks/{}/cards", deck_id), request)
            .await?;
        Ok(())
    }

    pub async fn update_card(
        &self,
        deck_id: u32,
        card_id: &str,
        update: &DeckCardUpdate,
    ) -> ApiResult<()> {
        let _: Value = self
            .put(&deck_card_path(deck_id, card_id), update)
            .await?;
        Ok(())
    }

    pub async fn remove_card(&self, deck_id: u32, card_id: &str) -> ApiResult<()> {
        let _: Value = self.delete(&deck_card_path(deck_id, card_id)).await?;
        Ok(())
    }

    /// Adds every "{qty} {name}" line of `decklist` to the deck.
    pub async fn import_decklist(&self, deck_id: u32, decklist: &str) -> ApiResult<ImportSummary> {
        log::info!("Importing decklist into deck {}", deck_id);
        self.post(
            &format!("/decks/{}/import", deck_id),
            &ImportRequest { decklist },
        )
        .await
    }

    /// Plain-text decklist as rendered by the server.
    pub async fn export_decklist(&self, deck_id: u32) -> ApiResult<String> {
        self.get_text(&format!("/decks/{}/export", deck_id)).await
    }
}

fn deck_card_path(deck_id: u32, card_id: &str) -> String {
    format!("/decks/{}/cards/{}", deck_id, urlencoding::encode(card_id))
}
