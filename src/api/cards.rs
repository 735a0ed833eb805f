use super::ApiClient;
use crate::{
    error::ApiResult,
    models::{Card, Printing, PrintingsResponse, SearchResponse},
};

impl ApiClient {
    /// Free-text card search.
    pub async fn search_cards(&self, query: &str) -> ApiResult<SearchResponse> {
        log::info!("Searching cards for '{}'", query);
        self.get(&format!("/cards/search?q={}", urlencoding::encode(query)))
            .await
    }

    pub async fn get_card(&self, card_id: &str) -> ApiResult<Card> {
        self.get(&format!("/cards/{}", urlencoding::encode(card_id)))
            .await
    }

    /// All printings sharing `card_name`.
    pub async fn get_printings(&self, card_name: &str) -> ApiResult<Vec<Printing>> {
        let response: PrintingsResponse = self
            .get(&format!(
                "/cards/{}/printings",
                urlencoding::encode(card_name)
            ))
            .await?;
        Ok(response.printings)
    }
}
