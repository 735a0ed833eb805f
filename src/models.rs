use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub colors: Option<String>,
    #[serde(default)]
    pub color_identity: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_url_small: Option<String>,
    #[serde(default)]
    pub is_legal_commander: bool,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default)]
    pub set_code: Option<String>,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub collector_number: Option<String>,
}

impl Card {
    pub fn type_line(&self) -> &str {
        self.type_line.as_deref().unwrap_or_default()
    }

    /// Small image for list rows, falling back to the full image.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.image_url_small
            .as_deref()
            .or(self.image_url.as_deref())
    }
}

/// One concrete print of a card.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Printing {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub set_code: Option<String>,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub collector_number: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_url_small: Option<String>,
}

impl Printing {
    pub fn label(&self) -> String {
        printing_label(self.set_code.as_deref(), self.collector_number.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeckCard {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub deck_id: Option<u32>,
    pub card_id: String,
    #[serde(default)]
    pub card: Option<Card>,
    pub quantity: u32,
    #[serde(default)]
    pub is_commander: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub selected_printing_id: Option<String>,
    #[serde(default)]
    pub selected_image_url: Option<String>,
    #[serde(default)]
    pub selected_set_code: Option<String>,
    #[serde(default)]
    pub selected_collector_number: Option<String>,
}

impl DeckCard {
    pub fn name(&self) -> &str {
        self.card.as_ref().map(|c| c.name.as_str()).unwrap_or(&self.card_id)
    }

    pub fn type_line(&self) -> &str {
        self.card.as_ref().map(Card::type_line).unwrap_or_default()
    }

    /// Image of the selected printing, else the card's own image.
    pub fn image_url(&self) -> Option<&str> {
        self.selected_image_url
            .as_deref()
            .or_else(|| self.card.as_ref().and_then(|c| c.image_url.as_deref()))
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.card
            .as_ref()
            .and_then(|c| c.image_url_small.as_deref())
            .or_else(|| self.image_url())
    }

    /// "SET #number" for the selected printing, if one is recorded.
    pub fn printing_label(&self) -> Option<String> {
        printing_label(
            self.selected_set_code.as_deref(),
            self.selected_collector_number.as_deref(),
        )
    }
}

fn printing_label(set_code: Option<&str>, collector_number: Option<&str>) -> Option<String> {
    let set_code = set_code.filter(|s| !s.is_empty())?;
    Some(format!(
        "{} #{}",
        set_code.to_uppercase(),
        collector_number.unwrap_or("?")
    ))
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Validation {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Deck {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub color_identity: Option<String>,
    #[serde(default)]
    pub commander_id: Option<String>,
    #[serde(default)]
    pub commander_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cards: Vec<DeckCard>,
    #[serde(default)]
    pub validation: Option<Validation>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchResponse {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub total_cards: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PrintingsResponse {
    #[serde(default)]
    pub printings: Vec<Printing>,
}

/// Body of `POST /decks/{id}/cards`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddCardRequest {
    pub card_id: String,
    pub quantity: u32,
    pub is_commander: bool,
    pub selected_printing_id: Option<String>,
    pub selected_image_url: Option<String>,
    pub selected_set_code: Option<String>,
    pub selected_collector_number: Option<String>,
}

impl AddCardRequest {
    /// Printing fields missing on `printing` fall back to the card's own.
    pub fn new(card: &Card, printing: &Printing, quantity: u32, is_commander: bool) -> Self {
        Self {
            card_id: card.id.clone(),
            quantity,
            is_commander,
            selected_printing_id: Some(if printing.id.is_empty() {
                card.id.clone()
            } else {
                printing.id.clone()
            }),
            selected_image_url: printing.image_url.clone().or_else(|| card.image_url.clone()),
            selected_set_code: printing.set_code.clone().or_else(|| card.set_code.clone()),
            selected_collector_number: printing
                .collector_number
                .clone()
                .or_else(|| card.collector_number.clone()),
        }
    }
}

/// Partial body of `PUT /decks/{id}/cards/{card_id}`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DeckCardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_printing_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_set_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_collector_number: Option<String>,
}

impl DeckCardUpdate {
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    pub fn printing(printing: &Printing) -> Self {
        Self {
            selected_printing_id: Some(printing.id.clone()),
            selected_image_url: printing.image_url.clone(),
            selected_set_code: printing.set_code.clone(),
            selected_collector_number: printing.collector_number.clone(),
            ..Default::default()
        }
    }
}

/// Body of `POST /decks/{id}/import`.
#[derive(Debug, Serialize)]
pub struct ImportRequest<'a> {
    pub decklist: &'a str,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ImportSummary {
    #[serde(default)]
    pub added: u32,
    /// One entry per line the server could not resolve.
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub cards: Vec<String>,
}

impl ImportSummary {
    pub fn added_message(&self) -> String {
        match self.added {
            1 => "Imported 1 card".to_owned(),
            n => format!("Imported {} cards", n),
        }
    }

    /// `None` when every line was imported.
    pub fn errors_message(&self) -> Option<String> {
        let first = self.errors.first()?;
        Some(match self.errors.len() {
            1 => first.clone(),
            n => format!("{} (and {} more)", first, n - 1),
        })
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
