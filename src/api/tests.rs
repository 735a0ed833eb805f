use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{AddCardRequest, DeckCardUpdate};

fn deck_json() -> serde_json::Value {
    serde_json::json!({
        "id": 42,
        "name": "Five-Color Goodstuff",
        "color_identity": "WUBRG",
        "cards": [
            {
                "card_id": "sol",
                "quantity": 1,
                "is_commander": false,
                "card": { "id": "sol", "name": "Sol Ring", "type_line": "Artifact" }
            }
        ],
        "validation": { "valid": false, "errors": ["Deck must have a commander"], "warnings": [] }
    })
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&format!("{}/api/", server.uri()))
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let client = ApiClient::new("http://localhost:5000/api/");
    assert_eq!(client.base_url(), "http://localhost:5000/api");
}

#[tokio::test]
async fn non_success_status_is_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/decks/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "Not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).get_deck(42).await.unwrap_err();

    assert_eq!(err, ApiError::RequestFailed { status: 404 });
    assert_eq!(err.to_string(), "API request failed");
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cards/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_card("abc").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let client = ApiClient::new("http://127.0.0.1:1/api");
    let err = client.get_deck(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn search_sends_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cards/search"))
        .and(query_param("q", "sol ring"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cards": [{ "id": "sol", "name": "Sol Ring", "is_banned": false }],
            "has_more": false,
            "total_cards": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .search_cards("sol ring")
        .await
        .unwrap();

    assert_eq!(response.cards.len(), 1);
    assert_eq!(response.cards[0].name, "Sol Ring");
    assert_eq!(response.total_cards, 1);
}

#[tokio::test]
async fn printings_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cards/Lightning%20Bolt/printings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "printings": [
                { "id": "p1", "name": "Lightning Bolt", "set_code": "lea", "set_name": "Alpha",
                  "collector_number": "161", "rarity": "common", "image_url": null },
                { "id": "p2", "name": "Lightning Bolt", "set_code": "m10", "set_name": "Magic 2010",
                  "collector_number": "146", "rarity": "common", "image_url": "https://img/p2.jpg" }
            ]
        })))
        .mount(&server)
        .await;

    let printings = client_for(&server)
        .get_printings("Lightning Bolt")
        .await
        .unwrap();

    assert_eq!(printings.len(), 2);
    assert_eq!(printings[1].label(), "M10 #146");
}

#[tokio::test]
async fn get_deck_parses_cards_and_validation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/decks/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deck_json()))
        .mount(&server)
        .await;

    let deck = client_for(&server).get_deck(42).await.unwrap();

    assert_eq!(deck.name, "Five-Color Goodstuff");
    assert_eq!(deck.cards.len(), 1);
    let validation = deck.validation.unwrap();
    assert!(!validation.valid);
    assert_eq!(validation.errors, vec!["Deck must have a commander"]);
}

#[tokio::test]
async fn add_card_posts_full_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/decks/42/cards"))
        .and(body_json(serde_json::json!({
            "card_id": "atraxa",
            "quantity": 1,
            "is_commander": true,
            "selected_printing_id": "atraxa-promo",
            "selected_image_url": "https://img/atraxa.jpg",
            "selected_set_code": "pone",
            "selected_collector_number": "190"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let request = AddCardRequest {
        card_id: "atraxa".to_string(),
        quantity: 1,
        is_commander: true,
        selected_printing_id: Some("atraxa-promo".to_string()),
        selected_image_url: Some("https://img/atraxa.jpg".to_string()),
        selected_set_code: Some("pone".to_string()),
        selected_collector_number: Some("190".to_string()),
    };

    client_for(&server)
        .add_card(42, &request)
        .await
        .unwrap();
}

#[tokio::test]
async fn update_card_sends_partial_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/decks/42/cards/sol"))
        .and(body_json(serde_json::json!({ "quantity": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "quantity": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .update_card(42, "sol", &DeckCardUpdate::quantity(3))
        .await
        .unwrap();
}

#[tokio::test]
async fn remove_card_issues_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/decks/42/cards/sol"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Card removed from deck"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .remove_card(42, "sol")
        .await
        .unwrap();
}

#[tokio::test]
async fn empty_success_body_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/decks/42/cards/sol"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client_for(&server)
        .remove_card(42, "sol")
        .await
        .unwrap();
}

#[tokio::test]
async fn add_card_rejected_by_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/decks/42/cards"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "Card already in deck"
        })))
        .mount(&server)
        .await;

    let request = AddCardRequest {
        card_id: "sol".to_string(),
        quantity: 1,
        is_commander: false,
        selected_printing_id: None,
        selected_image_url: None,
        selected_set_code: None,
        selected_collector_number: None,
    };

    let err = client_for(&server)
        .add_card(42, &request)
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::RequestFailed { status: 400 });
}

#[tokio::test]
async fn export_returns_plain_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/decks/42/export"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("# Five-Color Goodstuff\n\nDeck:\n1 Sol Ring"),
        )
        .mount(&server)
        .await;

    let text = client_for(&server)
        .export_decklist(42)
        .await
        .unwrap();

    assert!(text.ends_with("1 Sol Ring"));
}

#[tokio::test]
async fn import_posts_decklist_and_reads_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/decks/42/import"))
        .and(body_json(serde_json::json!({ "decklist": "1 Sol Ring\n2 Island" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "added": 1,
            "errors": ["Card not found: Island"],
            "cards": ["Sol Ring"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = client_for(&server)
        .import_decklist(42, "1 Sol Ring\n2 Island")
        .await
        .unwrap();

    assert_eq!(summary.added, 1);
    assert_eq!(summary.cards, vec!["Sol Ring"]);
    assert_eq!(summary.errors, vec!["Card not found: Island"]);
}

#[tokio::test]
async fn import_without_decklist_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/decks/42/import"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "decklist required"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .import_decklist(42, "")
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::RequestFailed { status: 400 });
}
