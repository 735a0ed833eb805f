use iced::{
    theme,
    widget::{self, button, column, row, scrollable, text, text_input},
    Alignment, Length,
};

use super::{card_image, style, AppElement};
use crate::{
    app::{App, Message},
    models::Card,
    search::SearchStatus,
};

pub fn view(app: &App) -> AppElement<'_> {
    let input = text_input("Search for cards...", app.search.query())
        .on_input(Message::SearchInput)
        .padding(8);

    let body: AppElement = match app.search.message() {
        Some(message) => {
            let color = match app.search.status() {
                SearchStatus::Error => style::RED,
                _ => style::MUTED,
            };
            text(message).style(color).into()
        }
        None => scrollable(
            widget::column(app.search.results().iter().map(|card| result_row(app, card)))
                .spacing(4),
        )
        .height(Length::Fill)
        .into(),
    };

    column!(text("Card Search").size(20), input, body)
        .spacing(10)
        .into()
}

fn result_row<'a>(app: &'a App, card: &'a Card) -> AppElement<'a> {
    let mut info = column!(
        text(format!(
            "{} {}",
            card.name,
            card.mana_cost.as_deref().unwrap_or_default()
        )),
        text(card.type_line()).size(13).style(style::MUTED),
    )
    .spacing(2);

    if card.is_banned {
        info = info.push(text("BANNED").size(12).style(style::RED));
    }
    if card.is_legal_commander {
        info = info.push(text("★ Legal Commander").size(12).style(style::GREEN));
    }

    button(
        row!(card_image(app, card.thumbnail_url(), 68.0), info)
            .spacing(12)
            .align_items(Alignment::Center),
    )
    .width(Length::Fill)
    .style(theme::Button::Text)
    .on_press(Message::SearchResultClicked(card.id.clone()))
    .into()
}
