use iced::{
    theme,
    widget::{self, button, column, container, mouse_area, row, scrollable, text, tooltip, Space},
    Alignment, Length,
};

use super::{card_image, style, AppElement};
use crate::{
    app::{App, Message},
    deck::{DeckView, ValidationBadge},
    models::DeckCard,
};

pub fn view(app: &App) -> AppElement<'_> {
    let Some(deck) = app.deck.current() else {
        return text("No deck loaded").style(style::MUTED).into();
    };
    let view = DeckView::project(deck);

    let mut header = row!(
        text(view.name).size(24),
        text(format!("{} cards", view.total_cards)).style(style::MUTED),
    )
    .spacing(16)
    .align_items(Alignment::Center);
    if let Some(badge) = view.validation {
        header = header.push(validation_badge(badge));
    }
    if !app.in_flight.is_empty() || app.importing {
        header = header.push(text("Saving...").size(14).style(style::MUTED));
    }

    let commander = commander_slot(app, view.commander);
    let cards = widget::column(view.cards.into_iter().map(|dc| deck_card_row(app, dc))).spacing(6);

    column!(
        header,
        text("Commander").size(18),
        commander,
        text("Deck").size(18),
        scrollable(cards).height(Length::Fill)
    )
    .spacing(12)
    .into()
}

fn validation_badge<'a>(badge: ValidationBadge) -> AppElement<'a> {
    let color = if badge.valid { style::GREEN } else { style::RED };
    let label = text(badge.label()).style(color);

    match badge.tooltip {
        Some(problems) => tooltip(label, text(problems), tooltip::Position::Bottom)
            .style(theme::Container::Box)
            .into(),
        None => label.into(),
    }
}

fn commander_slot<'a>(app: &'a App, commander: Option<&'a DeckCard>) -> AppElement<'a> {
    let Some(dc) = commander else {
        return text("No commander selected (search for a legendary creature)")
            .style(style::MUTED)
            .into();
    };

    let image = mouse_area(card_image(app, dc.image_url(), 160.0))
        .on_press(Message::ShowCard(dc.card_id.clone()));

    let mut details = column!(text(dc.name()).size(20), text(dc.type_line()).size(14)).spacing(4);
    if let Some(label) = dc.printing_label() {
        details = details.push(text(label).size(12).style(style::MUTED));
    }

    container(
        row!(
            image,
            details,
            Space::with_width(Length::Fill),
            actions(&dc.card_id)
        )
        .spacing(16)
        .align_items(Alignment::Center),
    )
    .padding(10)
    .style(theme::Container::Box)
    .into()
}

fn deck_card_row<'a>(app: &'a App, dc: &'a DeckCard) -> AppElement<'a> {
    let thumb = mouse_area(card_image(app, dc.thumbnail_url(), 68.0))
        .on_press(Message::ShowCard(dc.card_id.clone()));

    let mut details = column!(
        row!(text(format!("{}x", dc.quantity)).style(style::MUTED), text(dc.name())).spacing(6),
        text(dc.type_line()).size(13).style(style::MUTED),
    )
    .spacing(2);
    if let Some(label) = dc.printing_label() {
        details = details.push(text(label).size(12));
    }

    // hover preview
    let details = tooltip(
        mouse_area(details).on_press(Message::ShowOptions(dc.card_id.clone())),
        card_image(app, dc.image_url(), 320.0),
        tooltip::Position::Left,
    );

    row!(
        thumb,
        details,
        Space::with_width(Length::Fill),
        actions(&dc.card_id)
    )
    .spacing(12)
    .align_items(Alignment::Center)
    .into()
}

fn actions<'a>(card_id: &str) -> AppElement<'a> {
    row!(
        button("Options")
            .style(theme::Button::Secondary)
            .on_press(Message::ShowOptions(card_id.to_owned())),
        button("✕")
            .style(theme::Button::Destructive)
            .on_press(Message::RequestRemove(card_id.to_owned())),
    )
    .spacing(6)
    .into()
}
