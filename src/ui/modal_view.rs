use iced::{
    theme,
    widget::{
        self, button, column, container, mouse_area, row, scrollable, text, text_editor,
        text_input, Space,
    },
    Alignment, Length,
};

use super::{card_image, style, AppElement};
use crate::{
    app::{App, Message},
    flow::AddStep,
    models::Printing,
    modals::{ModalKind, PrintStatus, Prompt},
};

const PRINTS_PER_ROW: usize = 4;

/// Renders `kind` over a dimmed backdrop. Clicking the backdrop closes it;
/// clicks inside the panel are swallowed.
pub fn view(app: &App, kind: ModalKind) -> AppElement<'_> {
    let content = match kind {
        ModalKind::CardDetail => card_detail(app),
        ModalKind::PrintSelection => print_selection(app),
        ModalKind::Options => options(app),
        ModalKind::Prompt => prompt(app),
        ModalKind::Import => import(app),
    };

    let panel = mouse_area(
        container(content)
            .padding(24)
            .max_width(960.0)
            .style(theme::Container::Box),
    )
    .on_press(Message::ModalContentPressed);

    mouse_area(
        container(panel)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(32)
            .center_x()
            .center_y()
            .style(theme::Container::Custom(Box::new(style::Backdrop))),
    )
    .on_press(Message::CloseModal(kind))
    .into()
}

fn empty<'a>() -> AppElement<'a> {
    Space::new(Length::Shrink, Length::Shrink).into()
}

fn close_button<'a>(kind: ModalKind) -> AppElement<'a> {
    button("Close")
        .style(theme::Button::Secondary)
        .on_press(Message::CloseModal(kind))
        .into()
}

fn card_detail(app: &App) -> AppElement<'_> {
    let Some(card) = app.modals.card_detail() else {
        return empty();
    };

    let mut info = column!(
        text(format!(
            "{} {}",
            card.name,
            card.mana_cost.as_deref().unwrap_or_default()
        ))
        .size(24),
        text(format!("Type: {}", card.type_line())),
    )
    .spacing(8)
    .width(Length::Fill);

    if let Some(oracle) = &card.oracle_text {
        info = info.push(text(format!("Text:\n{}", oracle)));
    }
    if let Some(power) = &card.power {
        info = info.push(text(format!(
            "P/T: {}/{}",
            power,
            card.toughness.as_deref().unwrap_or_default()
        )));
    }
    if let Some(loyalty) = &card.loyalty {
        info = info.push(text(format!("Loyalty: {}", loyalty)));
    }
    info = info
        .push(text(format!(
            "Set: {} ({})",
            card.set_name.as_deref().unwrap_or("Unknown"),
            card.set_code.as_deref().unwrap_or("?")
        )))
        .push(text(format!(
            "Rarity: {}",
            card.rarity.as_deref().unwrap_or("Unknown")
        )));
    if card.is_legal_commander {
        info = info.push(text("★ Can be your commander").style(style::GREEN));
    }
    if card.is_banned {
        info = info.push(text("BANNED in Commander").style(style::RED));
    }
    info = info.push(close_button(ModalKind::CardDetail));

    row!(card_image(app, card.image_url.as_deref(), 440.0), info)
        .spacing(24)
        .into()
}

fn print_selection(app: &App) -> AppElement<'_> {
    let Some(picker) = app.modals.print_picker() else {
        return empty();
    };

    let body: AppElement = match &picker.status {
        PrintStatus::Loading => text("Loading printings...").into(),
        PrintStatus::Empty => text("No printings found.").into(),
        PrintStatus::Failed => text("Failed to load printings.").style(style::RED).into(),
        PrintStatus::Loaded(printings) => {
            let rows = printings.chunks(PRINTS_PER_ROW).enumerate().map(|(r, chunk)| {
                print_row(app, chunk, r * PRINTS_PER_ROW, picker.selected, picker.token())
            });
            scrollable(widget::column(rows).spacing(12))
                .height(Length::Fixed(520.0))
                .into()
        }
    };

    column!(
        text(format!("Select printing: {}", picker.card_name)).size(20),
        body,
        close_button(ModalKind::PrintSelection)
    )
    .spacing(12)
    .into()
}

fn print_row<'a>(
    app: &'a App,
    printings: &'a [Printing],
    offset: usize,
    selected: Option<usize>,
    token: u64,
) -> AppElement<'a> {
    widget::row(printings.iter().enumerate().map(|(i, printing)| {
        let index = offset + i;
        print_option(app, printing, index, selected == Some(index), token)
    }))
    .spacing(12)
    .into()
}

fn print_option<'a>(
    app: &'a App,
    printing: &'a Printing,
    index: usize,
    selected: bool,
    token: u64,
) -> AppElement<'a> {
    let image_url = printing
        .image_url_small
        .as_deref()
        .or(printing.image_url.as_deref());

    let tile = column!(
        card_image(app, image_url, 200.0),
        text(printing.set_name.as_deref().unwrap_or("Unknown set")).size(14),
        text(printing.label()).size(12).style(style::MUTED),
        text(printing.rarity.as_deref().unwrap_or_default()).size(12),
    )
    .spacing(4)
    .align_items(Alignment::Center);

    let style = if selected {
        theme::Container::Custom(Box::new(style::Selected))
    } else {
        theme::Container::Transparent
    };

    mouse_area(
        container(tile)
            .padding(6)
            .width(Length::Fixed(176.0))
            .style(style),
    )
    .on_press(Message::PrintingClicked(token, index))
    .into()
}

fn options(app: &App) -> AppElement<'_> {
    let Some(editor) = app.modals.options() else {
        return empty();
    };

    let current = column!(
        card_image(app, editor.image_url.as_deref(), 240.0),
        text(editor.printing_label.as_deref().unwrap_or("Default printing")).size(13)
    )
    .spacing(6);

    column!(
        text("Card Options").size(20),
        text("Card Name:").style(style::MUTED),
        text(&editor.card_name).size(18),
        text("Quantity:").style(style::MUTED),
        text_input("1-100", &editor.quantity_input)
            .on_input(Message::OptionsQuantityChanged)
            .on_submit(Message::SaveOptions)
            .width(Length::Fixed(120.0)),
        text("Current Printing:").style(style::MUTED),
        current,
        button("Change Printing")
            .style(theme::Button::Secondary)
            .on_press(Message::ChangePrinting),
        row!(
            button("Save Changes").on_press(Message::SaveOptions),
            button("Cancel")
                .style(theme::Button::Secondary)
                .on_press(Message::CloseModal(ModalKind::Options)),
        )
        .spacing(10),
    )
    .spacing(10)
    .into()
}

fn prompt(app: &App) -> AppElement<'_> {
    match app.modals.prompt() {
        Some(Prompt::Quantity { card_name }) => {
            let input = match app.add_flow.as_ref().map(|flow| flow.step()) {
                Some(AddStep::Quantity { input, .. }) => input.as_str(),
                _ => "",
            };

            column!(
                text(format!("Add {}", card_name)).size(20),
                text("Enter quantity (1-99):"),
                text_input("1", input)
                    .on_input(Message::PromptInput)
                    .on_submit(Message::PromptSubmit)
                    .width(Length::Fixed(120.0)),
                row!(
                    button("OK").on_press(Message::PromptSubmit),
                    button("Cancel")
                        .style(theme::Button::Secondary)
                        .on_press(Message::CloseModal(ModalKind::Prompt)),
                )
                .spacing(10),
            )
            .spacing(10)
            .into()
        }
        Some(Prompt::Confirm { question, .. }) => column!(
            text(question).size(18),
            row!(
                button("Yes").on_press(Message::PromptAnswer(true)),
                button("No")
                    .style(theme::Button::Secondary)
                    .on_press(Message::PromptAnswer(false)),
            )
            .spacing(10),
        )
        .spacing(16)
        .into(),
        None => empty(),
    }
}

fn import(app: &App) -> AppElement<'_> {
    column!(
        text("Import Decklist").size(20),
        text("One card per line, e.g. \"1 Sol Ring\". Lines starting with # or // are skipped.")
            .size(13)
            .style(style::MUTED),
        text_editor(&app.import_input)
            .on_action(Message::ImportAction)
            .height(360),
        row!(
            button("Import").on_press(Message::SubmitImport),
            button("Cancel")
                .style(theme::Button::Secondary)
                .on_press(Message::CloseModal(ModalKind::Import)),
        )
        .spacing(10),
    )
    .spacing(10)
    .width(Length::Fixed(560.0))
    .into()
}
