mod deck_view;
mod modal_view;
mod search_view;
mod style;

use iced::{
    theme,
    widget::{
        self, button, column, container, image::Handle, mouse_area, row, text, tooltip, Space,
    },
    Alignment, ContentFit, Length, Theme,
};

use crate::app::{App, Message};

pub(crate) type AppElement<'a> = iced::Element<'a, Message, Theme, iced::Renderer>;

pub fn view(app: &App) -> AppElement<'_> {
    let content = match app.modals.top() {
        Some(kind) => modal_view::view(app, kind),
        None => page(app),
    };

    column!(toasts(app), content).height(Length::Fill).into()
}

fn page(app: &App) -> AppElement<'_> {
    let body = row!(
        container(search_view::view(app)).width(Length::FillPortion(2)),
        container(deck_view::view(app)).width(Length::FillPortion(3)),
    )
    .spacing(24)
    .height(Length::Fill);

    column!(top_bar(app), body).spacing(16).padding(16).into()
}

fn top_bar(app: &App) -> AppElement<'_> {
    let mode = app.theme.mode();
    let btn_theme = tooltip(
        button(text(mode.icon()))
            .style(theme::Button::Text)
            .on_press(Message::ToggleTheme),
        text(mode.toggle_title()),
        tooltip::Position::Bottom,
    )
    .style(theme::Container::Box);

    let btn_import = button("Import")
        .style(theme::Button::Secondary)
        .on_press_maybe(
            (app.deck.current().is_some() && !app.importing).then_some(Message::ShowImport),
        );

    let btn_export = button("Export")
        .style(theme::Button::Secondary)
        .on_press_maybe(app.deck.current().map(|_| Message::Export));

    row!(
        text("MTG Commander Deck Builder").size(22),
        Space::with_width(Length::Fill),
        btn_import,
        btn_export,
        btn_theme
    )
    .spacing(10)
    .align_items(Alignment::Center)
    .into()
}

fn toasts(app: &App) -> AppElement<'_> {
    widget::column(app.toasts.iter().map(|toast| {
        mouse_area(
            container(text(&toast.message))
                .padding([10, 20])
                .style(theme::Container::Custom(Box::new(style::ToastStyle(
                    toast.severity,
                )))),
        )
        .on_press(Message::DismissToast(toast.id))
        .into()
    }))
    .spacing(6)
    .padding(if app.toasts.is_empty() { 0 } else { 10 })
    .width(Length::Fill)
    .align_items(Alignment::End)
    .into()
}

/// Cached card image, or a grey placeholder until it arrives.
pub(crate) fn card_image<'a>(app: &'a App, url: Option<&str>, height: f32) -> AppElement<'a> {
    match url.and_then(|u| app.images.get(u)) {
        Some(bytes) => widget::image::<Handle>(Handle::from_memory(bytes.clone()))
            .content_fit(ContentFit::ScaleDown)
            .height(height)
            .into(),
        None => container(Space::new(
            Length::Fixed(height * 0.716),
            Length::Fixed(height),
        ))
        .style(theme::Container::Box)
        .into(),
    }
}
