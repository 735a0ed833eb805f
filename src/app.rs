use std::{
    collections::BTreeMap,
    fs,
    time::{Duration, Instant},
};

use bytes::Bytes;
use iced::{executor, widget::text_editor, Application, Command, Subscription, Theme};
use native_dialog::FileDialog;

use crate::{
    api::ApiClient,
    config::Config,
    deck::{DeckStore, LoadOutcome},
    error::ApiError,
    flow::{AddFlow, AddStep, FlowStep},
    images::{download_image, ImageCache},
    modals::{
        ConfirmAction, ModalKind, Modals, OptionsEditor, PrintPurpose, Prompt,
        PRINT_CONFIRM_DELAY,
    },
    models::{AddCardRequest, Card, Deck, DeckCardUpdate, ImportSummary, Printing},
    notify::{Severity, Toasts},
    search::{SearchPanel, SEARCH_DEBOUNCE},
    theme::ThemeController,
    ui,
};

const TOAST_TICK: Duration = Duration::from_millis(250);

pub struct App {
    pub(crate) api: ApiClient,
    pub(crate) deck: DeckStore,
    pub(crate) search: SearchPanel,
    pub(crate) modals: Modals,
    pub(crate) add_flow: Option<AddFlow>,
    pub(crate) toasts: Toasts,
    pub(crate) theme: ThemeController,
    pub(crate) images: ImageCache,
    pub(crate) in_flight: BTreeMap<u64, Mutation>,
    pub(crate) import_input: text_editor::Content,
    pub(crate) importing: bool,
    next_mutation: u64,
}

/// A deck change sent to the server. Each is followed by a full reload.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Add {
        request: AddCardRequest,
        card_name: String,
    },
    Remove {
        card_id: String,
    },
    Update {
        card_id: String,
        update: DeckCardUpdate,
    },
}

impl Mutation {
    fn success_message(&self) -> String {
        match self {
            Mutation::Add { card_name, .. } => format!("Added {} to deck", card_name),
            Mutation::Remove { .. } => "Card removed".to_owned(),
            Mutation::Update { .. } => "Card updated".to_owned(),
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Mutation::Add { .. } => "Failed to add card. It may already be in the deck.",
            Mutation::Remove { .. } => "Failed to remove card",
            Mutation::Update { .. } => "Failed to update card",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    DeckLoaded(u64, Result<Deck, ApiError>),
    MutationDone(u64, Result<(), ApiError>),
    RequestRemove(String),

    SearchInput(String),
    SearchDebounced(u64),
    SearchFinished(u64, Result<Vec<Card>, ApiError>),
    SearchResultClicked(String),

    ShowCard(String),
    CardLoaded(Result<Card, ApiError>),

    PrintingsLoaded(u64, Result<Vec<Printing>, ApiError>),
    PrintingClicked(u64, usize),
    PrintingConfirmed(u64),

    ShowOptions(String),
    OptionsQuantityChanged(String),
    SaveOptions,
    ChangePrinting,

    PromptInput(String),
    PromptSubmit,
    PromptAnswer(bool),

    CloseModal(ModalKind),
    ModalContentPressed,

    Export,
    ExportFetched(Result<String, ApiError>),
    ShowImport,
    ImportAction(text_editor::Action),
    SubmitImport,
    ImportFinished(Result<ImportSummary, ApiError>),

    ToggleTheme,
    DismissToast(u64),
    Tick,
    ImageLoaded(String, Option<Bytes>),
}

impl App {
    pub fn with_config(config: Config) -> Self {
        log::info!(
            "Using API at {} (deck {:?})",
            config.api_base,
            config.deck_id
        );

        Self {
            api: ApiClient::new(&config.api_base),
            deck: DeckStore::new(config.deck_id),
            search: SearchPanel::default(),
            modals: Modals::default(),
            add_flow: None,
            toasts: Toasts::default(),
            theme: ThemeController::init(config.preferences),
            images: ImageCache::default(),
            in_flight: BTreeMap::new(),
            import_input: text_editor::Content::new(),
            importing: false,
            next_mutation: 0,
        }
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.toasts.push(message, severity);
    }

    fn load_deck(&mut self) -> Command<Message> {
        let Some(ticket) = self.deck.begin_load() else {
            self.notify("Invalid deck ID", Severity::Error);
            return Command::none();
        };

        let api = self.api.clone();
        Command::perform(
            async move { api.get_deck(ticket.deck_id).await },
            move |res| Message::DeckLoaded(ticket.generation, res),
        )
    }

    /// Issues one API call; the deck is reloaded once it succeeds.
    fn mutate(&mut self, mutation: Mutation) -> Command<Message> {
        let Some(deck_id) = self.deck.deck_id() else {
            return Command::none();
        };

        self.next_mutation += 1;
        let id = self.next_mutation;
        self.in_flight.insert(id, mutation.clone());

        let api = self.api.clone();
        Command::perform(
            async move {
                match mutation {
                    Mutation::Add { request, .. } => api.add_card(deck_id, &request).await,
                    Mutation::Remove { card_id } => api.remove_card(deck_id, &card_id).await,
                    Mutation::Update { card_id, update } => {
                        api.update_card(deck_id, &card_id, &update).await
                    }
                }
            },
            move |res| Message::MutationDone(id, res),
        )
    }

    fn fetch_images(&mut self, urls: Vec<String>) -> Command<Message> {
        let missing = self.images.missing(urls.iter().map(String::as_str));
        Command::batch(missing.into_iter().map(|url| {
            let http = self.api.http().clone();
            Command::perform(download_image(http, url), |(url, bytes)| {
                Message::ImageLoaded(url, bytes)
            })
        }))
    }

    fn deck_image_urls(&self) -> Vec<String> {
        let Some(deck) = self.deck.current() else {
            return Vec::new();
        };
        deck.cards
            .iter()
            .flat_map(|dc| [dc.thumbnail_url(), dc.image_url()])
            .flatten()
            .map(str::to_owned)
            .collect()
    }

    fn open_print_picker(&mut self, card_name: String, purpose: PrintPurpose) -> Command<Message> {
        let token = self.modals.open_print_picker(&card_name, purpose);
        let api = self.api.clone();
        Command::perform(
            async move { api.get_printings(&card_name).await },
            move |res| Message::PrintingsLoaded(token, res),
        )
    }

    fn printing_chosen(&mut self, printing: Printing, purpose: PrintPurpose) -> Command<Message> {
        match purpose {
            PrintPurpose::AddToDeck => {
                let Some(flow) = self.add_flow.take() else {
                    return Command::none();
                };
                let flow = flow.choose_printing(printing);
                self.modals.open_prompt(Prompt::Quantity {
                    card_name: flow.card().name.clone(),
                });
                self.add_flow = Some(flow);
                Command::none()
            }
            PrintPurpose::ChangePrinting { card_id } => {
                self.modals.close(ModalKind::Options);
                self.mutate(Mutation::Update {
                    card_id,
                    update: DeckCardUpdate::printing(&printing),
                })
            }
        }
    }

    fn advance_flow(&mut self, card_name: String, step: FlowStep) -> Command<Message> {
        match step {
            FlowStep::Continue(flow) => {
                if let AddStep::ConfirmCommander { .. } = flow.step() {
                    self.modals.open_prompt(Prompt::Confirm {
                        question: format!("Make {} the commander?", flow.card().name),
                        action: ConfirmAction::MakeCommander,
                    });
                }
                self.add_flow = Some(flow);
                Command::none()
            }
            FlowStep::Submit(request) => self.mutate(Mutation::Add { request, card_name }),
            FlowStep::Cancelled => Command::none(),
            FlowStep::Invalid => {
                self.notify("Invalid quantity", Severity::Error);
                Command::none()
            }
        }
    }

    /// A prompt dismissed without an explicit answer.
    fn cancel_prompt(&mut self) -> Command<Message> {
        match self.modals.take_prompt() {
            Some(Prompt::Quantity { .. }) => {
                self.add_flow = None;
                Command::none()
            }
            Some(Prompt::Confirm {
                action: ConfirmAction::MakeCommander,
                ..
            }) => match self.add_flow.take() {
                Some(flow) => {
                    let card_name = flow.card().name.clone();
                    let step = flow.answer_commander(false);
                    self.advance_flow(card_name, step)
                }
                None => Command::none(),
            },
            Some(Prompt::Confirm {
                action: ConfirmAction::RemoveCard { .. },
                ..
            })
            | None => Command::none(),
        }
    }

    fn export_deck(&mut self, text: String) {
        let file_name = self
            .deck
            .current()
            .map(|d| format!("{}.txt", d.name))
            .unwrap_or_else(|| "deck.txt".to_owned());

        let path = match FileDialog::new()
            .set_filename(&file_name)
            .add_filter("Text", &["txt"])
            .show_save_single_file()
        {
            Ok(Some(path)) => path,
            Ok(None) => return,
            Err(e) => {
                log::error!("Save dialog failed: {}", e);
                self.notify("Failed to export deck", Severity::Error);
                return;
            }
        };

        match fs::write(&path, text) {
            Ok(()) => {
                log::info!("Exported deck to {}", path.display());
                self.notify("Deck exported", Severity::Success);
            }
            Err(e) => {
                log::error!("Failed to write {}: {}", path.display(), e);
                self.notify("Failed to export deck", Severity::Error);
            }
        }
    }
}

/// Delivers `message` once `delay` has passed. The timer is only created when
/// the executor polls the future.
fn after(delay: Duration, message: Message) -> Command<Message> {
    Command::perform(async move { tokio::time::sleep(delay).await }, move |()| message)
}

impl Application for App {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Config;

    fn new(config: Self::Flags) -> (Self, Command<Self::Message>) {
        let mut app = App::with_config(config);
        let command = app.load_deck();
        (app, command)
    }

    fn title(&self) -> String {
        match self.deck.current() {
            Some(deck) => format!("{} - MTG Commander Deck Builder", deck.name),
            None => "MTG Commander Deck Builder".to_owned(),
        }
    }

    fn theme(&self) -> Self::Theme {
        self.theme.theme()
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        if self.toasts.is_empty() {
            Subscription::none()
        } else {
            iced::time::every(TOAST_TICK).map(|_| Message::Tick)
        }
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        match message {
            Message::DeckLoaded(generation, result) => {
                match self.deck.finish_load(generation, result) {
                    LoadOutcome::Applied => {
                        let urls = self.deck_image_urls();
                        return self.fetch_images(urls);
                    }
                    LoadOutcome::Failed(_) => {
                        self.notify("Failed to load deck", Severity::Error);
                    }
                    LoadOutcome::Stale => {}
                }
            }
            Message::MutationDone(id, result) => {
                let Some(mutation) = self.in_flight.remove(&id) else {
                    return Command::none();
                };
                match result {
                    Ok(()) => {
                        self.notify(mutation.success_message(), Severity::Success);
                        return self.load_deck();
                    }
                    Err(e) => {
                        log::error!("{:?} failed: {}", mutation, e);
                        self.notify(mutation.failure_message(), Severity::Error);
                    }
                }
            }
            Message::RequestRemove(card_id) => {
                if self.deck.deck_id().is_none() {
                    return Command::none();
                }
                let Some(deck_card) = self.deck.find_card(&card_id) else {
                    return Command::none();
                };
                let question = format!("Remove {} from deck?", deck_card.name());
                self.modals.open_prompt(Prompt::Confirm {
                    question,
                    action: ConfirmAction::RemoveCard { card_id },
                });
            }

            Message::SearchInput(value) => {
                let generation = self.search.on_input(value);
                return after(SEARCH_DEBOUNCE, Message::SearchDebounced(generation));
            }
            Message::SearchDebounced(generation) => {
                if let Some(request) = self.search.on_debounce_elapsed(generation) {
                    let api = self.api.clone();
                    return Command::perform(
                        async move {
                            api.search_cards(&request.query)
                                .await
                                .map(|response| response.cards)
                        },
                        move |res| Message::SearchFinished(request.generation, res),
                    );
                }
            }
            Message::SearchFinished(generation, result) => {
                if self.search.on_response(generation, result) {
                    let urls = self
                        .search
                        .results()
                        .iter()
                        .filter_map(|c| c.thumbnail_url())
                        .map(str::to_owned)
                        .collect();
                    return self.fetch_images(urls);
                }
            }
            Message::SearchResultClicked(card_id) => {
                let Some(card) = self.search.find_result(&card_id).cloned() else {
                    return Command::none();
                };
                let card_name = card.name.clone();
                self.add_flow = Some(AddFlow::start(card, self.deck.has_commander()));
                return self.open_print_picker(card_name, PrintPurpose::AddToDeck);
            }

            Message::ShowCard(card_id) => {
                let api = self.api.clone();
                return Command::perform(
                    async move { api.get_card(&card_id).await },
                    Message::CardLoaded,
                );
            }
            Message::CardLoaded(result) => match result {
                Ok(card) => {
                    let urls = card.image_url.iter().cloned().collect();
                    self.modals.show_card(card);
                    return self.fetch_images(urls);
                }
                Err(e) => {
                    log::error!("Failed to load card details: {}", e);
                    self.notify("Failed to load card details", Severity::Error);
                }
            },

            Message::PrintingsLoaded(token, result) => {
                let printings = match result {
                    Ok(printings) => Some(printings),
                    Err(e) => {
                        log::error!("Failed to load printings: {}", e);
                        None
                    }
                };
                let urls = printings
                    .iter()
                    .flatten()
                    .filter_map(|p| p.image_url_small.as_ref().or(p.image_url.as_ref()))
                    .cloned()
                    .collect();
                self.modals.printings_loaded(token, printings);
                return self.fetch_images(urls);
            }
            Message::PrintingClicked(token, index) => {
                if self.modals.select_printing(token, index) {
                    return after(PRINT_CONFIRM_DELAY, Message::PrintingConfirmed(token));
                }
            }
            Message::PrintingConfirmed(token) => {
                if let Some((printing, purpose)) = self.modals.confirm_printing(token) {
                    return self.printing_chosen(printing, purpose);
                }
            }

            Message::ShowOptions(card_id) => {
                let Some(deck_card) = self.deck.find_card(&card_id) else {
                    return Command::none();
                };
                let editor = OptionsEditor::for_deck_card(deck_card);
                let urls = editor.image_url.iter().cloned().collect();
                self.modals.open_options(editor);
                return self.fetch_images(urls);
            }
            Message::OptionsQuantityChanged(value) => self.modals.edit_options_quantity(value),
            Message::SaveOptions => {
                let Some(editor) = self.modals.options() else {
                    return Command::none();
                };
                let Some(quantity) = editor.validated_quantity() else {
                    self.notify("Quantity must be between 1 and 100", Severity::Error);
                    return Command::none();
                };
                let card_id = editor.card_id.clone();
                self.modals.close(ModalKind::Options);
                return self.mutate(Mutation::Update {
                    card_id,
                    update: DeckCardUpdate::quantity(quantity),
                });
            }
            Message::ChangePrinting => {
                let Some(editor) = self.modals.options() else {
                    return Command::none();
                };
                let card_id = editor.card_id.clone();
                let card_name = editor.card_name.clone();
                return self.open_print_picker(card_name, PrintPurpose::ChangePrinting { card_id });
            }

            Message::PromptInput(value) => {
                if let Some(flow) = self.add_flow.as_mut() {
                    flow.edit_quantity(value);
                }
            }
            Message::PromptSubmit => {
                if !matches!(self.modals.prompt(), Some(Prompt::Quantity { .. })) {
                    return Command::none();
                }
                self.modals.take_prompt();
                let Some(flow) = self.add_flow.take() else {
                    return Command::none();
                };
                let card_name = flow.card().name.clone();
                let step = flow.submit_quantity();
                return self.advance_flow(card_name, step);
            }
            Message::PromptAnswer(yes) => match self.modals.take_prompt() {
                Some(Prompt::Confirm { action, .. }) => match action {
                    ConfirmAction::MakeCommander => {
                        if let Some(flow) = self.add_flow.take() {
                            let card_name = flow.card().name.clone();
                            let step = flow.answer_commander(yes);
                            return self.advance_flow(card_name, step);
                        }
                    }
                    ConfirmAction::RemoveCard { card_id } => {
                        if yes {
                            return self.mutate(Mutation::Remove { card_id });
                        }
                    }
                },
                Some(Prompt::Quantity { .. }) | None => {}
            },

            Message::CloseModal(kind) => {
                if kind == ModalKind::Prompt {
                    return self.cancel_prompt();
                }
                if let Some(PrintPurpose::AddToDeck) = self.modals.close(kind) {
                    self.add_flow = None;
                }
            }
            Message::ModalContentPressed => {}

            Message::Export => {
                let Some(deck_id) = self.deck.deck_id() else {
                    return Command::none();
                };
                let api = self.api.clone();
                return Command::perform(
                    async move { api.export_decklist(deck_id).await },
                    Message::ExportFetched,
                );
            }
            Message::ExportFetched(result) => match result {
                Ok(text) => self.export_deck(text),
                Err(e) => {
                    log::error!("Failed to export deck: {}", e);
                    self.notify("Failed to export deck", Severity::Error);
                }
            },

            Message::ShowImport => {
                if self.deck.deck_id().is_some() {
                    self.modals.open_import();
                }
            }
            Message::ImportAction(action) => self.import_input.perform(action),
            Message::SubmitImport => {
                let Some(deck_id) = self.deck.deck_id() else {
                    return Command::none();
                };
                if self.importing {
                    return Command::none();
                }
                let decklist = self.import_input.text();
                if decklist.trim().is_empty() {
                    self.notify("Paste a decklist to import", Severity::Error);
                    return Command::none();
                }

                self.importing = true;
                self.modals.close(ModalKind::Import);
                let api = self.api.clone();
                return Command::perform(
                    async move { api.import_decklist(deck_id, &decklist).await },
                    Message::ImportFinished,
                );
            }
            Message::ImportFinished(result) => {
                self.importing = false;
                match result {
                    Ok(summary) => {
                        for error in &summary.errors {
                            log::warn!("Import: {}", error);
                        }
                        self.notify(summary.added_message(), Severity::Success);
                        if let Some(message) = summary.errors_message() {
                            self.notify(message, Severity::Error);
                        }
                        self.import_input = text_editor::Content::new();
                        return self.load_deck();
                    }
                    Err(e) => {
                        log::error!("Failed to import decklist: {}", e);
                        self.notify("Failed to import decklist", Severity::Error);
                    }
                }
            }

            Message::ToggleTheme => {
                let mode = self.theme.toggle();
                log::debug!("Theme switched to {}", mode);
            }
            Message::DismissToast(id) => self.toasts.dismiss(id),
            Message::Tick => self.toasts.prune(Instant::now()),
            Message::ImageLoaded(url, bytes) => self.images.insert(url, bytes),
        };

        Command::none()
    }

    fn view(&self) -> iced::Element<'_, Self::Message, Self::Theme, iced::Renderer> {
        ui::view(self)
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
