use std::time::Duration;

use crate::{
    flow::{parse_quantity, QuantityInput, MAX_DECK_QUANTITY},
    models::{Card, DeckCard, Printing},
};

/// Pause between clicking a printing and acting on it.
pub const PRINT_CONFIRM_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    CardDetail,
    PrintSelection,
    Options,
    Prompt,
    Import,
}

/// What a confirmed printing is used for.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintPurpose {
    AddToDeck,
    ChangePrinting { card_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrintStatus {
    Loading,
    Loaded(Vec<Printing>),
    Empty,
    Failed,
}

#[derive(Debug, Clone)]
pub struct PrintPicker {
    pub card_name: String,
    pub purpose: PrintPurpose,
    pub status: PrintStatus,
    pub selected: Option<usize>,
    token: u64,
    fired: bool,
}

impl PrintPicker {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn printings(&self) -> &[Printing] {
        match &self.status {
            PrintStatus::Loaded(printings) => printings,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionsEditor {
    pub card_id: String,
    pub card_name: String,
    pub quantity_input: String,
    pub image_url: Option<String>,
    pub printing_label: Option<String>,
}

impl OptionsEditor {
    pub fn for_deck_card(deck_card: &DeckCard) -> Self {
        Self {
            card_id: deck_card.card_id.clone(),
            card_name: deck_card.name().to_owned(),
            quantity_input: deck_card.quantity.to_string(),
            image_url: deck_card.selected_image_url.clone(),
            printing_label: deck_card.printing_label(),
        }
    }

    /// Quantity to save, if it lies within `1..=100`.
    pub fn validated_quantity(&self) -> Option<u32> {
        match parse_quantity(&self.quantity_input, MAX_DECK_QUANTITY) {
            QuantityInput::Valid(q) => Some(q),
            QuantityInput::Empty | QuantityInput::Invalid => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    MakeCommander,
    RemoveCard { card_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    /// Quantity step of the add flow; the input itself lives in the flow.
    Quantity { card_name: String },
    Confirm {
        question: String,
        action: ConfirmAction,
    },
}

/// Open/closed state of every overlay. The last opened overlay is the one on
/// top.
#[derive(Debug, Default)]
pub struct Modals {
    card_detail: Option<Card>,
    print: Option<PrintPicker>,
    options: Option<OptionsEditor>,
    prompt: Option<Prompt>,
    order: Vec<ModalKind>,
    next_token: u64,
}

impl Modals {
    fn raise(&mut self, kind: ModalKind) {
        self.order.retain(|k| *k != kind);
        self.order.push(kind);
    }

    pub fn top(&self) -> Option<ModalKind> {
        self.order.last().copied()
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.order.contains(&kind)
    }

    /// Closes one overlay, returning the printing picker's purpose when that
    /// closed an unfinished picker.
    pub fn close(&mut self, kind: ModalKind) -> Option<PrintPurpose> {
        self.order.retain(|k| *k != kind);
        match kind {
            ModalKind::CardDetail => self.card_detail = None,
            ModalKind::Options => self.options = None,
            ModalKind::Prompt => self.prompt = None,
            ModalKind::Import => {}
            ModalKind::PrintSelection => {
                return self
                    .print
                    .take()
                    .filter(|p| !p.fired)
                    .map(|p| p.purpose);
            }
        }
        None
    }


    pub fn show_card(&mut self, card: Card) {
        self.card_detail = Some(card);
        self.raise(ModalKind::CardDetail);
    }

    pub fn card_detail(&self) -> Option<&Card> {
        self.card_detail.as_ref()
    }


    /// Opens the picker in its loading state; returns the token that the
    /// printings response and the confirm timer must carry.
    pub fn open_print_picker(&mut self, card_name: &str, purpose: PrintPurpose) -> u64 {
        self.next_token += 1;
        self.print = Some(PrintPicker {
            card_name: card_name.to_owned(),
            purpose,
            status: PrintStatus::Loading,
            selected: None,
            token: self.next_token,
            fired: false,
        });
        self.raise(ModalKind::PrintSelection);
        self.next_token
    }

    pub fn print_picker(&self) -> Option<&PrintPicker> {
        self.print.as_ref()
    }

    fn picker_mut(&mut self, token: u64) -> Option<&mut PrintPicker> {
        self.print.as_mut().filter(|p| p.token == token)
    }

    pub fn printings_loaded(&mut self, token: u64, result: Option<Vec<Printing>>) {
        if let Some(picker) = self.picker_mut(token) {
            picker.status = match result {
                Some(printings) if printings.is_empty() => PrintStatus::Empty,
                Some(printings) => PrintStatus::Loaded(printings),
                None => PrintStatus::Failed,
            };
        }
    }

    /// Marks a printing as selected. Returns `true` when the confirm timer
    /// should be armed.
    pub fn select_printing(&mut self, token: u64, index: usize) -> bool {
        match self.picker_mut(token) {
            Some(picker) if !picker.fired && index < picker.printings().len() => {
                picker.selected = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Confirm timer fired. Yields the selection at most once per opening and
    /// closes the picker.
    pub fn confirm_printing(&mut self, token: u64) -> Option<(Printing, PrintPurpose)> {
        let picker = self.picker_mut(token)?;
        if picker.fired {
            return None;
        }
        let printing = picker.printings().get(picker.selected?)?.clone();
        picker.fired = true;
        let purpose = picker.purpose.clone();

        self.close(ModalKind::PrintSelection);
        Some((printing, purpose))
    }


    pub fn open_options(&mut self, editor: OptionsEditor) {
        self.options = Some(editor);
        self.raise(ModalKind::Options);
    }

    pub fn options(&self) -> Option<&OptionsEditor> {
        self.options.as_ref()
    }

    pub fn edit_options_quantity(&mut self, value: String) {
        if let Some(editor) = self.options.as_mut() {
            editor.quantity_input = value;
        }
    }


    /// The decklist itself lives on the app, next to the editor widget state.
    pub fn open_import(&mut self) {
        self.raise(ModalKind::Import);
    }

    pub fn open_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
        self.raise(ModalKind::Prompt);
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn take_prompt(&mut self) -> Option<Prompt> {
        let prompt = self.prompt.take();
        self.order.retain(|k| *k != ModalKind::Prompt);
        prompt
    }
}

#[cfg(test)]
#[path = "modals_tests.rs"]
mod tests;
