use crate::models::{AddCardRequest, Card, Printing};

/// Upper bound of the quantity prompt when adding a card.
pub const MAX_ADD_QUANTITY: u32 = 99;
/// Upper bound of the options editor.
pub const MAX_DECK_QUANTITY: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityInput {
    /// Nothing entered.
    Empty,
    /// Non-numeric or outside `1..=max`.
    Invalid,
    Valid(u32),
}

pub fn parse_quantity(input: &str, max: u32) -> QuantityInput {
    let input = input.trim();
    if input.is_empty() {
        return QuantityInput::Empty;
    }

    match input.parse::<i64>() {
        Ok(n) if n >= 1 && n <= i64::from(max) => QuantityInput::Valid(n as u32),
        _ => QuantityInput::Invalid,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddStep {
    ChoosePrinting,
    Quantity { printing: Printing, input: String },
    ConfirmCommander { printing: Printing, quantity: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddFlow {
    card: Card,
    /// Whether the deck already had a commander when the flow started.
    had_commander: bool,
    step: AddStep,
}

#[derive(Debug, PartialEq)]
pub enum FlowStep {
    Continue(AddFlow),
    Submit(AddCardRequest),
    /// Dismissed without input; nothing to report.
    Cancelled,
    /// Rejected input; the caller reports it.
    Invalid,
}

impl AddFlow {
    pub fn start(card: Card, had_commander: bool) -> Self {
        Self {
            card,
            had_commander,
            step: AddStep::ChoosePrinting,
        }
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn step(&self) -> &AddStep {
        &self.step
    }

    fn offers_commander(&self) -> bool {
        self.card.is_legal_commander && !self.had_commander
    }

    pub fn choose_printing(mut self, printing: Printing) -> Self {
        if self.step == AddStep::ChoosePrinting {
            self.step = AddStep::Quantity {
                printing,
                input: "1".to_owned(),
            };
        }
        self
    }

    pub fn edit_quantity(&mut self, value: String) {
        if let AddStep::Quantity { input, .. } = &mut self.step {
            *input = value;
        }
    }

    pub fn submit_quantity(self) -> FlowStep {
        let AddStep::Quantity { printing, input } = &self.step else {
            return FlowStep::Continue(self);
        };

        let quantity = match parse_quantity(input, MAX_ADD_QUANTITY) {
            QuantityInput::Valid(q) => q,
            QuantityInput::Empty => return FlowStep::Cancelled,
            QuantityInput::Invalid => return FlowStep::Invalid,
        };

        if self.offers_commander() {
            let printing = printing.clone();
            FlowStep::Continue(Self {
                step: AddStep::ConfirmCommander { printing, quantity },
                ..self
            })
        } else {
            FlowStep::Submit(AddCardRequest::new(&self.card, printing, quantity, false))
        }
    }

    pub fn answer_commander(self, make_commander: bool) -> FlowStep {
        match &self.step {
            AddStep::ConfirmCommander { printing, quantity } => FlowStep::Submit(
                AddCardRequest::new(&self.card, printing, *quantity, make_commander),
            ),
            _ => FlowStep::Continue(self),
        }
    }
}

#[cfg(test)]
#[path = "flow_tests.rs"]
mod tests;
