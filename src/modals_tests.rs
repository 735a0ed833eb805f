use super::*;

fn printing(id: &str, set_code: &str) -> Printing {
    Printing {
        id: id.to_string(),
        name: Some("Sol Ring".to_string()),
        set_code: Some(set_code.to_string()),
        set_name: None,
        collector_number: Some("1".to_string()),
        rarity: Some("uncommon".to_string()),
        image_url: None,
        image_url_small: None,
    }
}

fn loaded_picker(modals: &mut Modals, purpose: PrintPurpose) -> u64 {
    let token = modals.open_print_picker("Sol Ring", purpose);
    modals.printings_loaded(
        token,
        Some(vec![printing("p1", "c21"), printing("p2", "cmr")]),
    );
    token
}

mod stacking {
    use super::*;

    #[test]
    fn last_opened_is_on_top() {
        let mut modals = Modals::default();
        modals.open_options(OptionsEditor {
            card_id: "sol".to_string(),
            card_name: "Sol Ring".to_string(),
            quantity_input: "1".to_string(),
            image_url: None,
            printing_label: None,
        });
        modals.open_print_picker(
            "Sol Ring",
            PrintPurpose::ChangePrinting {
                card_id: "sol".to_string(),
            },
        );

        assert_eq!(modals.top(), Some(ModalKind::PrintSelection));

        modals.close(ModalKind::PrintSelection);
        assert_eq!(modals.top(), Some(ModalKind::Options));
        assert!(modals.options().is_some());
    }

    #[test]
    fn closing_unknown_kind_is_harmless() {
        let mut modals = Modals::default();
        assert_eq!(modals.close(ModalKind::CardDetail), None);
        assert_eq!(modals.top(), None);
    }
}

mod print_picker {
    use super::*;

    #[test]
    fn loading_then_states() {
        let mut modals = Modals::default();
        let token = modals.open_print_picker("Sol Ring", PrintPurpose::AddToDeck);
        assert_eq!(modals.print_picker().unwrap().status, PrintStatus::Loading);

        modals.printings_loaded(token, Some(Vec::new()));
        assert_eq!(modals.print_picker().unwrap().status, PrintStatus::Empty);

        modals.printings_loaded(token, None);
        assert_eq!(modals.print_picker().unwrap().status, PrintStatus::Failed);
    }

    #[test]
    fn response_for_previous_opening_is_ignored() {
        let mut modals = Modals::default();
        let old = modals.open_print_picker("Sol Ring", PrintPurpose::AddToDeck);
        let new = modals.open_print_picker("Arcane Signet", PrintPurpose::AddToDeck);

        modals.printings_loaded(old, Some(vec![printing("p1", "c21")]));

        let picker = modals.print_picker().unwrap();
        assert_eq!(picker.token(), new);
        assert_eq!(picker.status, PrintStatus::Loading);
    }

    #[test]
    fn selection_fires_once_and_closes() {
        let mut modals = Modals::default();
        let token = loaded_picker(&mut modals, PrintPurpose::AddToDeck);

        assert!(modals.select_printing(token, 0));
        assert!(modals.select_printing(token, 1));

        let (chosen, purpose) = modals.confirm_printing(token).unwrap();
        assert_eq!(chosen.id, "p2");
        assert_eq!(purpose, PrintPurpose::AddToDeck);
        assert!(!modals.is_open(ModalKind::PrintSelection));

        assert_eq!(modals.confirm_printing(token), None);
        assert!(!modals.select_printing(token, 0));
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut modals = Modals::default();
        let token = loaded_picker(&mut modals, PrintPurpose::AddToDeck);

        assert!(!modals.select_printing(token, 5));
        assert_eq!(modals.confirm_printing(token), None);
    }

    #[test]
    fn closing_unfired_picker_reports_abandoned_purpose() {
        let mut modals = Modals::default();
        loaded_picker(
            &mut modals,
            PrintPurpose::ChangePrinting {
                card_id: "sol".to_string(),
            },
        );

        assert_eq!(
            modals.close(ModalKind::PrintSelection),
            Some(PrintPurpose::ChangePrinting {
                card_id: "sol".to_string()
            })
        );
    }

    #[test]
    fn timer_from_closed_picker_does_nothing() {
        let mut modals = Modals::default();
        let token = loaded_picker(&mut modals, PrintPurpose::AddToDeck);
        modals.select_printing(token, 0);
        modals.close(ModalKind::PrintSelection);

        assert_eq!(modals.confirm_printing(token), None);
    }
}

mod options_editor {
    use super::*;

    fn editor(input: &str) -> OptionsEditor {
        OptionsEditor {
            card_id: "sol".to_string(),
            card_name: "Sol Ring".to_string(),
            quantity_input: input.to_string(),
            image_url: None,
            printing_label: None,
        }
    }

    #[test]
    fn quantity_range_is_one_to_hundred() {
        assert_eq!(editor("1").validated_quantity(), Some(1));
        assert_eq!(editor("100").validated_quantity(), Some(100));
        assert_eq!(editor("0").validated_quantity(), None);
        assert_eq!(editor("101").validated_quantity(), None);
        assert_eq!(editor("").validated_quantity(), None);
        assert_eq!(editor("ten").validated_quantity(), None);
    }

    #[test]
    fn built_from_deck_card() {
        let deck_card: DeckCard = serde_json::from_value(serde_json::json!({
            "card_id": "sol",
            "quantity": 3,
            "selected_image_url": "https://img/sol.jpg",
            "selected_set_code": "c21",
            "selected_collector_number": "263",
            "card": { "id": "sol", "name": "Sol Ring" }
        }))
        .unwrap();

        let editor = OptionsEditor::for_deck_card(&deck_card);

        assert_eq!(editor.card_name, "Sol Ring");
        assert_eq!(editor.quantity_input, "3");
        assert_eq!(editor.printing_label.as_deref(), Some("C21 #263"));
    }

    #[test]
    fn edits_update_input() {
        let mut modals = Modals::default();
        modals.open_options(editor("1"));
        modals.edit_options_quantity("42".to_string());

        assert_eq!(modals.options().unwrap().validated_quantity(), Some(42));
    }
}

#[test]
fn take_prompt_closes_it() {
    let mut modals = Modals::default();
    modals.open_prompt(Prompt::Confirm {
        question: "Remove Sol Ring from deck?".to_string(),
        action: ConfirmAction::RemoveCard {
            card_id: "sol".to_string(),
        },
    });

    assert_eq!(modals.top(), Some(ModalKind::Prompt));
    assert!(matches!(modals.take_prompt(), Some(Prompt::Confirm { .. })));
    assert_eq!(modals.top(), None);
    assert_eq!(modals.prompt(), None);
}
