#![cfg(test)]

use std::collections::HashMap;

use input_mapping_common::InputMappingT;
use input_mapping_derive::InputMapping;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

#[derive(InputMapping, Debug, PartialEq, Eq)]
enum ScreenInput {
    #[key = 'q']
    #[description = "Quit application"]
    Quit,

    #[description = "Open/close navigation help"]
    Help,

    #[allow(dead_code)]
    List(ListInput),
}

#[derive(InputMapping, Debug, PartialEq, Eq)]
enum ListInput {
    #[key = "KeyCode::Down"]
    #[description = "Navigate down in list"]
    Down,

    #[key = "KeyCode::Up"]
    #[description = "Navigate up in list"]
    Up,

    Select,
}

fn key_pressed(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    })
}

#[test]
fn test_input_mapping_generated_as_expected() {
    let mapping = ScreenInput::get_mapping();
    let mapping: HashMap<_, _> = mapping
        .mapping
        .into_iter()
        .map(|map| (map.key, map.description))
        .collect();

    assert_eq!(mapping.len(), 5);
    assert_eq!(
        mapping.get(&KeyCode::Char('q')),
        Some(&"Quit application".to_string())
    );
    assert_eq!(
        mapping.get(&KeyCode::Char('h')),
        Some(&"Open/close navigation help".to_string())
    );
    assert_eq!(mapping.get(&KeyCode::Char('s')), Some(&"".to_string()));
    assert_eq!(
        mapping.get(&KeyCode::Down),
        Some(&"Navigate down in list".to_string())
    );
    assert_eq!(
        mapping.get(&KeyCode::Up),
        Some(&"Navigate up in list".to_string())
    );
}

#[test]
fn test_events_mapped_as_expected() {
    assert_eq!(
        ScreenInput::map_event(key_pressed(KeyCode::Char('q'))),
        Some(ScreenInput::Quit)
    );
    assert_eq!(
        ScreenInput::map_event(key_pressed(KeyCode::Down)),
        Some(ScreenInput::List(ListInput::Down))
    );
    assert_eq!(
        ScreenInput::map_event(key_pressed(KeyCode::Char('s'))),
        Some(ScreenInput::List(ListInput::Select))
    );
    assert_eq!(ScreenInput::map_event(key_pressed(KeyCode::Char('x'))), None);

    let released = Event::Key(KeyEvent {
        code: KeyCode::Char('q'),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    });
    assert_eq!(ScreenInput::map_event(released), None);
}
