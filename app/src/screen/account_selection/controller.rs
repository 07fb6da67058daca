use input_mapping_common::InputMappingT;
use input_mapping_derive::InputMapping;
use ratatui::crossterm::event::Event;

use super::Model;
use crate::{
    api::{connect::ConnectApiT, fiat_rates::FiatRatesApiT},
    screen::OutgoingMessage,
    state::{
        selectors::{self, DiscoveryIndicator},
        store::Action,
    },
};

#[derive(InputMapping)]
pub enum InputEvent {
    #[key = 'q']
    #[description = "Quit application"]
    Quit,

    #[key = 'h']
    #[description = "Open/close navigation help"]
    NavigationHelp,

    #[key = "KeyCode::Down"]
    #[description = "Navigate down in list"]
    Down,

    #[key = "KeyCode::Up"]
    #[description = "Navigate up in list"]
    Up,

    #[key = "KeyCode::Enter"]
    #[description = "Open selected account"]
    OpenAccount,

    #[key = 'a']
    #[description = "Add account"]
    AddAccount,

    #[key = 'b']
    #[description = "Back to device"]
    Back,
}

pub(super) fn process_input<C: ConnectApiT, F: FiatRatesApiT>(
    event: &Event,
    model: &mut Model<C, F>,
) -> Option<OutgoingMessage> {
    let event = InputEvent::map_event(event.clone())?;

    match event {
        InputEvent::Quit => return Some(OutgoingMessage::Exit),
        InputEvent::NavigationHelp => {
            model.show_navigation_help ^= true;
            return None;
        }
        _ => {}
    }

    // Without a resolvable view model the screen shows nothing, so there is
    // nothing to act on either.
    let Some(view_model) = selectors::account_selection(model.store.state()) else {
        return None;
    };

    match event {
        InputEvent::Down => {
            if !view_model.rows.is_empty() {
                if let Some(selected) = model.selected_row.as_mut() {
                    *selected = (view_model.rows.len() - 1).min(*selected + 1);
                } else {
                    model.selected_row = Some(0);
                }
            }
        }
        InputEvent::Up => {
            if !view_model.rows.is_empty() {
                if let Some(selected) = model.selected_row.as_mut() {
                    *selected = selected.saturating_sub(1);
                } else {
                    model.selected_row = Some(view_model.rows.len() - 1);
                }
            }
        }
        InputEvent::OpenAccount => {
            let row = model
                .selected_row
                .and_then(|selected| view_model.rows.get(selected));

            if let Some(row) = row {
                let mut location = model
                    .store
                    .state()
                    .location
                    .clone()
                    .expect("Location should be present");
                location.pathname = row.url.clone();

                model.store.dispatch(Action::Navigate { location });
            }
        }
        InputEvent::AddAccount => {
            if matches!(
                view_model.indicator,
                Some(DiscoveryIndicator::AddAccount { enabled: true })
            ) {
                model.add_account_requested = true;
            }
        }
        InputEvent::Back => {
            let mut location = model
                .store
                .state()
                .location
                .clone()
                .expect("Location should be present");
            location.pathname = view_model.back_url.clone();

            model.store.dispatch(Action::Navigate { location });
        }
        InputEvent::Quit | InputEvent::NavigationHelp => unreachable!(),
    }

    None
}
