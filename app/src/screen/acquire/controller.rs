use input_mapping_common::InputMappingT;
use input_mapping_derive::InputMapping;
use ratatui::crossterm::event::Event;

use super::Model;
use crate::{api::connect::ConnectApiT, screen::OutgoingMessage};

#[derive(InputMapping)]
pub enum InputEvent {
    #[key = 'q']
    #[description = "Quit application"]
    Quit,

    #[key = 'h']
    #[description = "Open/close navigation help"]
    NavigationHelp,

    #[key = 'a']
    #[description = "Acquire device"]
    AcquireDevice,
}

pub(super) fn process_input<C: ConnectApiT>(
    event: &Event,
    model: &mut Model<C>,
) -> Option<OutgoingMessage> {
    let event = InputEvent::map_event(event.clone())?;

    match event {
        InputEvent::Quit => Some(OutgoingMessage::Exit),
        InputEvent::NavigationHelp => {
            model.show_navigation_help ^= true;
            None
        }
        InputEvent::AcquireDevice => {
            // The action only exists while no acquisition is running.
            if !model.store.state().acquiring {
                model.acquire_requested = true;
            }
            None
        }
    }
}
