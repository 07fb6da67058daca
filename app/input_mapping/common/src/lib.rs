use ratatui::crossterm::event::{Event, KeyCode};

/// Mapping between terminal key events and the input alphabet of a screen
/// controller. Implemented via `#[derive(InputMapping)]`.
pub trait InputMappingT: Sized {
    /// Key bindings with their descriptions, used by the help overlay.
    fn get_mapping() -> InputMapping;

    /// Maps a key-press event to an input, `None` if the event is unbound.
    fn map_event(event: Event) -> Option<Self>;
}

#[derive(Debug)]
pub struct InputMapping {
    pub mapping: Vec<MappingEntry>,
}

impl InputMapping {
    pub fn merge(mut self, mut other: InputMapping) -> Self {
        self.mapping.append(&mut other.mapping);
        self
    }
}

#[derive(Debug)]
pub struct MappingEntry {
    pub key: KeyCode,
    pub description: String,
}
