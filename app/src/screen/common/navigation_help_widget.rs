use ratatui::{
    buffer::Buffer,
    crossterm::event::KeyCode,
    layout::Rect,
    style::Stylize,
    text::{Line, Span},
    widgets::Widget,
};

pub struct NavigationHelpWidget {
    key_bindings: Vec<(KeyCode, String)>,
}

impl NavigationHelpWidget {
    pub fn new(key_bindings: Vec<(KeyCode, String)>) -> Self {
        Self { key_bindings }
    }

    pub fn height(&self) -> usize {
        self.key_bindings.len()
    }

    pub fn min_width(&self) -> usize {
        self.key_bindings
            .iter()
            .map(|(key, description)| key_label(key).len() + description.len() + 3)
            .max()
            .unwrap_or(0)
    }
}

impl Widget for NavigationHelpWidget {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        for (idx, (key, description)) in self
            .key_bindings
            .iter()
            .take(area.height as usize)
            .enumerate()
        {
            let line = Line::from(vec![
                Span::raw(format!("[{}]", key_label(key))).bold(),
                Span::raw(" "),
                Span::raw(description.clone()),
            ]);

            buf.set_line(area.x, area.y + idx as u16, &line, area.width);
        }
    }
}

fn key_label(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(ch) => ch.to_string(),
        other => format!("{}", other),
    }
}
