use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::Stylize,
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Padding, Widget},
};

use crate::screen::resources::Resources;

/// Non-cancelable notification: a title, a message and optional key-bound
/// actions.
pub struct NotificationWidget<'a> {
    title: &'a str,
    message: &'a str,
    loading: bool,
    actions: Vec<(char, &'a str)>,
    resources: &'a Resources,
}

impl<'a> NotificationWidget<'a> {
    pub fn new(title: &'a str, message: &'a str, resources: &'a Resources) -> Self {
        Self {
            title,
            message,
            loading: false,
            actions: vec![],
            resources,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn actions(mut self, actions: Vec<(char, &'a str)>) -> Self {
        self.actions = actions;
        self
    }
}

impl<'a> Widget for NotificationWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let border_color = if self.loading {
            self.resources.secondary_color
        } else {
            self.resources.main_color
        };

        let block = Block::new()
            .border_type(BorderType::Double)
            .borders(Borders::all())
            .border_style(border_color)
            .padding(Padding::uniform(1))
            .title(self.title)
            .title_alignment(Alignment::Center);

        let mut lines = vec![Line::raw(self.message).fg(self.resources.main_color)];

        if self.loading {
            lines.push(Line::raw("...").fg(self.resources.secondary_color));
        }

        for (key, label) in &self.actions {
            lines.push(Line::from(vec![
                Span::raw(format!("[{}]", key)).bold().fg(self.resources.accent_color),
                Span::raw(" "),
                Span::raw(*label).fg(self.resources.main_color),
            ]));
        }

        let text = Text::from(lines).alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        let [text_area] = Layout::vertical([Constraint::Length(text.height() as u16)])
            .flex(Flex::Center)
            .areas(inner);

        text.render(text_area, buf);
    }
}
