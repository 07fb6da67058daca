use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Stylize},
    text::Line,
    widgets::Widget,
};

/// Opaque single-color fill drawn under every screen.
pub struct BackgroundWidget {
    color: Color,
}

impl BackgroundWidget {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Widget for BackgroundWidget {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let filler = Line::raw(" ".repeat(area.width as usize)).bg(self.color);
        for y in area.top()..area.bottom() {
            buf.set_line(area.left(), y, &filler, area.width);
        }
    }
}
