use input_mapping_common::InputMapping;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Margin},
    style::{Color, Stylize},
    widgets::{Block, BorderType, Borders, Padding},
    Frame,
};

use crate::api::common_types::Network;

mod api_task;
pub use api_task::*;

mod background_widget;
pub use background_widget::*;

mod navigation_help_widget;
pub use navigation_help_widget::*;

mod notification_widget;
pub use notification_widget::*;

use super::resources::Resources;

pub fn network_symbol(network: Network) -> String {
    match network {
        Network::Ethereum => "⟠",
        Network::EthereumClassic => "ξ",
        Network::Ropsten => "⟠ₜ",
    }
    .to_string()
}

pub fn network_color(network: Network) -> Color {
    match network {
        Network::Ethereum => Color::Blue,
        Network::EthereumClassic => Color::Green,
        Network::Ropsten => Color::Gray,
    }
}

pub fn render_navigation_help(
    input_mapping: InputMapping,
    frame: &mut Frame<'_>,
    resources: &Resources,
) {
    let area = frame.area();

    let bindings = input_mapping
        .mapping
        .into_iter()
        .map(|map| (map.key, map.description))
        .collect();

    let widget = NavigationHelpWidget::new(bindings);

    let block_area = area.inner(Margin::new(8, 4));

    let width = widget.min_width().max(block_area.width as usize / 2);
    let height = widget.height();

    let block = Block::new()
        .border_type(BorderType::Double)
        .borders(Borders::all())
        .border_style(resources.main_color)
        .padding(Padding::proportional(1))
        .title("Help")
        .title_alignment(Alignment::Center)
        .reset()
        .bg(resources.background_color)
        .fg(resources.main_color);

    let block_inner = block.inner(block_area);

    let [widget_area] = Layout::horizontal([Constraint::Length(width as u16)])
        .flex(Flex::Center)
        .areas(block_inner);
    let [widget_area] = Layout::vertical([Constraint::Length(height as u16)])
        .flex(Flex::Center)
        .areas(widget_area);

    frame.render_widget(
        BackgroundWidget::new(resources.background_color),
        block_area,
    );
    frame.render_widget(block, block_area);

    frame.render_widget(widget, widget_area);
}
