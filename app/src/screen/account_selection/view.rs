use input_mapping_common::InputMappingT;
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState},
    Frame,
};

use super::{controller, Model};
use crate::{
    api::{connect::ConnectApiT, fiat_rates::FiatRatesApiT},
    screen::{
        common::{self, BackgroundWidget},
        resources::Resources,
    },
    state::selectors::{
        self, AccountRowViewModel, AccountSelectionViewModel, DiscoveryIndicator,
    },
};

pub(super) fn render<C: ConnectApiT, F: FiatRatesApiT>(
    model: &Model<C, F>,
    frame: &mut Frame<'_>,
    resources: &Resources,
) {
    let area = frame.area();

    frame.render_widget(BackgroundWidget::new(resources.background_color), area);

    // Unresolvable coin (or no device/route yet): intentionally render
    // nothing, not even the back link.
    if let Some(view_model) = selectors::account_selection(model.store.state()) {
        render_selection(model, &view_model, frame, resources);
    }

    if model.show_navigation_help {
        let mapping = controller::InputEvent::get_mapping();
        common::render_navigation_help(mapping, frame, resources);
    }
}

fn render_selection<C: ConnectApiT, F: FiatRatesApiT>(
    model: &Model<C, F>,
    view_model: &AccountSelectionViewModel,
    frame: &mut Frame<'_>,
    resources: &Resources,
) {
    let area = frame.area().inner(Margin::new(2, 1));

    let [back_area, rows_area, status_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(area);

    render_back_link(view_model, frame, back_area, resources);
    render_rows(model, &view_model.rows, frame, rows_area, resources);
    render_discovery_status(view_model.indicator.as_ref(), frame, status_area, resources);
}

fn render_back_link(
    view_model: &AccountSelectionViewModel,
    frame: &mut Frame<'_>,
    area: Rect,
    resources: &Resources,
) {
    let color = common::network_color(view_model.network);

    let link = Line::from(vec![
        Span::raw("« ").fg(resources.secondary_color),
        Span::raw(common::network_symbol(view_model.network)).fg(color),
        Span::raw(" "),
        Span::raw(view_model.coin_name.clone()).fg(color).bold(),
        Span::raw(format!("  {}", view_model.back_url)).fg(resources.secondary_color),
    ]);

    frame.render_widget(link, area);
}

fn render_rows<C: ConnectApiT, F: FiatRatesApiT>(
    model: &Model<C, F>,
    rows: &[AccountRowViewModel],
    frame: &mut Frame<'_>,
    area: Rect,
    resources: &Resources,
) {
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let title = Span::raw(format!("Account #{}", row.index + 1));
            let title = if row.is_selected {
                title.fg(resources.accent_color).bold()
            } else {
                title.fg(resources.main_color)
            };

            let balance = row
                .balance
                .clone()
                .unwrap_or_else(|| selectors::LOADING_BALANCE.to_string());

            ListItem::new(Text::from(vec![
                Line::from(title),
                Line::raw(balance).fg(resources.secondary_color),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::new()
                .bg(resources.accent_color)
                .fg(resources.background_color),
        )
        .highlight_symbol(">>");

    let mut list_state = ListState::default().with_selected(model.selected_row);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_discovery_status(
    indicator: Option<&DiscoveryIndicator>,
    frame: &mut Frame<'_>,
    area: Rect,
    resources: &Resources,
) {
    let Some(indicator) = indicator else {
        return;
    };

    let lines = match indicator {
        DiscoveryIndicator::AddAccount { enabled: true } => vec![Line::from(vec![
            Span::raw("[a]").fg(resources.accent_color).bold(),
            Span::raw(" Add account").fg(resources.main_color),
        ])],
        DiscoveryIndicator::AddAccount { enabled: false } => vec![
            Line::raw("Add account").fg(resources.secondary_color),
            Line::raw(selectors::ADD_ACCOUNT_TOOLTIP)
                .fg(resources.secondary_color)
                .italic(),
        ],
        DiscoveryIndicator::ReconnectDevice { instance_label } => vec![
            Line::raw("Accounts could not be loaded").fg(resources.error_color),
            Line::raw(format!("Connect {} device", instance_label))
                .fg(resources.error_color),
        ],
        DiscoveryIndicator::Loading => {
            vec![Line::raw("Loading accounts...").fg(resources.secondary_color)]
        }
    };

    frame.render_widget(Text::from(lines), area);
}
