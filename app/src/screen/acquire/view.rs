use input_mapping_common::InputMappingT;
use ratatui::{layout::Margin, Frame};

use super::{controller, Model};
use crate::{
    api::connect::ConnectApiT,
    screen::{
        common::{self, BackgroundWidget, NotificationWidget},
        resources::Resources,
    },
    state::selectors,
};

pub(super) fn render<C: ConnectApiT>(
    model: &Model<C>,
    frame: &mut Frame<'_>,
    resources: &Resources,
) {
    let area = frame.area();

    frame.render_widget(BackgroundWidget::new(resources.background_color), area);

    let notice = selectors::acquire_notice(model.store.state());

    let actions = notice
        .actions
        .iter()
        .map(|action| ('a', action.label()))
        .collect();

    let widget = NotificationWidget::new(notice.title, notice.message, resources)
        .loading(notice.loading)
        .actions(actions);

    let notice_area = area.inner(Margin::new(8, 4));
    frame.render_widget(widget, notice_area);

    if model.show_navigation_help {
        let mapping = controller::InputEvent::get_mapping();
        common::render_navigation_help(mapping, frame, resources);
    }
}
