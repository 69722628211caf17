mod button;
mod event_log;
pub mod layout;
mod status_bar;
mod table;
mod theme;

use crate::app::state::AppState;
use crate::game::TableView;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState, view: &TableView) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area, state.config.ui.show_event_log);

    table::render(frame, app_layout.table, view);
    button::render(frame, app_layout.button, &view.button);
    if let Some(log_area) = app_layout.event_log {
        event_log::render(frame, log_area, state);
    }
    status_bar::render(frame, app_layout.status_bar, view);
}
