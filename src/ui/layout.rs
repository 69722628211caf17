use ratatui::layout::{Constraint, Direction, Layout, Rect};

const BUTTON_WIDTH: u16 = 17;
const EVENT_LOG_HEIGHT: u16 = 8;

pub struct AppLayout {
    pub table: Rect,
    pub button: Rect,
    pub event_log: Option<Rect>,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect, show_event_log: bool) -> AppLayout {
    let log_height = if show_event_log { EVENT_LOG_HEIGHT } else { 0 };

    // Vertical: table | button row | event log | status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),             // Table
            Constraint::Length(3),          // Button row
            Constraint::Length(log_height), // Event log
            Constraint::Length(1),          // Status bar
        ])
        .split(area);

    let button_row = chunks[1];
    let width = BUTTON_WIDTH.min(button_row.width);
    let button = Rect::new(
        button_row.x + (button_row.width - width) / 2,
        button_row.y,
        width,
        button_row.height,
    );

    AppLayout {
        table: chunks[0],
        button,
        event_log: show_event_log.then_some(chunks[2]),
        status_bar: chunks[3],
    }
}
