use crate::game::TableView;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const HINTS: &str = " Enter/m: Match  q: Quit ";

pub fn render(frame: &mut Frame, area: Rect, view: &TableView) {
    let mut parts: Vec<Span> = Vec::new();

    parts.push(Span::styled(
        format!(" [{}] ", view.state.to_string().to_uppercase()),
        Theme::state_badge(view.state),
    ));

    let selection = match view.selection {
        Some(index) => format!(" card {} ", index),
        None => " no selection ".to_string(),
    };
    parts.push(Span::styled(selection, Theme::status_bar()));

    if view.animating {
        parts.push(Span::styled(" ~ ", Theme::status_bar()));
    }

    // Pad to push the key hints to the right edge
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + HINTS.width());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(HINTS, Theme::status_bar()));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
