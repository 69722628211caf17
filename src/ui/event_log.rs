use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Events ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());

    // Newest at the bottom: keep only what fits.
    let visible = area.height.saturating_sub(2) as usize;
    let skip = state.log.len().saturating_sub(visible);

    let items: Vec<ListItem> = state
        .log
        .iter()
        .skip(skip)
        .map(|entry| {
            let text_style = match entry.kind {
                LogKind::State => Theme::state_message(),
                LogKind::Card => Theme::card_message(),
                LogKind::System => Theme::system_message(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", entry.timestamp), Theme::timestamp()),
                Span::styled(entry.text.as_str(), text_style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
