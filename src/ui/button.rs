use crate::game::stage::Button;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, button: &Button) {
    let label_style = if button.enabled {
        Theme::button_enabled()
    } else {
        Theme::button_disabled()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::button_border(button.enabled));

    let paragraph = Paragraph::new(Line::from(Span::styled(button.label, label_style)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
