use crate::game::GameState;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub const TABLE_BG: Color = Color::Yellow;
    pub const CARD_EDGE: Color = Color::Black;
    pub const CARD_BACK: Color = Color::Red;
    pub const CARD_FRONT: Color = Color::Magenta;
    pub const ACCENT: Color = Color::Cyan;

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn timestamp() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn state_message() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn card_message() -> Style {
        Style::default().fg(Color::Magenta)
    }

    pub fn system_message() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn card_label() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_enabled() -> Style {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    }

    pub fn button_disabled() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn button_border(enabled: bool) -> Style {
        if enabled {
            Style::default().fg(Self::ACCENT)
        } else {
            Self::border()
        }
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn state_badge(state: GameState) -> Style {
        let fg = match state {
            GameState::Initial => Color::Gray,
            GameState::Unfolded => Color::Green,
            GameState::Selected => Color::Yellow,
            GameState::Revealed => Color::Magenta,
        };
        Style::default()
            .fg(fg)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }
}
