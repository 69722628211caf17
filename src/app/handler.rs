use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::game::card::Face;
use crate::game::GameEvent;
use crate::ui::layout;
use crossterm::event::{
    Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Position, Rect};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::Game(game_event) => {
            state.dirty = true;
            handle_game_event(state, game_event);
            vec![]
        }
        AppEvent::Tick => vec![],
    }
}

fn handle_game_event(state: &mut AppState, event: GameEvent) {
    match event {
        GameEvent::StateChanged { from, to } => {
            state.push_log(LogKind::State, format!("{} -> {}", from, to));
        }
        GameEvent::CardSelected { index } => {
            state.push_log(LogKind::Card, format!("Card {} selected", index));
        }
        GameEvent::CardFlipped { index, face_up } => {
            let face = if face_up { Face::Front } else { Face::Back };
            let side = if face_up { "up" } else { "down" };
            state.push_log(
                LogKind::Card,
                format!("Card {} face {} ({})", index, side, face.asset()),
            );
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) => handle_key(key),
        CEvent::Mouse(mouse) => handle_mouse(state, mouse),
        CEvent::Resize(width, height) => {
            state.viewport = Rect::new(0, 0, width, height);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(key: KeyEvent) -> Vec<Action> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('m') | KeyCode::Char('M') => {
            vec![Action::PressButton]
        }
        _ => vec![],
    }
}

fn handle_mouse(state: &AppState, mouse: MouseEvent) -> Vec<Action> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return vec![];
    }
    let app_layout = layout::compute_layout(state.viewport, state.config.ui.show_event_log);
    if app_layout.button.contains(Position::new(mouse.column, mouse.row)) {
        vec![Action::PressButton]
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::game::GameState;

    fn state() -> AppState {
        let mut state = AppState::new(AppConfig::default());
        state.viewport = Rect::new(0, 0, 80, 40);
        state
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn click(column: u16, row: u16) -> AppEvent {
        AppEvent::Terminal(CEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    #[test]
    fn test_keys_map_to_actions() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, key(KeyCode::Enter)), vec![Action::PressButton]);
        assert_eq!(handle_event(&mut state, key(KeyCode::Char(' '))), vec![Action::PressButton]);
        assert_eq!(handle_event(&mut state, key(KeyCode::Char('m'))), vec![Action::PressButton]);
        assert_eq!(handle_event(&mut state, key(KeyCode::Char('q'))), vec![Action::Quit]);
        assert_eq!(handle_event(&mut state, key(KeyCode::Esc)), vec![Action::Quit]);
        assert!(handle_event(&mut state, key(KeyCode::Char('x'))).is_empty());

        let ctrl_c = AppEvent::Terminal(CEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(handle_event(&mut state, ctrl_c), vec![Action::Quit]);
    }

    #[test]
    fn test_click_on_button_presses_it() {
        let mut state = state();
        let button = layout::compute_layout(state.viewport, true).button;
        let inside = click(button.x + button.width / 2, button.y + 1);
        assert_eq!(handle_event(&mut state, inside), vec![Action::PressButton]);
        assert!(handle_event(&mut state, click(0, 0)).is_empty());
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut state = state();
        state.dirty = false;
        handle_event(&mut state, AppEvent::Terminal(CEvent::Resize(120, 50)));
        assert_eq!(state.viewport, Rect::new(0, 0, 120, 50));
        assert!(state.dirty);
    }

    #[test]
    fn test_game_events_are_logged() {
        let mut state = state();
        state.dirty = false;
        handle_event(
            &mut state,
            AppEvent::Game(GameEvent::StateChanged {
                from: GameState::Unfolded,
                to: GameState::Selected,
            }),
        );
        handle_event(
            &mut state,
            AppEvent::Game(GameEvent::CardFlipped {
                index: 2,
                face_up: true,
            }),
        );
        let texts: Vec<_> = state.log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["unfolded -> selected", "Card 2 face up (girl)"]);
        assert_eq!(state.log[0].kind, LogKind::State);
        assert!(state.dirty);
    }
}
