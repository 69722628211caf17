use crate::game::GameEvent;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Progress reported by the game controller
    Game(GameEvent),

    /// Tick for UI refresh
    Tick,
}
