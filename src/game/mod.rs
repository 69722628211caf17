//! Card table core: geometry, animation records, the stage and the state
//! machine that drives it. Nothing in here touches the terminal.

pub mod anim;
pub mod cancel;
pub mod card;
pub mod controller;
pub mod error;
pub mod fan;
pub mod geometry;
pub mod stage;

pub use controller::{GameController, GameEvent, TapOutcome};
pub use stage::{GameState, TableView};
