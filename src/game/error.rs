//! Errors surfaced by running animation sequences.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("animation sequence cancelled")]
    Cancelled,
}
