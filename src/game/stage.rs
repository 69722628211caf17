//! Everything on the table: the cards, their stacking order, the game state
//! and the action button.

use crate::game::anim::Pose;
use crate::game::card::{CardSprite, CardView};
use crate::game::fan::{self, CARD_COUNT, STAGE_SIZE};
use crate::game::geometry::{Point, Size, Transform};
use std::fmt;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Cards stacked and hidden at the pivot.
    Initial,
    /// Cards spread in a fan.
    Unfolded,
    /// Center card moving into the spotlight.
    Selected,
    /// Center card face up.
    Revealed,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameState::Initial => "initial",
            GameState::Unfolded => "unfolded",
            GameState::Selected => "selected",
            GameState::Revealed => "revealed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub enabled: bool,
}

impl Button {
    fn new() -> Self {
        Self {
            label: "Match",
            enabled: false,
        }
    }
}

#[derive(Debug)]
pub struct Stage {
    size: Size,
    cards: Vec<CardView>,
    /// Card indices from bottom to top.
    z_order: Vec<usize>,
    state: GameState,
    selection: Option<usize>,
    pub(crate) button: Button,
}

impl Stage {
    pub fn new() -> Self {
        let size = STAGE_SIZE;
        let home = Pose::new(fan::pivot(size), Transform::IDENTITY);
        Self {
            size,
            cards: (0..CARD_COUNT).map(|i| CardView::new(i, home)).collect(),
            z_order: (0..CARD_COUNT).collect(),
            state: GameState::Initial,
            selection: None,
            button: Button::new(),
        }
    }

    pub fn pivot(&self) -> Point {
        fan::pivot(self.size)
    }

    pub fn view_center(&self) -> Point {
        fan::view_center(self.size)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn card(&self, index: usize) -> &CardView {
        &self.cards[index]
    }

    pub fn card_mut(&mut self, index: usize) -> &mut CardView {
        &mut self.cards[index]
    }

    /// Set the state, returning the one it replaces.
    pub(crate) fn set_state(&mut self, state: GameState) -> GameState {
        std::mem::replace(&mut self.state, state)
    }

    pub(crate) fn select(&mut self, index: usize) {
        self.selection = Some(index);
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Whether any card has been dealt out of the hidden stack.
    pub fn is_dealt(&self) -> bool {
        self.cards.iter().any(|c| !c.is_hidden())
    }

    pub fn bring_to_front(&mut self, index: usize) {
        self.z_order.retain(|&i| i != index);
        self.z_order.push(index);
    }

    #[cfg(test)]
    pub fn z_order(&self) -> &[usize] {
        &self.z_order
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.cards.iter().any(|c| c.is_animating(now))
    }

    pub fn snapshot(&self, now: Instant) -> TableView {
        TableView {
            size: self.size,
            sprites: self
                .z_order
                .iter()
                .map(|&i| self.cards[i].sprite(now))
                .collect(),
            state: self.state,
            selection: self.selection,
            button: self.button.clone(),
            animating: self.is_animating(now),
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

/// A frozen, render-ready copy of the stage.
#[derive(Debug, Clone)]
pub struct TableView {
    pub size: Size,
    /// Bottom to top.
    pub sprites: Vec<CardSprite>,
    pub state: GameState,
    pub selection: Option<usize>,
    pub button: Button,
    pub animating: bool,
}
