//! Fixed deck geometry and timings.

use crate::game::geometry::{Point, Size, Transform};
use std::f64::consts::PI;

pub const CARD_COUNT: usize = 5;
pub const CARD_SIZE: Size = Size::new(100.0, 150.0);

pub const STAGE_SIZE: Size = Size::new(400.0, 800.0);
/// Distance the fan pivot sits below the stage center.
pub const PIVOT_DROP: f64 = 100.0;

pub const ANGLE_STEP: f64 = PI / 8.0;
pub const FAN_RADIUS: f64 = 150.0;
pub const LIFT_DISTANCE: f64 = 50.0;
pub const REVEAL_SCALE: f64 = 2.2;

// Durations in seconds, before the configured time scale.
pub const FAN_SECS: f64 = 0.3;
pub const FAN_STAGGER_SECS: f64 = 0.1;
pub const LIFT_SECS: f64 = 0.5;
pub const CENTER_SECS: f64 = 0.3;
pub const FLIP_SECS: f64 = 0.3;
pub const RESET_SECS: f64 = 0.3;

pub const FRONT_ASSET: &str = "girl";
pub const BACK_ASSET: &str = "lucky";

pub fn view_center(stage: Size) -> Point {
    Point::new(stage.width / 2.0, stage.height / 2.0)
}

pub fn pivot(stage: Size) -> Point {
    view_center(stage).offset(0.0, PIVOT_DROP)
}

/// Rotation of card `index` in a fan of `count` cards, symmetric about zero.
pub fn fan_angle(index: usize, count: usize) -> f64 {
    ANGLE_STEP * index as f64 - ANGLE_STEP * (count as f64 - 1.0) / 2.0
}

/// Transform placing card `index` on the fan arc around the pivot.
pub fn fan_transform(index: usize, count: usize) -> Transform {
    let angle = fan_angle(index, count);
    Transform::translation(FAN_RADIUS * angle.sin(), -FAN_RADIUS * angle.cos()).rotated(angle)
}

pub fn center_index(count: usize) -> usize {
    count / 2
}
