//! Time-based interpolation of card poses and flip transitions.
//!
//! Nothing here runs on its own. A tween is a record of where a card moves
//! from and to, and when. The renderer samples it at the current instant, and
//! the controller sleeps until its end instant.

use crate::game::geometry::{Point, Transform};
use std::f64::consts::PI;
use std::time::Duration;
use tokio::time::Instant;

/// Smoothstep ease-in-out over `t` clamped to `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Duration and start delay of one animation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub duration: Duration,
    pub delay: Duration,
}

impl Timing {
    pub fn new(secs: f64) -> Self {
        Self {
            duration: Duration::from_secs_f64(secs),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(self, secs: f64) -> Self {
        Self {
            delay: Duration::from_secs_f64(secs),
            ..self
        }
    }

    /// Stretch (factor > 1) or compress both duration and delay.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            duration: self.duration.mul_f64(factor),
            delay: self.delay.mul_f64(factor),
            ..self
        }
    }
}

/// Where a card sits: its frame center plus a transform about that center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub center: Point,
    pub transform: Transform,
}

impl Pose {
    pub fn new(center: Point, transform: Transform) -> Self {
        Self { center, transform }
    }

    /// On-screen position of the card's middle.
    pub fn position(&self) -> Point {
        self.center.offset(self.transform.tx, self.transform.ty)
    }

    pub fn lerp(self, to: Pose, t: f64) -> Self {
        Self {
            center: self.center.lerp(to.center, t),
            transform: self.transform.lerp(to.transform, t),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Tween {
    pub from: Pose,
    pub to: Pose,
    pub start: Instant,
    pub duration: Duration,
}

impl Tween {
    /// Schedule a tween at `now`, honoring the timing's delay.
    pub fn schedule(from: Pose, to: Pose, now: Instant, timing: Timing) -> Self {
        Self {
            from,
            to,
            start: now + timing.delay,
            duration: timing.duration,
        }
    }

    pub fn end(&self) -> Instant {
        self.start + self.duration
    }

    pub fn progress(&self, now: Instant) -> f64 {
        progress(self.start, self.duration, now)
    }

    pub fn sample(&self, now: Instant) -> Pose {
        self.from.lerp(self.to, ease_in_out(self.progress(now)))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.end()
    }
}

/// A flip-from-left transition. The face swaps at the midpoint.
#[derive(Debug, Clone, Copy)]
pub struct FlipTransition {
    pub start: Instant,
    pub duration: Duration,
}

impl FlipTransition {
    pub fn end(&self) -> Instant {
        self.start + self.duration
    }

    pub fn midpoint(&self) -> Instant {
        self.start + self.duration / 2
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now >= self.start && now < self.end()
    }

    /// Horizontal squash of the card while turning: 1 flat, 0 edge-on.
    pub fn squash(&self, now: Instant) -> f64 {
        (PI * progress(self.start, self.duration, now)).cos().abs()
    }
}

fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if now <= start {
        return 0.0;
    }
    if duration.is_zero() {
        return 1.0;
    }
    (now.duration_since(start).as_secs_f64() / duration.as_secs_f64()).min(1.0)
}
