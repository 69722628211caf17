//! A double-sided card and its animation bookkeeping.

use crate::game::anim::{FlipTransition, Pose, Timing, Tween};
use crate::game::fan::{BACK_ASSET, FRONT_ASSET};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Back,
    Front,
}

impl Face {
    pub fn asset(self) -> &'static str {
        match self {
            Face::Back => BACK_ASSET,
            Face::Front => FRONT_ASSET,
        }
    }

    fn turned(self) -> Self {
        match self {
            Face::Back => Face::Front,
            Face::Front => Face::Back,
        }
    }
}

/// What the renderer needs to draw one card at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSprite {
    pub index: usize,
    pub pose: Pose,
    pub face: Face,
    /// Horizontal squash from a running flip, 1.0 when flat.
    pub squash: f64,
    pub hidden: bool,
}

/// One card. Model values (`pose`, `is_flipped`) jump to their targets when
/// an animation is scheduled; the tween and flip records describe what is on
/// screen until they finish.
#[derive(Debug)]
pub struct CardView {
    index: usize,
    hidden: bool,
    is_flipped: bool,
    pose: Pose,
    motion: Option<Tween>,
    flips: Vec<FlipTransition>,
}

impl CardView {
    pub fn new(index: usize, pose: Pose) -> Self {
        Self {
            index,
            hidden: true,
            is_flipped: false,
            pose,
            motion: None,
            flips: Vec::new(),
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Jump to `pose` without animating, dropping any running motion.
    pub fn place(&mut self, pose: Pose) {
        self.pose = pose;
        self.motion = None;
    }

    /// Toggle the face, returning when the visual transition will end.
    ///
    /// A flip requested while another is still turning is queued behind it.
    pub fn flip(&mut self, now: Instant, duration: Duration) -> Instant {
        let start = self
            .flips
            .last()
            .map(|f| f.end().max(now))
            .unwrap_or(now);
        let transition = FlipTransition { start, duration };
        self.flips.push(transition);
        self.is_flipped = !self.is_flipped;
        transition.end()
    }

    /// Animate from the current pose to `target`, returning the end instant.
    pub fn begin_motion(&mut self, target: Pose, now: Instant, timing: Timing) -> Instant {
        let from = match &self.motion {
            Some(tween) => tween.sample(now),
            None => self.pose,
        };
        let tween = Tween::schedule(from, target, now, timing);
        self.pose = target;
        self.motion = Some(tween);
        tween.end()
    }

    /// Drop animation records that have run their course.
    pub fn settle(&mut self, now: Instant) {
        if self.motion.is_some_and(|m| m.is_finished(now)) {
            self.motion = None;
        }
        self.flips.retain(|f| now < f.end());
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.motion.is_some_and(|m| !m.is_finished(now)) || self.flips.iter().any(|f| now < f.end())
    }

    /// Face currently visible: every transition not yet past its midpoint
    /// still owes one swap.
    pub fn visible_face(&self, now: Instant) -> Face {
        let settled = if self.is_flipped { Face::Front } else { Face::Back };
        let owed = self.flips.iter().filter(|f| now < f.midpoint()).count();
        if owed % 2 == 0 {
            settled
        } else {
            settled.turned()
        }
    }

    pub fn sprite(&self, now: Instant) -> CardSprite {
        let pose = match &self.motion {
            Some(tween) => tween.sample(now),
            None => self.pose,
        };
        let squash = self
            .flips
            .iter()
            .find(|f| f.is_active(now))
            .map(|f| f.squash(now))
            .unwrap_or(1.0);
        CardSprite {
            index: self.index,
            pose,
            face: self.visible_face(now),
            squash,
            hidden: self.hidden,
        }
    }
}
