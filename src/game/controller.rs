//! The game state machine and the animation sequences it drives.
//!
//! Sequences are plain `async fn`s. Each step schedules tweens on the stage,
//! then sleeps until they end, so the next step starts only after the
//! previous one has finished. The stage lock is never held across an await.
//! Every sleep races the shared [`CancelToken`].

use crate::game::anim::{Pose, Timing};
use crate::game::cancel::CancelToken;
use crate::game::error::{GameError, Result};
use crate::game::fan::{
    self, CENTER_SECS, FAN_SECS, FAN_STAGGER_SECS, FLIP_SECS, LIFT_DISTANCE, LIFT_SECS,
    RESET_SECS, REVEAL_SCALE,
};
use crate::game::geometry::Transform;
use crate::game::stage::{GameState, Stage, TableView};
use futures::future::join_all;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Notifications emitted as the game progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    StateChanged { from: GameState, to: GameState },
    CardSelected { index: usize },
    CardFlipped { index: usize, face_up: bool },
}

/// What a tap on the action button set in motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Nothing to do in this state.
    Ignored(GameState),
    Selecting { index: usize },
    Resetting,
}

/// Cheap to clone; all clones drive the same stage.
#[derive(Debug, Clone)]
pub struct GameController {
    stage: Arc<Mutex<Stage>>,
    time_scale: f64,
    events: mpsc::UnboundedSender<GameEvent>,
    cancel: CancelToken,
}

impl GameController {
    pub fn new(time_scale: f64, events: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self {
            stage: Arc::new(Mutex::new(Stage::new())),
            time_scale,
            events,
            cancel: CancelToken::new(),
        }
    }

    fn stage(&self) -> MutexGuard<'_, Stage> {
        self.stage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> GameState {
        self.stage().state()
    }

    #[cfg(test)]
    pub fn selection(&self) -> Option<usize> {
        self.stage().selection()
    }

    #[cfg(test)]
    pub fn button_enabled(&self) -> bool {
        self.stage().button().enabled
    }

    pub fn is_animating(&self) -> bool {
        self.stage().is_animating(Instant::now())
    }

    pub fn snapshot(&self, now: Instant) -> TableView {
        self.stage().snapshot(now)
    }

    /// Run `f` against the stage under the lock.
    #[cfg(test)]
    pub fn with_stage<R>(&self, f: impl FnOnce(&Stage) -> R) -> R {
        f(&self.stage())
    }

    /// Stop every running sequence at its next wait.
    pub fn shutdown(&self) {
        tracing::info!("cancelling animation sequences");
        self.cancel.cancel();
    }

    /// The table became visible: deal the fan if nothing has been dealt yet.
    pub fn appear(&self) -> Option<JoinHandle<()>> {
        {
            let stage = self.stage();
            if stage.state() != GameState::Initial || stage.is_dealt() {
                return None;
            }
        }
        let ends = self.begin_unfold();
        let this = self.clone();
        Some(self.spawn("fan-out", async move { this.finish_unfold(ends).await }))
    }

    /// A press on the on-screen button. Disabled buttons swallow the press.
    pub fn press_button(&self) -> Option<TapOutcome> {
        if !self.stage().button().enabled {
            tracing::debug!("button disabled, press dropped");
            return None;
        }
        Some(self.tap())
    }

    /// Handle an action-button tap according to the current state.
    pub fn tap(&self) -> TapOutcome {
        let state = self.state();
        match state {
            GameState::Initial | GameState::Selected => {
                tracing::debug!(%state, "tap ignored");
                TapOutcome::Ignored(state)
            }
            GameState::Unfolded => {
                let index = self.begin_selection();
                let this = self.clone();
                self.spawn("select-and-reveal", async move { this.reveal(index).await });
                TapOutcome::Selecting { index }
            }
            GameState::Revealed => {
                self.stage().button.enabled = false;
                let this = self.clone();
                self.spawn("reset-then-select", async move {
                    this.reset_then_select().await
                });
                TapOutcome::Resetting
            }
        }
    }

    /// Lift the center card, bring it to the middle enlarged, and turn it up.
    pub async fn select_and_reveal(&self) -> Result<()> {
        let index = self.begin_selection();
        self.reveal(index).await
    }

    /// Put the selected card back in the fan, then select again.
    pub async fn reset_then_select(&self) -> Result<()> {
        let selected = {
            let mut stage = self.stage();
            stage.button.enabled = false;
            stage.selection().map(|i| (i, stage.card(i).is_flipped()))
        };

        if let Some((index, flipped)) = selected {
            if flipped {
                self.flip(index).await?;
            }

            let home = {
                let stage = self.stage();
                Pose::new(stage.pivot(), fan::fan_transform(index, stage.card_count()))
            };
            self.animate(index, home, Timing::new(RESET_SECS)).await?;

            let mut stage = self.stage();
            stage.clear_selection();
            self.enter(&mut stage, GameState::Unfolded);
            stage.button.enabled = true;
        }

        self.select_and_reveal().await
    }

    fn begin_unfold(&self) -> Vec<Instant> {
        let mut stage = self.stage();
        let now = Instant::now();
        let pivot = stage.pivot();
        let count = stage.card_count();
        tracing::info!(count, "dealing fan");

        (0..count)
            .map(|i| {
                let timing = Timing::new(FAN_SECS)
                    .with_delay(FAN_STAGGER_SECS * i as f64)
                    .scaled(self.time_scale);
                let card = stage.card_mut(i);
                card.show();
                card.place(Pose::new(pivot, Transform::IDENTITY));
                card.begin_motion(Pose::new(pivot, fan::fan_transform(i, count)), now, timing)
            })
            .collect()
    }

    async fn finish_unfold(&self, ends: Vec<Instant>) -> Result<()> {
        // Wait for every card, whatever order they land in.
        let landed = ends
            .into_iter()
            .enumerate()
            .map(|(i, end)| self.settle_at(i, end));
        join_all(landed).await.into_iter().collect::<Result<Vec<()>>>()?;

        let mut stage = self.stage();
        self.enter(&mut stage, GameState::Unfolded);
        stage.button.enabled = true;
        Ok(())
    }

    fn begin_selection(&self) -> usize {
        let mut stage = self.stage();
        let index = fan::center_index(stage.card_count());
        stage.button.enabled = false;
        self.enter(&mut stage, GameState::Selected);
        stage.select(index);
        stage.bring_to_front(index);
        self.notify(GameEvent::CardSelected { index });
        index
    }

    async fn reveal(&self, index: usize) -> Result<()> {
        let lifted = {
            let stage = self.stage();
            let pose = stage.card(index).pose();
            Pose::new(pose.center, pose.transform.translated_by(0.0, -LIFT_DISTANCE))
        };
        self.animate(index, lifted, Timing::new(LIFT_SECS)).await?;

        let spotlight = {
            let stage = self.stage();
            Pose::new(stage.view_center(), Transform::scale(REVEAL_SCALE))
        };
        self.animate(index, spotlight, Timing::new(CENTER_SECS)).await?;

        self.flip(index).await?;

        let mut stage = self.stage();
        self.enter(&mut stage, GameState::Revealed);
        stage.button.enabled = true;
        Ok(())
    }

    async fn animate(&self, index: usize, target: Pose, timing: Timing) -> Result<()> {
        let end = {
            let mut stage = self.stage();
            stage
                .card_mut(index)
                .begin_motion(target, Instant::now(), timing.scaled(self.time_scale))
        };
        self.settle_at(index, end).await
    }

    async fn flip(&self, index: usize) -> Result<()> {
        let duration = Timing::new(FLIP_SECS).scaled(self.time_scale).duration;
        let (end, face_up) = {
            let mut stage = self.stage();
            let card = stage.card_mut(index);
            let end = card.flip(Instant::now(), duration);
            (end, card.is_flipped())
        };
        self.notify(GameEvent::CardFlipped { index, face_up });
        self.settle_at(index, end).await
    }

    async fn settle_at(&self, index: usize, end: Instant) -> Result<()> {
        self.wait_until(end).await?;
        self.stage().card_mut(index).settle(Instant::now());
        Ok(())
    }

    async fn wait_until(&self, deadline: Instant) -> Result<()> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(GameError::Cancelled),
            _ = tokio::time::sleep_until(deadline) => Ok(()),
        }
    }

    fn enter(&self, stage: &mut Stage, to: GameState) {
        let from = stage.set_state(to);
        tracing::info!(%from, %to, "game state changed");
        self.notify(GameEvent::StateChanged { from, to });
    }

    fn notify(&self, event: GameEvent) {
        // Nobody listening is fine; the UI may already be gone.
        let _ = self.events.send(event);
    }

    fn spawn<F>(&self, sequence: &'static str, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        tokio::spawn(async move {
            if let Err(e) = fut.await {
                tracing::warn!(sequence, error = %e, "animation sequence stopped");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fan::CARD_COUNT;
    use std::time::Duration;
    use tokio::time::sleep;

    fn controller() -> (GameController, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (GameController::new(1.0, tx), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    async fn unfolded() -> (GameController, mpsc::UnboundedReceiver<GameEvent>) {
        let (c, mut rx) = controller();
        c.appear()
            .expect("fan-out should start")
            .await
            .expect("fan-out task should not panic");
        drain(&mut rx);
        (c, rx)
    }

    async fn revealed() -> (GameController, mpsc::UnboundedReceiver<GameEvent>) {
        let (c, mut rx) = unfolded().await;
        assert_eq!(c.tap(), TapOutcome::Selecting { index: 2 });
        sleep(Duration::from_millis(1200)).await;
        assert_eq!(c.state(), GameState::Revealed);
        drain(&mut rx);
        (c, rx)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_ignored_before_fan_out() {
        let (c, mut rx) = controller();
        assert_eq!(c.tap(), TapOutcome::Ignored(GameState::Initial));
        assert_eq!(c.press_button(), None);
        assert_eq!(c.state(), GameState::Initial);
        assert!(!c.is_animating());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_appear_unfolds_all_cards() {
        let (c, mut rx) = controller();
        let started = Instant::now();
        c.appear()
            .expect("fan-out should start")
            .await
            .expect("fan-out task should not panic");
        let elapsed = started.elapsed();

        // Last card: 0.4 delay + 0.3 motion.
        assert!(elapsed >= Duration::from_millis(690), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(750), "{elapsed:?}");
        assert_eq!(c.state(), GameState::Unfolded);
        assert!(c.button_enabled());
        assert_eq!(
            drain(&mut rx),
            vec![GameEvent::StateChanged {
                from: GameState::Initial,
                to: GameState::Unfolded
            }]
        );

        c.with_stage(|stage| {
            let center = stage.card(2).pose();
            assert_eq!(center.center, stage.pivot());
            assert!(close(center.transform.rotation, 0.0));
            assert!(close(center.transform.tx, 0.0));
            assert!(close(center.transform.ty, -150.0));
            for i in 0..CARD_COUNT {
                let card = stage.card(i);
                assert!(!card.is_hidden());
                assert!(close(
                    card.pose().transform.rotation,
                    fan::fan_angle(i, CARD_COUNT)
                ));
            }
        });
        assert!(!c.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fan_out_waits_for_every_card() {
        let (c, _rx) = controller();
        c.appear().expect("fan-out should start");

        sleep(Duration::from_millis(650)).await;
        assert_eq!(c.state(), GameState::Initial);
        assert!(!c.button_enabled());
        assert!(c.is_animating());

        sleep(Duration::from_millis(100)).await;
        assert_eq!(c.state(), GameState::Unfolded);
        assert!(c.button_enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_appear_only_deals_once() {
        let (c, _rx) = controller();
        assert!(c.appear().is_some());
        assert!(c.appear().is_none());
        sleep(Duration::from_secs(1)).await;
        assert!(c.appear().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_in_unfolded_selects_center_card() {
        let (c, mut rx) = unfolded().await;

        assert_eq!(c.tap(), TapOutcome::Selecting { index: 2 });
        assert_eq!(c.state(), GameState::Selected);
        assert!(!c.button_enabled());
        assert_eq!(c.selection(), Some(2));
        c.with_stage(|stage| assert_eq!(stage.z_order().last(), Some(&2)));
        assert_eq!(
            drain(&mut rx),
            vec![
                GameEvent::StateChanged {
                    from: GameState::Unfolded,
                    to: GameState::Selected
                },
                GameEvent::CardSelected { index: 2 },
            ]
        );

        // Busy: taps change nothing.
        assert_eq!(c.tap(), TapOutcome::Ignored(GameState::Selected));
        assert_eq!(c.press_button(), None);
        assert_eq!(c.state(), GameState::Selected);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_and_reveal_sequence() {
        let (c, mut rx) = unfolded().await;
        c.tap();
        drain(&mut rx);

        // Lift phase: moving straight up from the fan position.
        sleep(Duration::from_millis(300)).await;
        c.with_stage(|stage| {
            let pose = stage.card(2).pose();
            assert!(close(pose.transform.ty, -200.0));
            assert!(!stage.card(2).is_flipped());
        });

        sleep(Duration::from_millis(750)).await;
        assert_eq!(c.state(), GameState::Selected);

        sleep(Duration::from_millis(150)).await;
        assert_eq!(c.state(), GameState::Revealed);
        assert!(c.button_enabled());
        assert_eq!(c.selection(), Some(2));
        c.with_stage(|stage| {
            let card = stage.card(2);
            assert!(card.is_flipped());
            assert_eq!(card.pose().center, stage.view_center());
            assert!(close(card.pose().transform.scale, REVEAL_SCALE));
            for i in [0, 1, 3, 4] {
                assert!(!stage.card(i).is_flipped());
            }
        });
        assert_eq!(
            drain(&mut rx),
            vec![
                GameEvent::CardFlipped {
                    index: 2,
                    face_up: true
                },
                GameEvent::StateChanged {
                    from: GameState::Selected,
                    to: GameState::Revealed
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_in_revealed_resets_then_selects_again() {
        let (c, mut rx) = revealed().await;

        assert_eq!(c.press_button(), Some(TapOutcome::Resetting));
        assert!(!c.button_enabled());
        assert_eq!(c.state(), GameState::Revealed);

        // Flip back is awaited before the card heads home.
        sleep(Duration::from_millis(200)).await;
        c.with_stage(|stage| {
            assert!(!stage.card(2).is_flipped());
            assert_eq!(stage.card(2).pose().center, stage.view_center());
        });

        sleep(Duration::from_millis(2000)).await;
        assert_eq!(c.state(), GameState::Revealed);
        assert_eq!(c.selection(), Some(2));
        assert!(c.button_enabled());
        c.with_stage(|stage| assert!(stage.card(2).is_flipped()));

        assert_eq!(
            drain(&mut rx),
            vec![
                GameEvent::CardFlipped {
                    index: 2,
                    face_up: false
                },
                GameEvent::StateChanged {
                    from: GameState::Revealed,
                    to: GameState::Unfolded
                },
                GameEvent::StateChanged {
                    from: GameState::Unfolded,
                    to: GameState::Selected
                },
                GameEvent::CardSelected { index: 2 },
                GameEvent::CardFlipped {
                    index: 2,
                    face_up: true
                },
                GameEvent::StateChanged {
                    from: GameState::Selected,
                    to: GameState::Revealed
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_returns_card_to_fan_pose() {
        let (c, _rx) = revealed().await;
        c.tap();

        // 0.3 flip back + 0.3 return, then the new lift starts from the fan.
        sleep(Duration::from_millis(610)).await;
        assert_eq!(c.state(), GameState::Selected);
        c.with_stage(|stage| {
            let pose = stage.card(2).pose();
            assert_eq!(pose.center, stage.pivot());
            // Lift target relative to the fan pose.
            assert!(close(pose.transform.ty, -200.0));
            assert!(close(pose.transform.scale, 1.0));
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_without_selection_goes_straight_to_select() {
        let (c, _rx) = unfolded().await;
        c.reset_then_select()
            .await
            .expect("sequence should complete");
        assert_eq!(c.state(), GameState::Revealed);
        assert_eq!(c.selection(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_running_sequence() {
        let (c, _rx) = unfolded().await;
        c.tap();
        sleep(Duration::from_millis(100)).await;
        c.shutdown();
        sleep(Duration::from_secs(2)).await;

        assert_eq!(c.state(), GameState::Selected);
        assert!(!c.button_enabled());
        c.with_stage(|stage| assert!(!stage.card(2).is_flipped()));
        assert_eq!(c.select_and_reveal().await, Err(GameError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_scale_stretches_sequences() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let c = GameController::new(2.0, tx);
        c.appear().expect("fan-out should start");

        sleep(Duration::from_millis(1300)).await;
        assert_eq!(c.state(), GameState::Initial);
        sleep(Duration::from_millis(200)).await;
        assert_eq!(c.state(), GameState::Unfolded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_configured_scale_still_deals() {
        use crate::config::model::AnimationConfig;

        let scale = AnimationConfig { time_scale: 1e20 }.effective_time_scale();
        let (tx, _rx) = mpsc::unbounded_channel();
        let c = GameController::new(scale, tx);
        c.appear().expect("fan-out should start");

        sleep(Duration::from_secs(74)).await;
        assert_eq!(c.state(), GameState::Initial);
        sleep(Duration::from_secs(2)).await;
        assert_eq!(c.state(), GameState::Unfolded);
    }
}
