use tracing::debug;

use super::{SliderRect, progress_from_pointer};
use crate::engine::{EngineAdapter, PlaybackError};
use crate::player::PlayerCoordinator;

/// Seconds moved by one arrow-key step on a seek control.
const KEY_STEP_SECONDS: f64 = 5.0;

#[derive(Debug, Copy, Clone, PartialEq)]
enum ScrubState {
    Idle,
    Scrubbing { was_playing: bool },
}

/// Drag-to-seek state machine over a coordinator/adapter pair.
///
/// Entering a scrub quietly pauses the media resource and remembers whether
/// playback was active; every drag frame writes the preview position to the
/// displayed state and the engine clock. Releasing commits the final
/// position and resumes playback only if it was active before the drag,
/// the one moment play state crosses back from preview to real.
///
/// A zero or unknown duration makes every entry point a no-op, so a control
/// rendered before metadata arrives can never produce garbage seek targets.
pub struct ScrubController {
    state: ScrubState,
}

impl Default for ScrubController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrubController {
    pub fn new() -> Self {
        Self {
            state: ScrubState::Idle,
        }
    }

    pub fn is_scrubbing(&self) -> bool {
        matches!(self.state, ScrubState::Scrubbing { .. })
    }

    /// Enter scrub mode at `preview` seconds.
    pub fn begin(
        &mut self,
        coordinator: &mut PlayerCoordinator,
        adapter: &mut EngineAdapter,
        preview: f64,
    ) {
        if coordinator.state().duration <= 0.0 {
            return;
        }
        if self.is_scrubbing() {
            self.drag(coordinator, adapter, preview);
            return;
        }

        let was_playing = coordinator.state().is_playing;
        debug!(preview, was_playing, "scrub started");
        adapter.begin_scrub_hold();
        self.state = ScrubState::Scrubbing { was_playing };
        coordinator.begin_scrub(preview);
        adapter.seek(preview);
    }

    /// Move the preview. Ignored outside a scrub.
    pub fn drag(
        &mut self,
        coordinator: &mut PlayerCoordinator,
        adapter: &mut EngineAdapter,
        preview: f64,
    ) {
        if !self.is_scrubbing() {
            return;
        }
        coordinator.update_scrub(preview);
        adapter.seek(preview);
    }

    /// Commit the final position and leave scrub mode, resuming playback if
    /// it was active when the scrub began. A rejected resume is handed back
    /// to the caller, which reconciles by pausing.
    pub fn finish(
        &mut self,
        coordinator: &mut PlayerCoordinator,
        adapter: &mut EngineAdapter,
        final_time: f64,
    ) -> Result<(), PlaybackError> {
        let ScrubState::Scrubbing { was_playing } = self.state else {
            return Ok(());
        };
        self.state = ScrubState::Idle;

        debug!(final_time, was_playing, "scrub finished");
        adapter.seek(final_time);
        adapter.end_scrub_hold();
        coordinator.end_scrub(final_time);

        if was_playing {
            adapter.play()?;
        }
        Ok(())
    }

    // ---- pointer gestures ------------------------------------------------

    pub fn pointer_down(
        &mut self,
        coordinator: &mut PlayerCoordinator,
        adapter: &mut EngineAdapter,
        pointer_x: f64,
        rect: SliderRect,
    ) {
        if let Some(time) = Self::pointer_time(coordinator, pointer_x, rect) {
            self.begin(coordinator, adapter, time);
        }
    }

    pub fn pointer_move(
        &mut self,
        coordinator: &mut PlayerCoordinator,
        adapter: &mut EngineAdapter,
        pointer_x: f64,
        rect: SliderRect,
    ) {
        if let Some(time) = Self::pointer_time(coordinator, pointer_x, rect) {
            self.drag(coordinator, adapter, time);
        }
    }

    pub fn pointer_up(
        &mut self,
        coordinator: &mut PlayerCoordinator,
        adapter: &mut EngineAdapter,
        pointer_x: f64,
        rect: SliderRect,
    ) -> Result<(), PlaybackError> {
        match Self::pointer_time(coordinator, pointer_x, rect) {
            Some(time) => self.finish(coordinator, adapter, time),
            None => Ok(()),
        }
    }

    // ---- keyboard fallbacks ----------------------------------------------

    /// Enter/Space on a focused seek control: a single coarse jump to the
    /// midpoint of the track.
    pub fn key_select(
        &mut self,
        coordinator: &mut PlayerCoordinator,
        adapter: &mut EngineAdapter,
    ) {
        let duration = coordinator.state().duration;
        if duration <= 0.0 || self.is_scrubbing() {
            return;
        }
        self.commit_jump(coordinator, adapter, duration * 0.5);
    }

    /// Arrow keys: step the position by five seconds either way.
    pub fn key_step(
        &mut self,
        coordinator: &mut PlayerCoordinator,
        adapter: &mut EngineAdapter,
        forward: bool,
    ) {
        let state = coordinator.state();
        if state.duration <= 0.0 || self.is_scrubbing() {
            return;
        }
        let delta = if forward {
            KEY_STEP_SECONDS
        } else {
            -KEY_STEP_SECONDS
        };
        let target = (state.current_time + delta).clamp(0.0, state.duration);
        self.commit_jump(coordinator, adapter, target);
    }

    fn commit_jump(
        &mut self,
        coordinator: &mut PlayerCoordinator,
        adapter: &mut EngineAdapter,
        target: f64,
    ) {
        adapter.seek(target);
        coordinator.set_current_time(target);
    }

    fn pointer_time(
        coordinator: &PlayerCoordinator,
        pointer_x: f64,
        rect: SliderRect,
    ) -> Option<f64> {
        let duration = coordinator.state().duration;
        if duration <= 0.0 {
            return None;
        }
        Some(progress_from_pointer(pointer_x, rect) * duration)
    }
}
