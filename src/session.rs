//! Wiring facade: one coordinator, one engine adapter, one scrub
//! controller, plus the reconciliation glue between them.
//!
//! UI surfaces talk to a [`PlayerSession`] as if it were the coordinator,
//! and the session keeps the media resource in step: it loads and starts
//! tracks, pumps engine signals back into the shared state, advances the
//! queue when a track ends, and reverts the play state when the backend
//! rejects a play request.

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::config::Settings;
use crate::engine::{EngineAdapter, EngineSignal, MediaHandle, PlaybackError};
use crate::player::{PlaybackState, PlayerCoordinator, PlayerSource, SubscriptionId};
use crate::scrub::{ScrubController, SliderRect};
use crate::track::Track;

pub struct PlayerSession {
    coordinator: PlayerCoordinator,
    adapter: EngineAdapter,
    scrub: ScrubController,
    settings: Settings,
    /// Last engine time update that was let through.
    last_time_accept: Option<Instant>,
    /// Engine time echo is ignored until this deadline after a committed seek.
    seek_settle_until: Option<Instant>,
}

impl PlayerSession {
    pub fn new(media: Box<dyn MediaHandle>, settings: Settings) -> Self {
        let mut adapter = EngineAdapter::new(media);
        adapter.set_stall_retry(settings.playback.stall_retry);
        Self {
            coordinator: PlayerCoordinator::new(),
            adapter,
            scrub: ScrubController::new(),
            settings,
            last_time_accept: None,
            seek_settle_until: None,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        self.coordinator.state()
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&PlaybackState) + 'static,
    ) -> SubscriptionId {
        self.coordinator.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.coordinator.unsubscribe(id)
    }

    // ---- playback commands ----------------------------------------------

    /// Play `track` under `source`. The returned error is the one failure a
    /// caller may care to surface: the backend rejecting the play request.
    /// State is already reconciled (paused) by the time it is returned.
    pub fn play_track(&mut self, track: Track, source: PlayerSource) -> Result<(), PlaybackError> {
        let resumed = self.is_resume(&track.id, source);
        let url = track.resolved_url(&self.settings.media.origin);
        let id = track.id.clone();

        self.coordinator.play_track(track, source);
        self.start_engine(&id, &url, resumed)
    }

    /// Play `track` with `queue` installed for next/previous navigation.
    pub fn play_track_in_queue(
        &mut self,
        track: Track,
        queue: Vec<Track>,
        source: PlayerSource,
    ) -> Result<(), PlaybackError> {
        let resumed = self.is_resume(&track.id, source);
        let url = track.resolved_url(&self.settings.media.origin);
        let id = track.id.clone();

        self.coordinator.play_track_in_queue(track, queue, source);
        self.start_engine(&id, &url, resumed)
    }

    pub fn pause(&mut self) {
        self.coordinator.pause_track();
        self.adapter.pause();
    }

    pub fn resume(&mut self) -> Result<(), PlaybackError> {
        if !self.coordinator.state().has_track() {
            return Ok(());
        }
        self.coordinator.resume_track();
        self.ensure_playing()
    }

    pub fn toggle_play_pause(&mut self) -> Result<(), PlaybackError> {
        if self.coordinator.state().is_playing {
            self.pause();
            Ok(())
        } else {
            self.resume()
        }
    }

    // ---- queue navigation ------------------------------------------------

    pub fn next_track(&mut self) -> Result<(), PlaybackError> {
        let before = self.current_id();
        self.coordinator.next_track();
        self.reconcile_after_nav(before)
    }

    pub fn previous_track(&mut self) -> Result<(), PlaybackError> {
        let before = self.current_id();
        self.coordinator.previous_track();
        if self.current_id() == before {
            // Restart of the current track rather than a navigation.
            self.adapter.seek(0.0);
            return Ok(());
        }
        self.reconcile_after_nav(before)
    }

    pub fn skip_to_track(&mut self, track_id: &str) -> Result<(), PlaybackError> {
        let in_queue = self
            .coordinator
            .state()
            .queue
            .iter()
            .any(|track| track.id == track_id);
        if !in_queue {
            return Ok(());
        }

        let before = self.current_id();
        self.coordinator.skip_to_track(track_id);
        if self.current_id() == before {
            // Jump back to the start of the already-loaded track.
            self.adapter.seek(0.0);
            return self.ensure_playing();
        }
        self.reconcile_after_nav(before)
    }

    pub fn clear_queue(&mut self) {
        self.coordinator.clear_queue();
    }

    pub fn queue_position(&self) -> Option<usize> {
        self.coordinator.queue_position()
    }

    // ---- time control ----------------------------------------------------

    /// Click-to-seek: commit `seconds` as the playback position. Playback
    /// that is already running keeps running from the new position.
    pub fn seek_to(&mut self, seconds: f64) -> Result<(), PlaybackError> {
        let duration = self.coordinator.state().duration;
        if duration <= 0.0 {
            return Ok(());
        }
        let target = seconds.clamp(0.0, duration);
        debug!(seconds = target, "seeking");
        self.adapter.seek(target);
        self.coordinator.set_current_time(target);
        self.arm_seek_settle();

        if self.coordinator.state().is_playing {
            return self.ensure_playing();
        }
        Ok(())
    }

    // ---- scrub surface ---------------------------------------------------

    pub fn scrub_down(&mut self, pointer_x: f64, rect: SliderRect) {
        self.scrub
            .pointer_down(&mut self.coordinator, &mut self.adapter, pointer_x, rect);
    }

    pub fn scrub_move(&mut self, pointer_x: f64, rect: SliderRect) {
        self.scrub
            .pointer_move(&mut self.coordinator, &mut self.adapter, pointer_x, rect);
    }

    pub fn scrub_up(&mut self, pointer_x: f64, rect: SliderRect) -> Result<(), PlaybackError> {
        let result =
            self.scrub
                .pointer_up(&mut self.coordinator, &mut self.adapter, pointer_x, rect);
        self.arm_seek_settle();
        if result.is_err() {
            // The resume was rejected; the visible state must not pretend.
            self.coordinator.pause_track();
        }
        result
    }

    pub fn scrub_key_select(&mut self) {
        self.scrub
            .key_select(&mut self.coordinator, &mut self.adapter);
        self.arm_seek_settle();
    }

    pub fn scrub_key_step(&mut self, forward: bool) {
        self.scrub
            .key_step(&mut self.coordinator, &mut self.adapter, forward);
        self.arm_seek_settle();
    }

    // ---- source management -----------------------------------------------

    pub fn transfer_control_to(&mut self, source: PlayerSource) {
        self.coordinator.transfer_control_to(source);
    }

    pub fn is_source_active(&self, source: PlayerSource) -> bool {
        self.coordinator.is_source_active(source)
    }

    /// Mount-time convenience: surfaces that take over on mount do so only
    /// when a track is actually loaded.
    pub fn acquire_on_mount(&mut self, source: PlayerSource) {
        if source.auto_acquires_on_mount() && self.coordinator.state().has_track() {
            self.coordinator.transfer_control_to(source);
        }
    }

    /// Unmount-time convenience: hand control back to the global player if
    /// this surface still holds it.
    pub fn release_to_global(&mut self, source: PlayerSource) {
        if self.coordinator.is_source_active(source) {
            self.coordinator.transfer_control_to(PlayerSource::Global);
        }
    }

    // ---- engine pump -----------------------------------------------------

    /// Drain engine signals into the shared state. Call once per UI frame
    /// or timer tick.
    pub fn tick(&mut self) {
        for signal in self.adapter.poll() {
            match signal {
                EngineSignal::DurationKnown(duration) => {
                    self.coordinator.set_duration(duration);
                }
                EngineSignal::TimeAdvanced(seconds) => self.apply_time(seconds),
                EngineSignal::Ended => self.auto_advance(),
                EngineSignal::Halted => self.coordinator.pause_track(),
            }
        }
    }

    fn apply_time(&mut self, seconds: f64) {
        let now = Instant::now();
        if let Some(deadline) = self.seek_settle_until {
            if now < deadline {
                return;
            }
            self.seek_settle_until = None;
        }

        let throttle = Duration::from_millis(self.settings.playback.time_throttle_ms);
        if !throttle.is_zero() {
            if let Some(last) = self.last_time_accept {
                if now.duration_since(last) < throttle {
                    return;
                }
            }
        }

        self.last_time_accept = Some(now);
        self.coordinator.set_current_time(seconds);
    }

    fn auto_advance(&mut self) {
        let before = self.current_id();
        self.coordinator.next_track();
        if let Err(e) = self.reconcile_after_nav(before) {
            // Auto-advance failures stay internal; the queue just stops.
            error!(error = %e, "failed to start next queue entry");
        }
    }

    // ---- helpers ---------------------------------------------------------

    fn is_resume(&self, track_id: &str, source: PlayerSource) -> bool {
        self.coordinator
            .state()
            .current_track
            .as_ref()
            .is_some_and(|current| current.id == track_id)
            && self.coordinator.state().active_source == Some(source)
    }

    fn current_id(&self) -> Option<String> {
        self.coordinator
            .state()
            .current_track
            .as_ref()
            .map(|track| track.id.clone())
    }

    /// Bring the engine in line after a play command: reuse the loaded
    /// source on a resume, restart it on a reload, and load from scratch
    /// for a new track.
    fn start_engine(&mut self, id: &str, url: &str, resumed: bool) -> Result<(), PlaybackError> {
        if resumed {
            return self.ensure_playing();
        }
        if self.adapter.track_id() == Some(id) {
            // Same source, fresh start.
            self.adapter.seek(0.0);
            return self.ensure_playing();
        }
        self.load_and_play(id, url)
    }

    fn load_and_play(&mut self, id: &str, url: &str) -> Result<(), PlaybackError> {
        if let Err(e) = self.adapter.load_track(id, url) {
            self.coordinator.pause_track();
            return Err(e);
        }
        self.ensure_playing()
    }

    fn ensure_playing(&mut self) -> Result<(), PlaybackError> {
        if let Err(e) = self.adapter.play() {
            self.coordinator.pause_track();
            return Err(e);
        }
        Ok(())
    }

    fn reconcile_after_nav(&mut self, before: Option<String>) -> Result<(), PlaybackError> {
        let state = self.coordinator.state();
        let Some(track) = state.current_track.clone() else {
            self.adapter.pause();
            return Ok(());
        };

        if Some(&track.id) != before.as_ref() {
            let url = track.resolved_url(&self.settings.media.origin);
            return self.load_and_play(&track.id, &url);
        }

        if !self.coordinator.state().is_playing {
            self.adapter.pause();
        }
        Ok(())
    }

    fn arm_seek_settle(&mut self) {
        let settle = Duration::from_millis(self.settings.playback.seek_settle_ms);
        if !settle.is_zero() {
            self.seek_settle_until = Some(Instant::now() + settle);
        }
    }
}
