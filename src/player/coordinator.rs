use tracing::debug;

use super::{PlaybackState, PlayerSource};
use crate::track::Track;

/// Identifies a registered state listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PlaybackState)>;

/// Single owner of the shared [`PlaybackState`].
///
/// All commands are synchronous: they mutate the state and notify
/// subscribers before returning, so a dependent command issued right after
/// a transfer already sees the new owner. The coordinator performs no I/O
/// and cannot fail; driving the actual media resource is the engine's job.
pub struct PlayerCoordinator {
    state: PlaybackState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for PlayerCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerCoordinator {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Register a listener invoked after every state change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&PlaybackState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    // ---- playback commands ----------------------------------------------

    /// Load `track` under `source` and start playing, clearing any queue.
    ///
    /// Calling this again with the identical track and source is a plain
    /// resume: `current_time` is left alone. Any other combination reloads
    /// from the start.
    pub fn play_track(&mut self, track: Track, source: PlayerSource) {
        if self.is_current(&track.id) && self.state.active_source == Some(source) {
            debug!(track = %track.id, source = %source, "resuming current track");
            if !self.state.is_playing {
                self.state.is_playing = true;
                self.notify();
            }
            return;
        }

        debug!(track = %track.id, source = %source, "loading track");
        self.load(track, source);
        self.state.queue.clear();
        self.notify();
    }

    /// Like [`Self::play_track`], but installs `queue` for next/previous
    /// navigation. A `track` that is not a member of `queue` degrades to
    /// queue-less playback rather than failing.
    pub fn play_track_in_queue(
        &mut self,
        track: Track,
        queue: Vec<Track>,
        source: PlayerSource,
    ) {
        if !queue.iter().any(|entry| entry.id == track.id) {
            debug!(track = %track.id, "track missing from supplied queue, playing without one");
            self.play_track(track, source);
            return;
        }

        if self.is_current(&track.id) && self.state.active_source == Some(source) {
            debug!(track = %track.id, source = %source, "resuming current track with new queue");
            self.state.is_playing = true;
            self.state.queue = queue;
            self.notify();
            return;
        }

        debug!(track = %track.id, source = %source, queue_len = queue.len(), "loading track in queue");
        self.load(track, source);
        self.state.queue = queue;
        self.notify();
    }

    /// No-op when nothing is loaded.
    pub fn pause_track(&mut self) {
        if self.state.has_track() && self.state.is_playing {
            self.state.is_playing = false;
            self.notify();
        }
    }

    /// No-op when nothing is loaded.
    pub fn resume_track(&mut self) {
        if self.state.has_track() && !self.state.is_playing {
            self.state.is_playing = true;
            self.notify();
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing {
            self.pause_track();
        } else {
            self.resume_track();
        }
    }

    // ---- queue navigation ------------------------------------------------

    /// Advance to the next queue entry. At the end of the queue (or with the
    /// current track absent from it) playback stops instead of wrapping.
    pub fn next_track(&mut self) {
        let next = match self.state.queue_position() {
            Some(position) if position + 1 < self.state.queue.len() => {
                self.state.queue[position + 1].clone()
            }
            _ => {
                if self.state.is_playing {
                    debug!("end of queue, stopping");
                    self.state.is_playing = false;
                    self.notify();
                }
                return;
            }
        };

        debug!(track = %next.id, "advancing to next queue entry");
        self.state.current_track = Some(next);
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
        self.state.is_playing = true;
        self.notify();
    }

    /// Step back to the previous queue entry. At position 0 (or with the
    /// current track absent from the queue) the current track restarts.
    pub fn previous_track(&mut self) {
        if !self.state.has_track() {
            return;
        }

        let previous = match self.state.queue_position() {
            Some(position) if position > 0 => self.state.queue[position - 1].clone(),
            _ => {
                self.state.current_time = 0.0;
                self.notify();
                return;
            }
        };

        debug!(track = %previous.id, "stepping back to previous queue entry");
        self.state.current_track = Some(previous);
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
        self.state.is_playing = true;
        self.notify();
    }

    /// Jump to a queue member by id; silently ignores unknown ids.
    pub fn skip_to_track(&mut self, track_id: &str) {
        let Some(position) = self
            .state
            .queue
            .iter()
            .position(|track| track.id == track_id)
        else {
            return;
        };

        let track = self.state.queue[position].clone();
        debug!(track = %track.id, position, "skipping to queue entry");
        self.state.current_track = Some(track);
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
        self.state.is_playing = true;
        self.notify();
    }

    /// Drop the queue without touching the current track or play state.
    pub fn clear_queue(&mut self) {
        if !self.state.queue.is_empty() {
            self.state.queue.clear();
            self.notify();
        }
    }

    // ---- engine-authoritative setters -----------------------------------

    /// Authoritative position from the engine. Ignored while a scrub owns
    /// the displayed position, so native time events can never drag the
    /// preview around.
    pub fn set_current_time(&mut self, time: f64) {
        if self.state.is_scrubbing || !time.is_finite() || time < 0.0 {
            return;
        }
        let time = if self.state.duration > 0.0 {
            time.min(self.state.duration)
        } else {
            time
        };
        if self.state.current_time != time {
            self.state.current_time = time;
            self.notify();
        }
    }

    /// Authoritative duration from the engine. Rejects non-finite and
    /// negative values; an accepted duration clamps the current position.
    pub fn set_duration(&mut self, duration: f64) {
        if !duration.is_finite() || duration < 0.0 || self.state.duration == duration {
            return;
        }
        self.state.duration = duration;
        if duration > 0.0 && self.state.current_time > duration {
            self.state.current_time = duration;
        }
        self.notify();
    }

    // ---- scrub preview ---------------------------------------------------

    /// Enter scrub mode with an initial preview position. `is_playing` is
    /// untouched: a mid-seek user has not chosen to pause.
    pub fn begin_scrub(&mut self, preview: f64) {
        self.state.is_scrubbing = true;
        self.state.current_time = self.bound_time(preview);
        self.notify();
    }

    /// Move the preview; only valid while scrubbing.
    pub fn update_scrub(&mut self, preview: f64) {
        if !self.state.is_scrubbing {
            return;
        }
        self.state.current_time = self.bound_time(preview);
        self.notify();
    }

    /// Leave scrub mode, committing the final position as the displayed one.
    pub fn end_scrub(&mut self, final_time: f64) {
        self.state.is_scrubbing = false;
        self.state.current_time = self.bound_time(final_time);
        self.notify();
    }

    // ---- source management -----------------------------------------------

    /// Reassign control without touching the track, play state or position.
    /// By the time this returns, subscribers have seen the new owner, so
    /// dependent commands can follow immediately.
    pub fn transfer_control_to(&mut self, source: PlayerSource) {
        if self.state.active_source == Some(source) {
            return;
        }
        debug!(source = %source, "transferring playback control");
        self.state.active_source = Some(source);
        self.notify();
    }

    pub fn is_source_active(&self, source: PlayerSource) -> bool {
        self.state.active_source == Some(source)
    }

    pub fn queue_position(&self) -> Option<usize> {
        self.state.queue_position()
    }

    // ---- helpers ---------------------------------------------------------

    fn is_current(&self, track_id: &str) -> bool {
        self.state
            .current_track
            .as_ref()
            .is_some_and(|track| track.id == track_id)
    }

    fn load(&mut self, track: Track, source: PlayerSource) {
        self.state.current_track = Some(track);
        self.state.active_source = Some(source);
        self.state.is_playing = true;
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
    }

    fn bound_time(&self, time: f64) -> f64 {
        if !time.is_finite() {
            return 0.0;
        }
        if self.state.duration > 0.0 {
            time.clamp(0.0, self.state.duration)
        } else {
            time.max(0.0)
        }
    }
}
