use tracing::{debug, error, warn};

use super::{MediaEvent, MediaHandle, PlaybackError};

/// Lifecycle of the adapter's media resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Stalled,
    Ended,
    Errored,
}

/// What the coordinator needs to hear from the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineSignal {
    /// Authoritative playback position, in seconds.
    TimeAdvanced(f64),
    /// Authoritative duration, in seconds.
    DurationKnown(f64),
    /// The current track played to its end.
    Ended,
    /// Playback halted and automatic recovery failed; the caller should
    /// reconcile by pausing.
    Halted,
}

/// Owns the single media resource and translates its native events into
/// [`EngineSignal`]s.
///
/// Loading a new track re-keys the adapter: stale time events, a pending
/// seek or an unfinished stall retry belonging to the previous track are
/// dropped silently. A seek issued before metadata is stored and applied
/// once the resource reports it is seekable.
pub struct EngineAdapter {
    media: Box<dyn MediaHandle>,
    state: EngineState,
    track_id: Option<String>,
    pending_seek: Option<f64>,
    stall_retry: bool,
    stall_retried: bool,
    scrub_hold: bool,
}

impl EngineAdapter {
    pub fn new(media: Box<dyn MediaHandle>) -> Self {
        Self {
            media,
            state: EngineState::Idle,
            track_id: None,
            pending_seek: None,
            stall_retry: true,
            stall_retried: false,
            scrub_hold: false,
        }
    }

    /// Disable (or re-enable) the one-shot stall retry.
    pub fn set_stall_retry(&mut self, enabled: bool) {
        self.stall_retry = enabled;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn track_id(&self) -> Option<&str> {
        self.track_id.as_deref()
    }

    pub fn position(&self) -> f64 {
        self.media.position()
    }

    pub fn duration(&self) -> Option<f64> {
        self.media.duration()
    }

    /// Point the resource at a new track, dropping anything still in flight
    /// for the previous one.
    pub fn load_track(&mut self, track_id: &str, url: &str) -> Result<(), PlaybackError> {
        debug!(track = track_id, "loading media source");
        self.track_id = Some(track_id.to_string());
        self.pending_seek = None;
        self.stall_retried = false;
        self.scrub_hold = false;
        // Anything still queued belongs to the previous source.
        self.media.poll();

        match self.media.load(url) {
            Ok(()) => {
                self.state = EngineState::Loading;
                Ok(())
            }
            Err(e) => {
                error!(track = track_id, error = %e, "media source failed to load");
                self.state = EngineState::Errored;
                Err(e)
            }
        }
    }

    /// Start or resume playback. Rejections propagate so the caller can
    /// reconcile its play state; there is no automatic retry here.
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        match self.media.play() {
            Ok(()) => {
                self.state = EngineState::Playing;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "play request rejected");
                Err(e)
            }
        }
    }

    pub fn pause(&mut self) {
        self.media.pause();
        if matches!(self.state, EngineState::Playing | EngineState::Stalled) {
            self.state = EngineState::Paused;
        }
    }

    /// Move the playback clock. A resource that is not yet seekable defers
    /// the target until metadata arrives instead of failing.
    pub fn seek(&mut self, seconds: f64) {
        let target = self.bound_seek(seconds);
        if self.media.duration().is_none() || self.state == EngineState::Loading {
            warn!(seconds = target, "seek deferred until metadata is ready");
            self.pending_seek = Some(target);
            return;
        }
        match self.media.set_position(target) {
            Ok(()) => {}
            Err(PlaybackError::SeekNotReady) => {
                warn!(seconds = target, "resource not seekable yet, deferring");
                self.pending_seek = Some(target);
            }
            Err(e) => {
                // Other failures leave the clock where it was; nothing to unwind.
                warn!(seconds = target, error = %e, "seek failed");
            }
        }
    }

    /// Pause the resource for the duration of a scrub without treating the
    /// pause as user intent: play state is preserved and the resource's own
    /// pause/time events are suppressed until the hold is lifted.
    pub fn begin_scrub_hold(&mut self) {
        self.scrub_hold = true;
        self.media.pause();
    }

    pub fn end_scrub_hold(&mut self) {
        self.scrub_hold = false;
    }

    pub fn scrub_hold_active(&self) -> bool {
        self.scrub_hold
    }

    /// Drain and translate everything the resource produced since the last
    /// call.
    pub fn poll(&mut self) -> Vec<EngineSignal> {
        let events = self.media.poll();
        events
            .into_iter()
            .filter_map(|event| self.handle_event(event))
            .collect()
    }

    /// Translate one native event. Returns the signal the coordinator
    /// should see, if any.
    pub fn handle_event(&mut self, event: MediaEvent) -> Option<EngineSignal> {
        match event {
            MediaEvent::MetadataLoaded { duration } => {
                if self.state == EngineState::Loading {
                    self.state = EngineState::Ready;
                }
                self.apply_pending_seek();
                Some(EngineSignal::DurationKnown(duration))
            }
            MediaEvent::DurationChanged(duration) => Some(EngineSignal::DurationKnown(duration)),
            MediaEvent::TimeAdvanced(seconds) => {
                // While loading, time events are leftovers from the previous
                // source; during a scrub hold the UI owns the clock.
                if self.state == EngineState::Loading || self.scrub_hold {
                    return None;
                }
                Some(EngineSignal::TimeAdvanced(seconds))
            }
            MediaEvent::Ended => {
                self.state = EngineState::Ended;
                Some(EngineSignal::Ended)
            }
            MediaEvent::PlayBegan => {
                if !self.scrub_hold && self.state != EngineState::Playing {
                    self.state = EngineState::Playing;
                }
                None
            }
            MediaEvent::PauseBegan => {
                if self.scrub_hold {
                    return None;
                }
                if self.state == EngineState::Playing {
                    // Nobody asked for this pause; treat it as a stall.
                    self.state = EngineState::Stalled;
                    return self.recover_stall();
                }
                // Anything else is the resource confirming a pause we or the
                // loader already accounted for.
                None
            }
            MediaEvent::Stalled => {
                if self.scrub_hold || self.state != EngineState::Playing {
                    return None;
                }
                self.state = EngineState::Stalled;
                self.recover_stall()
            }
            MediaEvent::Error(message) => {
                error!(error = %message, "media resource failed");
                self.state = EngineState::Errored;
                Some(EngineSignal::Halted)
            }
        }
    }

    fn recover_stall(&mut self) -> Option<EngineSignal> {
        if !self.stall_retry || self.stall_retried {
            self.state = EngineState::Paused;
            return Some(EngineSignal::Halted);
        }
        self.stall_retried = true;
        warn!(track = ?self.track_id, "media stalled, retrying play once");
        match self.media.play() {
            Ok(()) => {
                self.state = EngineState::Playing;
                None
            }
            Err(e) => {
                error!(error = %e, "stall retry rejected");
                self.state = EngineState::Paused;
                Some(EngineSignal::Halted)
            }
        }
    }

    fn apply_pending_seek(&mut self) {
        let Some(target) = self.pending_seek.take() else {
            return;
        };
        debug!(seconds = target, "applying deferred seek");
        if let Err(e) = self.media.set_position(target) {
            match e {
                PlaybackError::SeekNotReady => self.pending_seek = Some(target),
                other => warn!(seconds = target, error = %other, "deferred seek failed"),
            }
        }
    }

    fn bound_seek(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        match self.media.duration() {
            Some(duration) if duration > 0.0 => seconds.min(duration),
            _ => seconds,
        }
    }
}
