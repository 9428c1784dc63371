use super::PlayerSource;
use crate::track::Track;

/// Shared playback state, created once per session.
///
/// Mutated exclusively through [`super::PlayerCoordinator`] commands; every
/// other component is a reader. `current_time` is the authoritative display
/// value: while `is_scrubbing` is set it carries the drag preview, which may
/// differ from the media resource's own clock.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub active_source: Option<PlayerSource>,
    pub is_playing: bool,
    /// Seconds; within `[0, duration]` once the duration is known.
    pub current_time: f64,
    /// Seconds; 0 until the media resource reports metadata.
    pub duration: f64,
    /// True while a drag-to-seek gesture is in progress anywhere in the UI.
    pub is_scrubbing: bool,
    /// Ordered tracks for next/previous navigation; may be empty.
    pub queue: Vec<Track>,
}

impl PlaybackState {
    /// Index of the current track within the queue, if it is a member.
    pub fn queue_position(&self) -> Option<usize> {
        let current = self.current_track.as_ref()?;
        self.queue.iter().position(|track| track.id == current.id)
    }

    pub fn has_track(&self) -> bool {
        self.current_track.is_some()
    }

    /// Duration for display purposes: the real duration once known,
    /// otherwise the track's hint. Playback logic uses `duration` directly.
    pub fn effective_duration(&self) -> f64 {
        if self.duration > 0.0 {
            return self.duration;
        }
        self.current_track
            .as_ref()
            .and_then(|track| track.duration_hint)
            .unwrap_or(0.0)
    }
}
