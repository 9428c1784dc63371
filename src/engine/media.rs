use super::PlaybackError;

/// Native notifications from the underlying media resource.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Metadata arrived; the resource is seekable from here on.
    MetadataLoaded { duration: f64 },
    /// The reported duration changed after metadata.
    DurationChanged(f64),
    /// The playback clock moved.
    TimeAdvanced(f64),
    /// The resource reached the end of its source.
    Ended,
    /// The resource stopped feeding audio without being asked to.
    Stalled,
    /// Playback actually started.
    PlayBegan,
    /// Playback actually stopped.
    PauseBegan,
    /// The resource failed.
    Error(String),
}

/// One playable media resource.
///
/// Implementations own exactly one underlying resource at a time; loading a
/// new source replaces the previous one. `poll` drains whatever events the
/// resource produced since the previous call, standing in for a push-style
/// event subscription. Handles live on the UI thread that drives playback;
/// nothing here needs to cross threads.
pub trait MediaHandle {
    /// Point the resource at a new source. Positions reset to zero.
    fn load(&mut self, url: &str) -> Result<(), PlaybackError>;

    /// Start or resume audio. May be rejected by the backend.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    /// Move the playback clock. Fails with [`PlaybackError::SeekNotReady`]
    /// until the resource is seekable.
    fn set_position(&mut self, seconds: f64) -> Result<(), PlaybackError>;

    /// Current playback clock in seconds.
    fn position(&self) -> f64;

    /// Duration in seconds once metadata is known.
    fn duration(&self) -> Option<f64>;

    /// Drain pending native events, oldest first.
    fn poll(&mut self) -> Vec<MediaEvent>;
}
