use thiserror::Error;

/// Failures at the media boundary.
///
/// Only [`PlaybackError::Rejected`] reaches UI code, and only as the result
/// of a play request the caller made itself. Everything else is either
/// recovered inside the engine or mapped to defined fallback behavior.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The resource refused to start audio, e.g. a playback policy said no.
    #[error("playback rejected: {0}")]
    Rejected(String),

    /// A seek arrived before the resource could accept one. The adapter
    /// stores the target and applies it when metadata arrives; this variant
    /// never crosses the adapter boundary.
    #[error("seek requested before the media resource was ready")]
    SeekNotReady,

    /// The media source could not be opened or decoded.
    #[error("unplayable media source: {0}")]
    Source(String),

    /// The audio output device is unavailable.
    #[error("audio device unavailable: {0}")]
    Device(String),
}
