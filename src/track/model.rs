/// A playable track as supplied by the data layer.
///
/// `id` is opaque and stable across fetches; it is the only field playback
/// logic compares. `title` and `artist` are display metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Absolute URL, or a path to resolve against the configured media origin.
    pub audio_url: String,
    /// Persisted amplitude string, decoded lazily via [`super::decode_waveform`].
    pub waveform_data: Option<String>,
    /// Duration in seconds, usable before the real media duration is known.
    pub duration_hint: Option<f64>,
}

impl Track {
    /// The URL to hand to the media backend. Absolute URLs pass through;
    /// anything else gets the media origin prefixed.
    pub fn resolved_url(&self, origin: &str) -> String {
        if self.audio_url.starts_with("http") {
            self.audio_url.clone()
        } else {
            format!("{origin}{}", self.audio_url)
        }
    }
}
