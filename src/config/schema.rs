use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/wavedeck/config.toml` or `~/.config/wavedeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `WAVEDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub media: MediaSettings,
    pub playback: PlaybackSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            media: MediaSettings::default(),
            playback: PlaybackSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Origin prefixed onto relative `audio_url` values. Absolute URLs pass
    /// through untouched.
    pub origin: String,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8000/media/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Minimum gap between accepted engine time updates (milliseconds).
    /// Set to 0 to accept every update.
    pub time_throttle_ms: u64,
    /// How long to ignore engine time echo after a committed seek
    /// (milliseconds), so a stale clock report cannot yank the playhead back.
    pub seek_settle_ms: u64,
    /// Whether a stalled resource gets one automatic play retry.
    pub stall_retry: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            time_throttle_ms: 100,
            seek_settle_ms: 500,
            stall_retry: true,
        }
    }
}
