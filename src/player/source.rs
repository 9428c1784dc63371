use std::fmt;

/// Identifies which UI surface currently owns playback control.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerSource {
    /// The persistent mini-player that survives navigation.
    Global,
    /// The dedicated track detail page.
    TrackView,
    /// A track list on an artist profile page.
    ArtistView,
}

impl PlayerSource {
    /// Tie-break guideline for surfaces that choose to acquire control on
    /// mount. The coordinator itself never consults this; transfers are
    /// always explicit commands.
    pub fn priority(self) -> u8 {
        match self {
            PlayerSource::TrackView => 3,
            PlayerSource::ArtistView => 2,
            PlayerSource::Global => 1,
        }
    }

    /// Whether a surface of this kind takes control when it mounts.
    /// Only the track detail page does; everything else waits for the user.
    pub fn auto_acquires_on_mount(self) -> bool {
        matches!(self, PlayerSource::TrackView)
    }
}

impl fmt::Display for PlayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerSource::Global => "global",
            PlayerSource::TrackView => "track-view",
            PlayerSource::ArtistView => "artist-view",
        };
        f.write_str(name)
    }
}
