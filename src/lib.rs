//! Playback coordination core for an audio-sharing application.
//!
//! Many independent UI surfaces (a persistent mini-player, a per-track
//! embedded player, an artist-page track list) all want to drive the single
//! audible track. This crate holds the pieces that keep them from stepping
//! on each other:
//!
//! - [`player::PlayerCoordinator`]: the one source of truth for what is
//!   playing, which surface owns control, and where in the track we are.
//! - [`engine::EngineAdapter`]: wraps the single real media resource behind
//!   the [`engine::MediaHandle`] trait and normalizes its event stream.
//! - [`scrub::ScrubController`]: drag-to-seek without the native media
//!   events fighting the preview position.
//! - [`session::PlayerSession`]: wires the three together for consumers
//!   that want the whole stack rather than the parts.
//!
//! Tracks arrive fully formed from the data layer ([`track::Track`]); the
//! crate fetches nothing and renders nothing.

pub mod config;
pub mod engine;
pub mod player;
pub mod scrub;
pub mod session;
pub mod track;

pub use config::Settings;
pub use engine::{EngineAdapter, EngineSignal, MediaEvent, MediaHandle, PlaybackError, RodioMedia};
pub use player::{PlaybackState, PlayerCoordinator, PlayerSource, SubscriptionId};
pub use scrub::{ScrubController, SliderRect, progress_from_pointer};
pub use session::PlayerSession;
pub use track::{Track, decode_waveform, sample_evenly};
