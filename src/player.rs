//! Playback coordination: sources, shared state and the coordinator.
//!
//! [`PlayerCoordinator`] is the single owner of the process-wide
//! [`PlaybackState`]. Every UI surface reads the state and issues commands;
//! none of them mutates it directly. Ownership between surfaces is
//! cooperative: the coordinator honors commands from any [`PlayerSource`]
//! and leaves it to callers to check [`PlayerCoordinator::is_source_active`]
//! or hand control over first.

mod coordinator;
mod source;
mod state;

pub use coordinator::*;
pub use source::*;
pub use state::*;
