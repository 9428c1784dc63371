//! Drag-to-seek: pointer geometry and the scrub state machine.
//!
//! While a drag is in progress the UI owns the playback clock: previews
//! flow one way (UI to engine) and the engine's own feedback is held back
//! until the gesture commits.

mod controller;
mod pointer;

pub use controller::*;
pub use pointer::*;
