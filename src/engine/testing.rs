//! Scripted `MediaHandle` for unit tests. Behavior is driven through a
//! shared script handle so tests can queue events and inspect calls while
//! an adapter or session owns the fake.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{MediaEvent, MediaHandle, PlaybackError};

#[derive(Default)]
pub(crate) struct MediaScript {
    pub loaded: Vec<String>,
    pub playing: bool,
    pub play_calls: u32,
    pub pause_calls: u32,
    pub position: f64,
    pub duration: Option<f64>,
    /// Until set, `set_position` answers `SeekNotReady`.
    pub seekable: bool,
    pub seeks: Vec<f64>,
    pub pending_events: VecDeque<MediaEvent>,
    pub reject_next_play: Option<String>,
    pub fail_next_load: Option<String>,
}

pub(crate) type ScriptHandle = Arc<Mutex<MediaScript>>;

pub(crate) struct ScriptedMedia {
    script: ScriptHandle,
}

impl ScriptedMedia {
    pub(crate) fn new() -> (Self, ScriptHandle) {
        let script: ScriptHandle = Arc::new(Mutex::new(MediaScript::default()));
        (
            Self {
                script: script.clone(),
            },
            script,
        )
    }

    /// A fake that is immediately seekable with a known duration, the
    /// common case for tests that are not about loading itself.
    pub(crate) fn ready(duration: f64) -> (Self, ScriptHandle) {
        let (media, script) = Self::new();
        {
            let mut s = script.lock().unwrap();
            s.seekable = true;
            s.duration = Some(duration);
        }
        (media, script)
    }
}

impl MediaHandle for ScriptedMedia {
    fn load(&mut self, url: &str) -> Result<(), PlaybackError> {
        let mut s = self.script.lock().unwrap();
        if let Some(message) = s.fail_next_load.take() {
            return Err(PlaybackError::Source(message));
        }
        s.loaded.push(url.to_string());
        s.playing = false;
        s.position = 0.0;
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut s = self.script.lock().unwrap();
        s.play_calls += 1;
        if let Some(message) = s.reject_next_play.take() {
            return Err(PlaybackError::Rejected(message));
        }
        s.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut s = self.script.lock().unwrap();
        s.pause_calls += 1;
        s.playing = false;
    }

    fn set_position(&mut self, seconds: f64) -> Result<(), PlaybackError> {
        let mut s = self.script.lock().unwrap();
        if !s.seekable {
            return Err(PlaybackError::SeekNotReady);
        }
        s.position = seconds;
        s.seeks.push(seconds);
        Ok(())
    }

    fn position(&self) -> f64 {
        self.script.lock().unwrap().position
    }

    fn duration(&self) -> Option<f64> {
        self.script.lock().unwrap().duration
    }

    fn poll(&mut self) -> Vec<MediaEvent> {
        self.script.lock().unwrap().pending_events.drain(..).collect()
    }
}
