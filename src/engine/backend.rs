use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use super::{MediaEvent, MediaHandle, PlaybackError};

/// [`MediaHandle`] over a rodio sink on the default output device.
///
/// rodio has no push-style event stream, so `poll` synthesizes events by
/// diffing the sink against the previous call: pause flips, clock movement
/// and the sink draining to empty.
pub struct RodioMedia {
    stream: OutputStream,
    sink: Option<Sink>,
    duration: Option<f64>,
    metadata_announced: bool,
    last_position: f64,
    was_paused: bool,
    ended: bool,
}

impl RodioMedia {
    pub fn new() -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        // rodio logs to stderr when the stream drops; keep the host app quiet.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            duration: None,
            metadata_announced: false,
            last_position: 0.0,
            was_paused: true,
            ended: false,
        })
    }
}

impl MediaHandle for RodioMedia {
    fn load(&mut self, url: &str) -> Result<(), PlaybackError> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        debug!(url, "opening media source");
        let file = File::open(url).map_err(|e| PlaybackError::Source(format!("{url}: {e}")))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| PlaybackError::Source(format!("{url}: {e}")))?;

        self.duration = source.total_duration().map(|d| d.as_secs_f64());

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();
        self.sink = Some(sink);

        self.metadata_announced = false;
        self.last_position = 0.0;
        self.was_paused = true;
        self.ended = false;
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        match &self.sink {
            Some(sink) if !sink.empty() => {
                sink.play();
                Ok(())
            }
            _ => Err(PlaybackError::Rejected(
                "no playable source loaded".to_string(),
            )),
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn set_position(&mut self, seconds: f64) -> Result<(), PlaybackError> {
        let Some(sink) = &self.sink else {
            return Err(PlaybackError::SeekNotReady);
        };
        sink.try_seek(Duration::from_secs_f64(seconds.max(0.0)))
            .map_err(|_| PlaybackError::SeekNotReady)?;
        self.last_position = seconds.max(0.0);
        Ok(())
    }

    fn position(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|sink| sink.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn poll(&mut self) -> Vec<MediaEvent> {
        let mut events = Vec::new();
        let Some(sink) = &self.sink else {
            return events;
        };

        if !self.metadata_announced {
            if let Some(duration) = self.duration {
                events.push(MediaEvent::MetadataLoaded { duration });
                self.metadata_announced = true;
            }
        }

        let paused = sink.is_paused();
        if paused != self.was_paused {
            events.push(if paused {
                MediaEvent::PauseBegan
            } else {
                MediaEvent::PlayBegan
            });
            self.was_paused = paused;
        }

        if sink.empty() {
            if !self.ended {
                self.ended = true;
                events.push(MediaEvent::Ended);
            }
            return events;
        }

        let position = sink.get_pos().as_secs_f64();
        if !paused && position != self.last_position {
            self.last_position = position;
            events.push(MediaEvent::TimeAdvanced(position));
        }

        events
    }
}
