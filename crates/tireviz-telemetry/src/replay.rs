//! Frame-by-frame playback of a [`Recording`].

use std::path::Path;
use tracing::debug;

use crate::recording::{RecordedFrame, Recording};
use crate::{TelemetryError, TelemetrySource};

/// Plays back recorded frames in order.
#[derive(Debug)]
pub struct ReplaySource {
    recording: Recording,
    cursor: usize,
}

impl ReplaySource {
    /// Wrap an in-memory recording.
    pub fn new(recording: Recording) -> Self {
        Self {
            recording,
            cursor: 0,
        }
    }

    /// Load and wrap a recording file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TelemetryError> {
        let path = path.as_ref();
        let recording = Recording::load(path)?;
        debug!(
            path = %path.display(),
            frames = recording.frames.len(),
            "Loaded recording"
        );
        Ok(Self::new(recording))
    }

    /// Underlying recording.
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Number of frames in the recording.
    pub fn len(&self) -> usize {
        self.recording.frames.len()
    }

    /// Whether the recording has no frames.
    pub fn is_empty(&self) -> bool {
        self.recording.frames.is_empty()
    }

    /// Whether every frame has been played.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.recording.frames.len()
    }

    /// Fraction of frames played, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.recording.frames.is_empty() {
            return 1.0;
        }
        self.cursor as f32 / self.recording.frames.len() as f32
    }

    /// Rewind to the first frame.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl TelemetrySource for ReplaySource {
    fn source_id(&self) -> &str {
        &self.recording.metadata.source_id
    }

    fn frame_rate(&self) -> f32 {
        self.recording.metadata.fps
    }

    fn poll(&mut self) -> Option<RecordedFrame> {
        let frame = self.recording.frames.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(frame)
    }
}
