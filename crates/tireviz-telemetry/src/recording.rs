//! Telemetry recordings: frame sequences persisted as JSON.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tireviz_model::TelemetrySample;
use tracing::info;

use crate::TelemetryError;

/// One frame as delivered by a source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Frame index within the recording
    pub tick: u64,
    /// Whether the simulator was connected on this frame
    pub connected: bool,
    /// Raw sample; ignored when disconnected
    #[serde(default)]
    pub sample: TelemetrySample,
}

/// Recording metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    /// Where the frames came from
    pub source_id: String,
    /// Nominal frame rate (Hz)
    pub fps: f32,
    /// Number of frames
    pub frame_count: usize,
    /// Length in seconds at the nominal rate
    pub duration_seconds: f64,
    /// Free-form note
    pub description: Option<String>,
}

/// Recording session container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Recording metadata
    pub metadata: RecordingMetadata,
    /// Frames in order
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    /// Load a recording from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TelemetryError> {
        let file = File::open(path.as_ref())?;
        let recording: Recording = serde_json::from_reader(BufReader::new(file))?;
        if recording.frames.is_empty() {
            return Err(TelemetryError::EmptyRecording);
        }
        if !(recording.metadata.fps.is_finite() && recording.metadata.fps > 0.0) {
            return Err(TelemetryError::InvalidFrameRate(recording.metadata.fps));
        }
        Ok(recording)
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TelemetryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Fraction of frames that were connected.
    pub fn connected_ratio(&self) -> f32 {
        if self.frames.is_empty() {
            return 0.0;
        }
        let connected = self.frames.iter().filter(|f| f.connected).count();
        connected as f32 / self.frames.len() as f32
    }
}

/// Accumulates frames into a [`Recording`].
#[derive(Debug)]
pub struct SampleRecorder {
    output_path: PathBuf,
    source_id: String,
    fps: f32,
    frames: Vec<RecordedFrame>,
    recording: bool,
}

impl SampleRecorder {
    /// Recorder that will write to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            source_id: "unknown".to_string(),
            fps: 60.0,
            frames: Vec::new(),
            recording: false,
        }
    }

    /// Begin a fresh recording.
    pub fn start(&mut self, source_id: impl Into<String>, fps: f32) {
        self.source_id = source_id.into();
        self.fps = fps;
        self.frames.clear();
        self.recording = true;
    }

    /// Append a frame; ignored unless recording. Ticks are renumbered.
    pub fn record(&mut self, frame: RecordedFrame) {
        if self.recording {
            let tick = self.frames.len() as u64;
            self.frames.push(RecordedFrame { tick, ..frame });
        }
    }

    /// Frames captured so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Whether [`start`](Self::start) has been called without a matching stop.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Finish, write to disk and return the recording.
    pub fn stop(&mut self, description: Option<String>) -> Result<Recording, TelemetryError> {
        if !self.recording {
            return Err(TelemetryError::NotRecording);
        }
        self.recording = false;

        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(TelemetryError::InvalidFrameRate(self.fps));
        }

        let frames = std::mem::take(&mut self.frames);
        let recording = Recording {
            metadata: RecordingMetadata {
                source_id: self.source_id.clone(),
                fps: self.fps,
                frame_count: frames.len(),
                duration_seconds: frames.len() as f64 / f64::from(self.fps),
                description,
            },
            frames,
        };

        recording.save(&self.output_path)?;
        info!(
            path = %self.output_path.display(),
            frames = recording.metadata.frame_count,
            "Recording saved"
        );
        Ok(recording)
    }
}
