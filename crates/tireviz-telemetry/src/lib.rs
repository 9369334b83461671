//! Telemetry sources for tireviz
//!
//! Everything that feeds frames into the model: connection tracking,
//! JSON recordings, replay and synthetic driving scenarios.
//!
//! # Example
//!
//! ```
//! use tireviz_telemetry::{Scenario, ScenarioSource, TelemetrySource};
//!
//! # fn main() -> Result<(), tireviz_telemetry::TelemetryError> {
//! let mut source = ScenarioSource::new(Scenario::Chicane, 60.0, Some(2))?;
//! assert_eq!(source.source_id(), "scenario:chicane");
//! assert!(source.poll().is_some());
//! assert!(source.poll().is_some());
//! assert!(source.poll().is_none());
//! # Ok(())
//! # }
//! ```

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod connection;
pub mod recording;
pub mod replay;
pub mod scenario;

pub use connection::{ConnectionEvent, ConnectionMonitor, ConnectionState};
pub use recording::{RecordedFrame, Recording, RecordingMetadata, SampleRecorder};
pub use replay::ReplaySource;
pub use scenario::{Scenario, ScenarioGenerator, ScenarioSource};

/// Errors from loading, saving or generating telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed recording
    #[error("Invalid recording JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Recording without frames
    #[error("Recording contains no frames")]
    EmptyRecording,

    /// Frame rate not finite and positive
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f32),

    /// `stop` called on an idle recorder
    #[error("Recorder is not recording")]
    NotRecording,

    /// Name that matches no scenario
    #[error("Unknown scenario '{0}'")]
    UnknownScenario(String),
}

/// A frame producer. One call to [`poll`](Self::poll) per display frame.
pub trait TelemetrySource {
    /// Stable identifier used in logs and recordings.
    fn source_id(&self) -> &str;

    /// Nominal frame rate (Hz).
    fn frame_rate(&self) -> f32;

    /// Next frame, or `None` once the source is exhausted.
    fn poll(&mut self) -> Option<RecordedFrame>;
}
