//! Connection state tracking for a telemetry source.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Whether the simulator feed is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConnectionState {
    /// No data; the model is frozen
    #[default]
    Disconnected,
    /// Data flowing; the model ticks
    Connected,
}

impl ConnectionState {
    /// Whether ticks should run.
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    fn from_flag(connected: bool) -> Self {
        if connected {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }
}

/// A state change observed at a given frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEvent {
    /// Source that changed state
    pub source_id: String,
    /// Frame index at which the change was seen
    pub frame: u64,
    /// State before
    pub previous_state: ConnectionState,
    /// State after
    pub new_state: ConnectionState,
}

impl ConnectionEvent {
    /// Connected → Disconnected.
    pub fn is_disconnection(&self) -> bool {
        self.previous_state.is_connected() && !self.new_state.is_connected()
    }

    /// Disconnected → Connected.
    pub fn is_connection(&self) -> bool {
        !self.previous_state.is_connected() && self.new_state.is_connected()
    }
}

/// Follows the per-frame connected flag and reports transitions.
#[derive(Debug)]
pub struct ConnectionMonitor {
    source_id: String,
    state: ConnectionState,
    frames: u64,
    connected_frames: u64,
    connections: u32,
    disconnections: u32,
}

impl ConnectionMonitor {
    /// Start in the disconnected state.
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            state: ConnectionState::Disconnected,
            frames: 0,
            connected_frames: 0,
            connections: 0,
            disconnections: 0,
        }
    }

    /// Record one frame's flag. Returns an event when the state changed.
    pub fn observe(&mut self, connected: bool) -> Option<ConnectionEvent> {
        let frame = self.frames;
        self.frames += 1;
        if connected {
            self.connected_frames += 1;
        }

        let new_state = ConnectionState::from_flag(connected);
        if new_state == self.state {
            return None;
        }

        let event = ConnectionEvent {
            source_id: self.source_id.clone(),
            frame,
            previous_state: self.state,
            new_state,
        };
        self.state = new_state;

        if event.is_connection() {
            self.connections += 1;
            info!(source = %self.source_id, frame, "Telemetry connected");
        } else {
            self.disconnections += 1;
            info!(source = %self.source_id, frame, "Telemetry disconnected");
        }
        debug!(?event, "Connection state changed");

        Some(event)
    }

    /// Current state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Frames observed.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames observed while connected.
    pub fn connected_frames(&self) -> u64 {
        self.connected_frames
    }

    /// Disconnected → Connected transitions.
    pub fn connections(&self) -> u32 {
        self.connections
    }

    /// Connected → Disconnected transitions.
    pub fn disconnections(&self) -> u32 {
        self.disconnections
    }
}
