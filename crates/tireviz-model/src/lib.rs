//! Tire Wear and G-Force Model for tireviz
//!
//! This crate holds the numeric core behind the tire heatmap and g-ball
//! displays. It consumes one raw telemetry sample per frame and keeps the
//! accumulated wear of all four tires.
//!
//! # Overview
//!
//! - **Tire**: per-tire inner/center/outer wear with update-then-decay
//! - **GForce**: raw acceleration to g, load magnitudes, indicator mapping
//! - **Distributor**: fixed routing of axis loads onto tires
//! - **Session**: per-tick orchestration, reset and snapshots
//! - **Config**: every tunable constant, loadable from YAML or JSON
//!
//! # Example
//!
//! ```
//! use tireviz_model::prelude::*;
//!
//! let mut session = Session::new(ModelConfig::default());
//!
//! // One frame: 1 g to the right, no braking
//! let sample = TelemetrySample::from_accel(9.81, 0.0);
//! let outcome = session.tick(true, &sample);
//! assert!(outcome.is_applied());
//!
//! let snapshot = session.snapshot();
//! assert!(snapshot.front_right.inner > 0.0);
//! assert_eq!(snapshot.front_left.inner, 0.0);
//!
//! session.reset();
//! assert_eq!(session.snapshot().front_right.inner, 0.0);
//! ```

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod color;
pub mod config;
pub mod distributor;
pub mod error;
pub mod gforce;
pub mod prelude;
pub mod sample;
pub mod session;
pub mod tire;

pub use color::{IndicatorScale, Rgb, ZoneHeatScale};
pub use config::{DecayProfile, ModelConfig};
pub use distributor::{LoadDistributor, RoutingOffsets, RoutingPlan, TireLoad};
pub use error::ConfigError;
pub use gforce::{
    Axis, DisplayConfig, GForceDisplay, GForceNormalizer, IndicatorPoint, LoadMagnitudes,
    NormalizedGForce, Velocity, VelocityBias,
};
pub use sample::TelemetrySample;
pub use session::{Session, SessionSnapshot, TickOutcome};
pub use tire::{
    DirectionWeights, LoadDirection, TireConfig, TirePosition, TireSet, TireSnapshot, TireState,
    Zone, ZoneWeights,
};
