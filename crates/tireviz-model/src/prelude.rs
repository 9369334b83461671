//! Prelude for the model crate.
//!
//! ```
//! use tireviz_model::prelude::*;
//!
//! let mut tire = TireState::default();
//! tire.update(0.5, LoadDirection::Unspecified);
//! assert_eq!(tire.history().len(), 1);
//! ```

pub use crate::color::{IndicatorScale, Rgb, ZoneHeatScale};
pub use crate::config::{DecayProfile, ModelConfig};
pub use crate::distributor::{LoadDistributor, RoutingOffsets, RoutingPlan, TireLoad};
pub use crate::error::ConfigError;
pub use crate::gforce::{
    Axis, GForceDisplay, GForceNormalizer, IndicatorPoint, LoadMagnitudes, NormalizedGForce,
    Velocity,
};
pub use crate::sample::TelemetrySample;
pub use crate::session::{Session, SessionSnapshot, TickOutcome};
pub use crate::tire::{LoadDirection, TireConfig, TirePosition, TireSet, TireState, Zone};
