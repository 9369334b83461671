//! Routing of axis loads onto individual tires.
//!
//! The routing is a fixed policy: lateral load lands on one side of the car,
//! longitudinal load on one axle. A plan is computed first and then applied,
//! so the routing itself can be inspected without touching tire state.

use serde::{Deserialize, Serialize};

use crate::gforce::{LoadMagnitudes, NormalizedGForce};
use crate::tire::{LoadDirection, TirePosition, TireSet};

/// Fixed per-tire offsets added to the axis magnitude before routing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingOffsets {
    /// Offset for the front tire receiving lateral load
    pub lateral_front: f32,
    /// Offset for the rear tire receiving lateral load
    pub lateral_rear: f32,
    /// Offset for the front tires under braking
    pub longitudinal_front: f32,
    /// Offset for the rear tires under acceleration
    pub longitudinal_rear: f32,
}

impl Default for RoutingOffsets {
    fn default() -> Self {
        Self {
            lateral_front: 0.001,
            lateral_rear: -0.1,
            longitudinal_front: 0.0,
            longitudinal_rear: -0.1,
        }
    }
}

impl RoutingOffsets {
    /// True when every offset is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.lateral_front,
            self.lateral_rear,
            self.longitudinal_front,
            self.longitudinal_rear,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// One tire update within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireLoad {
    /// Target tire
    pub position: TirePosition,
    /// Load magnitude including offset
    pub load: f32,
    /// Zone weighting selector
    pub direction: LoadDirection,
}

/// Up to four tire updates, lateral axis first.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoutingPlan {
    loads: [Option<TireLoad>; 4],
    len: usize,
}

impl RoutingPlan {
    fn push(&mut self, load: TireLoad) {
        if let Some(slot) = self.loads.get_mut(self.len) {
            *slot = Some(load);
            self.len += 1;
        }
    }

    /// Updates in application order.
    pub fn iter(&self) -> impl Iterator<Item = &TireLoad> {
        self.loads.iter().flatten()
    }

    /// Number of updates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when neither axis triggered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Updates addressed to one tire.
    pub fn for_position(&self, position: TirePosition) -> impl Iterator<Item = &TireLoad> {
        self.iter().filter(move |load| load.position == position)
    }
}

/// Routes per-axis loads to tires.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadDistributor {
    offsets: RoutingOffsets,
}

impl LoadDistributor {
    /// Create a distributor with explicit offsets.
    pub fn new(offsets: RoutingOffsets) -> Self {
        Self { offsets }
    }

    /// Work out which tires get loaded this tick. An axis reading of zero
    /// routes nothing on that axis.
    pub fn plan(&self, g: NormalizedGForce, magnitudes: LoadMagnitudes) -> RoutingPlan {
        let mut plan = RoutingPlan::default();
        let o = &self.offsets;

        if g.lateral > 0.0 {
            plan.push(TireLoad {
                position: TirePosition::FrontRight,
                load: magnitudes.lateral + o.lateral_front,
                direction: LoadDirection::LateralPositive,
            });
            plan.push(TireLoad {
                position: TirePosition::RearRight,
                load: magnitudes.lateral + o.lateral_rear,
                direction: LoadDirection::LateralPositive,
            });
        } else if g.lateral < 0.0 {
            plan.push(TireLoad {
                position: TirePosition::FrontLeft,
                load: magnitudes.lateral + o.lateral_front,
                direction: LoadDirection::LateralNegative,
            });
            plan.push(TireLoad {
                position: TirePosition::RearLeft,
                load: magnitudes.lateral + o.lateral_rear,
                direction: LoadDirection::LateralNegative,
            });
        }

        if g.longitudinal > 0.0 {
            for position in [TirePosition::FrontLeft, TirePosition::FrontRight] {
                plan.push(TireLoad {
                    position,
                    load: magnitudes.longitudinal + o.longitudinal_front,
                    direction: LoadDirection::LongitudinalPositive,
                });
            }
        } else if g.longitudinal < 0.0 {
            for position in [TirePosition::RearLeft, TirePosition::RearRight] {
                plan.push(TireLoad {
                    position,
                    load: magnitudes.longitudinal + o.longitudinal_rear,
                    direction: LoadDirection::LongitudinalNegative,
                });
            }
        }

        plan
    }

    /// Apply a plan to the tires in order.
    pub fn apply(&self, plan: &RoutingPlan, tires: &mut TireSet) {
        for load in plan.iter() {
            tires.get_mut(load.position).update(load.load, load.direction);
        }
    }

    /// Plan and apply in one step.
    pub fn distribute(
        &self,
        g: NormalizedGForce,
        magnitudes: LoadMagnitudes,
        tires: &mut TireSet,
    ) -> RoutingPlan {
        let plan = self.plan(g, magnitudes);
        self.apply(&plan, tires);
        plan
    }

    /// Offsets in use.
    pub fn offsets(&self) -> &RoutingOffsets {
        &self.offsets
    }
}
