use nalgebra::Vector2;

use crate::dynamics::state::KinematicState;
use crate::physics::gravity::gravity_accel;
use crate::physics::DragModel;
use crate::sim::config::SimulationConfig;

// ---------------------------------------------------------------------------
// Planar point-mass equations of motion
// ---------------------------------------------------------------------------

/// Body and environment parameters that enter the equations of motion.
#[derive(Debug, Clone, Copy)]
pub struct PointMass {
    pub mass: f64,    // kg
    pub gravity: f64, // m/s^2
    pub drag: DragModel,
}

impl PointMass {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            mass: config.mass,
            gravity: config.gravity,
            drag: config.drag_model(),
        }
    }
}

/// Acceleration of the body in the given state.
///
/// Forces modeled:
///   1. Gravity: uniform, straight down
///   2. Drag: quadratic, opposing velocity
pub fn acceleration(state: &KinematicState, body: &PointMass) -> Vector2<f64> {
    let f_drag = body.drag.force(&state.vel);
    f_drag / body.mass + gravity_accel(body.gravity)
}
