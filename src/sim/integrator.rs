use crate::dynamics;
use crate::dynamics::point_mass::PointMass;
use crate::dynamics::state::KinematicState;

// ---------------------------------------------------------------------------
// Semi-implicit (symplectic) Euler
// ---------------------------------------------------------------------------

/// Single step: velocity first, then position from the *updated* velocity.
pub fn euler_step(state: &KinematicState, body: &PointMass, dt: f64) -> KinematicState {
    let accel = dynamics::acceleration(state, body);
    let vel = state.vel + accel * dt;
    KinematicState {
        pos: state.pos + vel * dt,
        vel,
    }
}
