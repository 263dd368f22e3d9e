use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.81; // gravity used by the parameter form, m/s^2

// ---------------------------------------------------------------------------
// Kinematic state: planar position and velocity
// ---------------------------------------------------------------------------

/// Point-mass state in the launch plane.
/// Frame: x downrange, y up, origin at the launch point on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub pos: Vector2<f64>, // m
    pub vel: Vector2<f64>, // m/s
}

impl KinematicState {
    /// Launch state from height, angle (degrees) and speed.
    ///
    /// A launch angle of exactly 90 degrees is taken as straight up, so the
    /// horizontal component is an exact zero rather than `v0 * cos(pi/2)`.
    pub fn launch(height: f64, angle_deg: f64, speed: f64) -> Self {
        let vel = if angle_deg == 90.0 {
            Vector2::new(0.0, speed)
        } else {
            let alpha = angle_deg.to_radians();
            Vector2::new(speed * alpha.cos(), speed * alpha.sin())
        };
        Self {
            pos: Vector2::new(0.0, height),
            vel,
        }
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    pub fn is_finite(&self) -> bool {
        self.pos.iter().chain(self.vel.iter()).all(|c| c.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Trajectory sample
// ---------------------------------------------------------------------------

/// One point of the trajectory. Sample `step` sits at `time = step * dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub step: usize,
    pub time: f64,
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
}

impl Sample {
    pub fn new(step: usize, dt: f64, state: &KinematicState) -> Self {
        Self {
            step,
            time: step as f64 * dt,
            pos: state.pos,
            vel: state.vel,
        }
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    /// Below the ground plane. A sample exactly at `y == 0` is not.
    pub fn is_below_ground(&self) -> bool {
        self.pos.y < 0.0
    }
}
