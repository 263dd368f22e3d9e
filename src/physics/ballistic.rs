use nalgebra::Vector2;

use crate::dynamics::state::KinematicState;

// ---------------------------------------------------------------------------
// Closed-form drag-free projectile motion
// ---------------------------------------------------------------------------

/// Ideal (vacuum) trajectory for the same launch conditions.
#[derive(Debug, Clone, Copy)]
pub struct VacuumTrajectory {
    pub height: f64,
    pub vel: Vector2<f64>,
    pub gravity: f64,
}

impl VacuumTrajectory {
    pub fn new(height: f64, angle_deg: f64, speed: f64, gravity: f64) -> Self {
        let launch = KinematicState::launch(height, angle_deg, speed);
        Self {
            height,
            vel: launch.vel,
            gravity,
        }
    }

    /// x = vx t,  y = h + vy t - g t^2 / 2
    pub fn position_at(&self, t: f64) -> Vector2<f64> {
        Vector2::new(
            self.vel.x * t,
            self.height + self.vel.y * t - 0.5 * self.gravity * t * t,
        )
    }

    /// Time at which y returns to zero (positive root).
    pub fn flight_time(&self) -> f64 {
        let vy = self.vel.y;
        (vy + (vy * vy + 2.0 * self.gravity * self.height).sqrt()) / self.gravity
    }

    pub fn range(&self) -> f64 {
        self.vel.x * self.flight_time()
    }

    /// Time of maximum altitude; zero when launched level or downward.
    pub fn apex_time(&self) -> f64 {
        (self.vel.y / self.gravity).max(0.0)
    }

    pub fn apex(&self) -> Vector2<f64> {
        self.position_at(self.apex_time())
    }
}
