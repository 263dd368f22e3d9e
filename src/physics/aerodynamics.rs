use nalgebra::Vector2;

/// Quadratic drag parameters: fluid density, reference area and drag coefficient.
///
/// `area` is the reference area exactly as supplied; it is never derived
/// from a radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragModel {
    pub density: f64,          // kg/m^3
    pub area: f64,             // m^2
    pub drag_coefficient: f64, // dimensionless
}

impl DragModel {
    pub fn new(density: f64, area: f64, drag_coefficient: f64) -> Self {
        Self { density, area, drag_coefficient }
    }

    /// No drag at all (any factor zero).
    pub fn is_vacuum(&self) -> bool {
        self.density == 0.0 || self.area == 0.0 || self.drag_coefficient == 0.0
    }

    /// Drag force `-0.5 * rho * A * Cd * |v| * v`.
    ///
    /// Each component carries the sign of its own velocity term, so the
    /// force always opposes the direction of motion.
    pub fn force(&self, vel: &Vector2<f64>) -> Vector2<f64> {
        let speed = vel.norm();
        let k = -0.5 * self.density * self.area * self.drag_coefficient * speed;
        vel * k
    }

    /// Speed at which drag balances weight: sqrt(2 m g / (rho A Cd)).
    /// Infinite in vacuum.
    pub fn terminal_velocity(&self, mass: f64, gravity: f64) -> f64 {
        if self.is_vacuum() {
            return f64::INFINITY;
        }
        (2.0 * mass * gravity / (self.density * self.area * self.drag_coefficient)).sqrt()
    }
}
