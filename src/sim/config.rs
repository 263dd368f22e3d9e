use serde::{Deserialize, Serialize};

use crate::dynamics::state::{KinematicState, G0};
use crate::error::{Result, SimError};
use crate::physics::DragModel;

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

/// Launch conditions, environment, projectile and step size for one run.
///
/// Missing fields in a JSON config take the values of [`Default`], which are
/// the parameter form defaults (a ping-pong ball thrown at 6 m/s).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub height: f64,           // m, launch altitude
    pub angle: f64,            // deg above horizontal
    pub velocity: f64,         // m/s, launch speed
    pub gravity: f64,          // m/s^2
    pub density: f64,          // kg/m^3, fluid density
    pub area: f64,             // m^2, reference area
    pub drag_coefficient: f64, // dimensionless
    pub mass: f64,             // kg
    pub time_step: f64,        // s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>, // hard stop, steps
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            height: 0.03,
            angle: 45.0,
            velocity: 6.0,
            gravity: G0,
            density: 1.225,
            area: 0.005_026_548_34,
            drag_coefficient: 0.47,
            mass: 0.0027,
            time_step: 0.01,
            max_steps: None,
        }
    }
}

impl SimulationConfig {
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
    }

    /// Parse a JSON config document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a JSON config file.
    pub fn from_json_file(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn drag_model(&self) -> DragModel {
        DragModel::new(self.density, self.area, self.drag_coefficient)
    }

    pub fn initial_state(&self) -> KinematicState {
        KinematicState::launch(self.height, self.angle, self.velocity)
    }

    /// Check every precondition the integrator relies on.
    ///
    /// Mass and time step must be strictly positive, gravity must pull down,
    /// and the launch must start at or above the ground.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("height", self.height),
            ("angle", self.angle),
            ("velocity", self.velocity),
            ("gravity", self.gravity),
            ("density", self.density),
            ("area", self.area),
            ("drag_coefficient", self.drag_coefficient),
            ("mass", self.mass),
            ("time_step", self.time_step),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(SimError::invalid(name, format!("must be finite, got {value}")));
            }
        }

        let non_negative = [
            ("height", self.height),
            ("velocity", self.velocity),
            ("density", self.density),
            ("area", self.area),
            ("drag_coefficient", self.drag_coefficient),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(SimError::invalid(name, format!("must be >= 0, got {value}")));
            }
        }

        let positive = [
            ("gravity", self.gravity),
            ("mass", self.mass),
            ("time_step", self.time_step),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(SimError::invalid(name, format!("must be > 0, got {value}")));
            }
        }

        if self.max_steps == Some(0) {
            return Err(SimError::invalid("max_steps", "must allow at least one step"));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config builder
// ---------------------------------------------------------------------------

pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self { config: SimulationConfig::default() }
    }

    pub fn height(mut self, v: f64) -> Self { self.config.height = v; self }
    pub fn angle(mut self, v: f64) -> Self { self.config.angle = v; self }
    pub fn velocity(mut self, v: f64) -> Self { self.config.velocity = v; self }
    pub fn gravity(mut self, v: f64) -> Self { self.config.gravity = v; self }
    pub fn density(mut self, v: f64) -> Self { self.config.density = v; self }
    pub fn area(mut self, v: f64) -> Self { self.config.area = v; self }
    pub fn drag_coefficient(mut self, v: f64) -> Self { self.config.drag_coefficient = v; self }
    pub fn mass(mut self, v: f64) -> Self { self.config.mass = v; self }
    pub fn time_step(mut self, v: f64) -> Self { self.config.time_step = v; self }
    pub fn max_steps(mut self, v: usize) -> Self { self.config.max_steps = Some(v); self }

    /// Finish and validate.
    pub fn build(self) -> Result<SimulationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Preset configurations
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    pub const NAMES: [&str; 4] = ["ping-pong", "golf", "vertical", "vacuum"];

    /// Parameter form defaults: 40 mm ping-pong ball thrown at 6 m/s.
    pub fn ping_pong() -> SimulationConfig {
        SimulationConfig::default()
    }

    /// Driven golf ball, 42.67 mm diameter, 45.93 g.
    pub fn golf() -> SimulationConfig {
        SimulationConfig {
            height: 0.0,
            angle: 12.0,
            velocity: 70.0,
            area: 0.001_430,
            drag_coefficient: 0.25,
            mass: 0.045_93,
            time_step: 0.001,
            ..SimulationConfig::default()
        }
    }

    /// Ping-pong ball shot straight up.
    pub fn vertical() -> SimulationConfig {
        SimulationConfig {
            height: 0.0,
            angle: 90.0,
            velocity: 10.0,
            ..SimulationConfig::default()
        }
    }

    /// Same launch as the ping-pong ball with the air removed.
    pub fn vacuum() -> SimulationConfig {
        SimulationConfig {
            density: 0.0,
            ..SimulationConfig::default()
        }
    }

    pub fn by_name(name: &str) -> Option<SimulationConfig> {
        match name {
            "ping-pong" => Some(ping_pong()),
            "golf" => Some(golf()),
            "vertical" => Some(vertical()),
            "vacuum" => Some(vacuum()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: SimError) -> &'static str {
        match err {
            SimError::InvalidConfiguration { field, .. } => field,
            other => panic!("expected InvalidConfiguration, got {other}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_mass_rejected() {
        let err = SimulationConfig::builder().mass(0.0).build().unwrap_err();
        assert_eq!(field_of(err), "mass");
    }

    #[test]
    fn non_positive_time_step_rejected() {
        for dt in [0.0, -0.01] {
            let err = SimulationConfig::builder().time_step(dt).build().unwrap_err();
            assert_eq!(field_of(err), "time_step");
        }
    }

    #[test]
    fn non_positive_gravity_rejected() {
        let err = SimulationConfig::builder().gravity(0.0).build().unwrap_err();
        assert_eq!(field_of(err), "gravity");
    }

    #[test]
    fn negative_height_rejected() {
        let err = SimulationConfig::builder().height(-1.0).build().unwrap_err();
        assert_eq!(field_of(err), "height");
    }

    #[test]
    fn nan_rejected_before_sign_checks() {
        let err = SimulationConfig::builder().density(f64::NAN).build().unwrap_err();
        assert_eq!(field_of(err), "density");
    }

    #[test]
    fn zero_step_budget_rejected() {
        let err = SimulationConfig::builder().max_steps(0).build().unwrap_err();
        assert_eq!(field_of(err), "max_steps");
    }

    #[test]
    fn json_missing_fields_take_defaults() {
        let cfg = SimulationConfig::from_json(r#"{ "angle": 60.0, "velocity": 8.0 }"#).unwrap();
        assert_eq!(cfg.angle, 60.0);
        assert_eq!(cfg.velocity, 8.0);
        assert_eq!(cfg.mass, 0.0027);
        assert_eq!(cfg.max_steps, None);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = SimulationConfig::from_json("{ angle: }").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn presets_are_valid() {
        for name in presets::NAMES {
            let cfg = presets::by_name(name).unwrap();
            assert!(cfg.validate().is_ok(), "preset {name} should validate");
        }
        assert!(presets::by_name("cannonball").is_none());
        assert!(presets::vacuum().drag_model().is_vacuum());
    }
}
