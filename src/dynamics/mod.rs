pub mod point_mass;
pub mod state;

pub use point_mass::{acceleration, PointMass};
pub use state::{KinematicState, Sample};
