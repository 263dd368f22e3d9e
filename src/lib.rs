//! # projectile-sim
//!
//! Planar projectile flight under uniform gravity and quadratic air drag,
//! integrated with semi-implicit Euler until the projectile drops below the
//! ground plane.
//!
//! ```no_run
//! use projectile_sim::sim::{self, SimulationConfig};
//!
//! let config = SimulationConfig::builder().angle(60.0).velocity(8.0).build()?;
//! for sample in sim::integrate(&config)? {
//!     let sample = sample?;
//!     println!("{:.3} {:.3}", sample.x(), sample.y());
//! }
//! # Ok::<(), projectile_sim::SimError>(())
//! ```

pub mod dynamics;
pub mod error;
pub mod io;
pub mod physics;
pub mod sim;

pub use error::{Result, SimError};

pub mod types {
    pub use crate::dynamics::state::{KinematicState, Sample, G0};
    pub use crate::physics::DragModel;
    pub use crate::sim::config::SimulationConfig;
}
