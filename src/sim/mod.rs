pub mod config;
pub mod event;
pub mod integrator;
pub mod runner;
pub mod sink;

pub use config::{presets, SimulationConfig, SimulationConfigBuilder};
pub use integrator::euler_step;
pub use runner::{integrate, simulate, simulate_with, Outcome, Samples};
pub use sink::{Pacing, Paced, Recorder, SampleSink};
