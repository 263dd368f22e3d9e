pub mod aerodynamics;
pub mod ballistic;
pub mod gravity;

pub use aerodynamics::DragModel;
pub use ballistic::VacuumTrajectory;
