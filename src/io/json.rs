use std::io::Write;

use serde::Serialize;

use crate::dynamics::state::Sample;
use crate::error::Result;
use crate::physics::VacuumTrajectory;
use crate::sim::config::SimulationConfig;

/// Summary statistics computed from a trajectory.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub samples: usize,
    pub flight_time_s: f64,
    pub range_m: f64,
    pub apex_x_m: f64,
    pub apex_y_m: f64,
    pub apex_time_s: f64,
    pub max_speed_ms: f64,
    pub impact_speed_ms: f64,
    pub vacuum_range_m: f64,
    /// Range lost to drag relative to the vacuum trajectory, percent.
    pub range_loss_pct: f64,
}

impl FlightSummary {
    /// Compute summary from trajectory data. `None` for an empty trajectory.
    pub fn from_trajectory(config: &SimulationConfig, trajectory: &[Sample]) -> Option<Self> {
        let last = trajectory.last()?;
        let apex = trajectory
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

        let max_speed = trajectory
            .iter()
            .map(|s| s.vel.norm())
            .fold(0.0_f64, f64::max);

        let vacuum = VacuumTrajectory::new(
            config.height,
            config.angle,
            config.velocity,
            config.gravity,
        );
        let vacuum_range = vacuum.range();
        let range_loss_pct = if vacuum_range.abs() > 1e-12 {
            100.0 * (1.0 - last.pos.x / vacuum_range)
        } else {
            0.0
        };

        Some(FlightSummary {
            samples: trajectory.len(),
            flight_time_s: last.time,
            range_m: last.pos.x,
            apex_x_m: apex.pos.x,
            apex_y_m: apex.pos.y,
            apex_time_s: apex.time,
            max_speed_ms: max_speed,
            impact_speed_ms: last.vel.norm(),
            vacuum_range_m: vacuum_range,
            range_loss_pct,
        })
    }
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a SimulationConfig,
    performance: &'a FlightSummary,
}

/// Write config and flight summary as pretty JSON.
pub fn write_summary<W: Write>(
    writer: &mut W,
    config: &SimulationConfig,
    summary: &FlightSummary,
) -> Result<()> {
    let report = Report { config, performance: summary };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(
    path: &str,
    config: &SimulationConfig,
    summary: &FlightSummary,
) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, config, summary)
}
