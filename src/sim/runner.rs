use std::iter::FusedIterator;

use crate::dynamics::point_mass::PointMass;
use crate::dynamics::state::{KinematicState, Sample};
use crate::error::{Result, SimError};
use crate::sim::config::SimulationConfig;
use crate::sim::integrator::euler_step;
use crate::sim::sink::SampleSink;

// ---------------------------------------------------------------------------
// Lazy trajectory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Launch,
    Running,
    Terminated,
}

/// Pull-based trajectory: one sample per `next()`, starting with the launch
/// point and ending with the first sample below the ground.
///
/// After the landing sample or an error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Samples {
    body: PointMass,
    dt: f64,
    max_steps: Option<usize>,
    state: KinematicState,
    step: usize,
    phase: Phase,
}

impl Samples {
    fn new(config: &SimulationConfig) -> Self {
        Self {
            body: PointMass::from_config(config),
            dt: config.time_step,
            max_steps: config.max_steps,
            state: config.initial_state(),
            step: 0,
            phase: Phase::Launch,
        }
    }

    /// Current kinematic state (the most recently emitted sample's state).
    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// The most recently emitted sample.
    pub fn current(&self) -> Sample {
        Sample::new(self.step, self.dt, &self.state)
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    fn advance(&mut self) -> Result<Sample> {
        if let Some(limit) = self.max_steps {
            if self.step >= limit {
                return Err(SimError::StepBudgetExceeded { limit });
            }
        }

        let next = euler_step(&self.state, &self.body, self.dt);
        self.step += 1;
        if !next.is_finite() {
            return Err(SimError::NonFiniteResult { step: self.step });
        }
        // x never feeds back into the dynamics, so a step that leaves altitude
        // and velocity unchanged will repeat forever.
        if next.pos.y == self.state.pos.y && next.vel == self.state.vel {
            return Err(SimError::Stalled { step: self.step });
        }

        self.state = next;
        Ok(Sample::new(self.step, self.dt, &self.state))
    }
}

impl Iterator for Samples {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.phase {
            Phase::Terminated => return None,
            Phase::Launch => Ok(Sample::new(0, self.dt, &self.state)),
            Phase::Running => self.advance(),
        };

        self.phase = match &item {
            Ok(sample) if !sample.is_below_ground() => Phase::Running,
            _ => Phase::Terminated,
        };
        Some(item)
    }
}

impl FusedIterator for Samples {}

/// Validate the config and start a fresh trajectory.
///
/// Every call restarts from the launch point.
pub fn integrate(config: &SimulationConfig) -> Result<Samples> {
    config.validate()?;
    Ok(Samples::new(config))
}

// ---------------------------------------------------------------------------
// Full simulation
// ---------------------------------------------------------------------------

/// Summary of a completed run.
#[derive(Debug, Clone, Copy)]
pub struct Outcome {
    /// Integration steps taken (samples minus the launch point).
    pub steps: usize,
    /// First sample below the ground.
    pub landing: Sample,
}

impl Outcome {
    pub fn flight_time(&self) -> f64 {
        self.landing.time
    }
}

/// Run from launch to ground impact and return the whole trajectory.
pub fn simulate(config: &SimulationConfig) -> Result<Vec<Sample>> {
    integrate(config)?.collect()
}

/// Run from launch to ground impact, handing each sample to `sink`.
///
/// `finish` is called once the landing sample has been delivered. On error
/// the samples already delivered stay with the sink and `finish` is skipped.
pub fn simulate_with<S: SampleSink + ?Sized>(
    config: &SimulationConfig,
    sink: &mut S,
) -> Result<Outcome> {
    let mut samples = integrate(config)?;
    for sample in &mut samples {
        sink.accept(&sample?);
    }

    let landing = samples.current();
    let outcome = Outcome {
        steps: landing.step,
        landing,
    };
    sink.finish(&outcome);
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sink::Recorder;

    fn ping_pong() -> SimulationConfig {
        SimulationConfig::default()
    }

    #[test]
    fn starts_at_launch_point() {
        let first = integrate(&ping_pong()).unwrap().next().unwrap().unwrap();
        assert_eq!(first.step, 0);
        assert_eq!(first.time, 0.0);
        assert_eq!(first.x(), 0.0);
        assert_eq!(first.y(), 0.03);
    }

    #[test]
    fn ends_with_first_sample_below_ground() {
        let traj = simulate(&ping_pong()).unwrap();
        let (last, rest) = traj.split_last().unwrap();
        assert!(last.y() < 0.0);
        assert!(rest.iter().all(|s| s.y() >= 0.0));
    }

    #[test]
    fn exhausted_after_landing() {
        let mut it = integrate(&ping_pong()).unwrap();
        while let Some(s) = it.next() {
            s.unwrap();
        }
        assert!(it.is_terminated());
        assert!(it.next().is_none());
        assert!(it.state().pos.y < 0.0);
        assert_eq!(it.current().step, 66);
    }

    #[test]
    fn each_call_restarts() {
        let cfg = ping_pong();
        let a = simulate(&cfg).unwrap();
        let b = simulate(&cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ground_launch_with_no_upward_speed_lands_after_one_step() {
        let cfg = SimulationConfig {
            height: 0.0,
            velocity: 0.0,
            ..ping_pong()
        };
        let traj = simulate(&cfg).unwrap();
        assert_eq!(traj.len(), 2);
        assert_eq!(traj[0].y(), 0.0);
        assert!(traj[1].y() < 0.0);
    }

    #[test]
    fn ground_level_launch_does_not_stop_immediately() {
        let cfg = SimulationConfig {
            height: 0.0,
            ..ping_pong()
        };
        let traj = simulate(&cfg).unwrap();
        assert!(traj.len() > 10);
    }

    #[test]
    fn step_budget_is_reported() {
        let cfg = SimulationConfig {
            max_steps: Some(5),
            ..ping_pong()
        };
        let results: Vec<_> = integrate(&cfg).unwrap().collect();
        assert_eq!(results.len(), 7);
        assert!(results[..6].iter().all(|r| r.is_ok()));
        assert!(matches!(
            results[6],
            Err(SimError::StepBudgetExceeded { limit: 5 })
        ));
    }

    #[test]
    fn budget_large_enough_is_not_hit() {
        let cfg = SimulationConfig {
            max_steps: Some(66),
            ..ping_pong()
        };
        assert_eq!(simulate(&cfg).unwrap().len(), 67);
    }

    #[test]
    fn overflowing_state_is_reported() {
        // drag^2 overflows to infinity on the first step
        let cfg = SimulationConfig {
            velocity: 1e200,
            ..ping_pong()
        };
        let results: Vec<_> = integrate(&cfg).unwrap().collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[1], Err(SimError::NonFiniteResult { step: 1 })));
    }

    #[test]
    fn altitude_too_large_for_the_time_step_stalls() {
        // drag pins the speed at terminal velocity and y + vy*dt rounds back to y
        let cfg = SimulationConfig {
            height: 1e20,
            ..ping_pong()
        };
        let results: Vec<_> = integrate(&cfg).unwrap().collect();
        let (last, rest) = results.split_last().unwrap();
        assert!(rest.iter().all(|r| r.is_ok()));
        assert!(matches!(last, Err(SimError::Stalled { .. })));
        assert!(results.len() < 100_000);
    }

    #[test]
    fn vanishing_time_step_stalls_on_first_step() {
        let cfg = SimulationConfig {
            time_step: 1e-300,
            ..ping_pong()
        };
        let mut it = integrate(&cfg).unwrap();
        assert_eq!(it.next().unwrap().unwrap().step, 0);
        assert!(matches!(it.next(), Some(Err(SimError::Stalled { step: 1 }))));
        assert!(it.is_terminated());
        assert!(it.next().is_none());
    }

    #[test]
    fn invalid_config_fails_before_any_sample() {
        let cfg = SimulationConfig {
            mass: 0.0,
            ..ping_pong()
        };
        assert!(matches!(
            integrate(&cfg),
            Err(SimError::InvalidConfiguration { field: "mass", .. })
        ));
    }

    #[test]
    fn sink_sees_every_sample_then_finish() {
        let cfg = ping_pong();
        let mut rec = Recorder::new();
        let outcome = simulate_with(&cfg, &mut rec).unwrap();
        assert!(rec.finished);
        assert_eq!(rec.samples, simulate(&cfg).unwrap());
        assert_eq!(outcome.steps + 1, rec.samples.len());
        assert_eq!(outcome.landing, *rec.samples.last().unwrap());
        assert!((outcome.flight_time() - 0.66).abs() < 1e-12);
    }

    #[test]
    fn sink_not_finished_on_error() {
        let cfg = SimulationConfig {
            max_steps: Some(3),
            ..ping_pong()
        };
        let mut rec = Recorder::new();
        assert!(simulate_with(&cfg, &mut rec).is_err());
        assert!(!rec.finished);
        assert_eq!(rec.samples.len(), 4);
    }
}
