use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use projectile_sim::dynamics::Sample;
use projectile_sim::io::csv;
use projectile_sim::io::json::{self, FlightSummary};
use projectile_sim::sim::event::{EventKind, EventLog};
use projectile_sim::sim::{self, presets, Outcome, Paced, Pacing, Recorder, SampleSink, SimulationConfig};
use projectile_sim::Result;

/// Projectile trajectory with air resistance.
///
/// Every physical parameter left unset falls back to the preset or the config
/// file, whichever is given, then to the built-in defaults (a ping-pong ball
/// thrown at 6 m/s).
#[derive(Parser)]
#[command(name = "projectile-sim", version, about, long_about = None)]
struct Cli {
    /// Start from a named preset
    #[arg(long, value_parser = presets::NAMES, conflicts_with = "config")]
    preset: Option<String>,

    /// Start from a JSON config file
    #[arg(short, long)]
    config: Option<String>,

    /// Launch height (m) [default: 0.03]
    #[arg(long)]
    height: Option<f64>,

    /// Launch angle (degrees) [default: 45]
    #[arg(short, long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Initial velocity (m/s) [default: 6]
    #[arg(short, long)]
    velocity: Option<f64>,

    /// Gravity (m/s^2) [default: 9.81]
    #[arg(short, long)]
    gravity: Option<f64>,

    /// Air density (kg/m^3) [default: 1.225]
    #[arg(long)]
    density: Option<f64>,

    /// Reference surface area (m^2) [default: 0.00502654834]
    #[arg(long)]
    area: Option<f64>,

    /// Drag coefficient [default: 0.47]
    #[arg(long)]
    drag_coefficient: Option<f64>,

    /// Mass (kg) [default: 0.0027]
    #[arg(short, long)]
    mass: Option<f64>,

    /// Time step (s) [default: 0.01]
    #[arg(long)]
    time_step: Option<f64>,

    /// Abort if the projectile is still airborne after this many steps
    #[arg(long, default_value_t = 10_000_000)]
    max_steps: usize,

    /// Print samples as they are computed, pausing between them
    #[arg(long)]
    animate: bool,

    /// Pause per sample when animating (ms)
    #[arg(long, default_value_t = 1)]
    delay_ms: u64,

    /// Export trajectory to CSV
    #[arg(long)]
    csv: Option<String>,

    /// Export flight summary to JSON
    #[arg(long)]
    json: Option<String>,
}

impl Cli {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut cfg = match (&self.preset, &self.config) {
            (Some(name), _) => presets::by_name(name).unwrap_or_default(),
            (None, Some(path)) => SimulationConfig::from_json_file(path)?,
            (None, None) => SimulationConfig::default(),
        };

        let overrides = [
            (&mut cfg.height, self.height),
            (&mut cfg.angle, self.angle),
            (&mut cfg.velocity, self.velocity),
            (&mut cfg.gravity, self.gravity),
            (&mut cfg.density, self.density),
            (&mut cfg.area, self.area),
            (&mut cfg.drag_coefficient, self.drag_coefficient),
            (&mut cfg.mass, self.mass),
            (&mut cfg.time_step, self.time_step),
        ];
        for (field, value) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        cfg.max_steps = Some(cfg.max_steps.unwrap_or(self.max_steps));

        cfg.validate()?;
        Ok(cfg)
    }
}

// ---------------------------------------------------------------------------
// Terminal sink: records, detects events, optionally prints live
// ---------------------------------------------------------------------------

struct Terminal {
    recorder: Recorder,
    events: EventLog,
    live: bool,
}

impl SampleSink for Terminal {
    fn accept(&mut self, sample: &Sample) {
        if self.live {
            print_row(sample);
        }
        self.recorder.accept(sample);
        self.events.accept(sample);
    }

    fn finish(&mut self, outcome: &Outcome) {
        self.recorder.finish(outcome);
        self.events.finish(outcome);
    }
}

fn print_row(s: &Sample) {
    let phase = if s.is_below_ground() {
        "LANDED"
    } else if s.vel.y > 0.0 {
        "CLIMB"
    } else {
        "DESC"
    };
    println!(
        "  {:>5}  {:>7.3}  {:>8.4}  {:>8.4}  {:>8.3}  {:>7}",
        s.step,
        s.time,
        s.pos.x,
        s.pos.y,
        s.vel.norm(),
        phase
    );
}

fn print_table_header() {
    println!(
        "  {:>5}  {:>7}  {:>8}  {:>8}  {:>8}  {:>7}",
        "step", "t (s)", "x (m)", "y (m)", "v (m/s)", "phase"
    );
    println!("  {}", "─".repeat(52));
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.simulation_config()?;
    let pacing = Pacing::from_flag(cli.animate, Duration::from_millis(cli.delay_ms));

    print_parameters(&config);

    if cli.animate {
        println!("  Trajectory (live)");
        print_table_header();
    }

    let terminal = Terminal {
        recorder: Recorder::new(),
        events: EventLog::standard(),
        live: cli.animate,
    };
    let mut sink = Paced::new(terminal, pacing);
    let outcome = sim::simulate_with(&config, &mut sink)?;
    let Terminal { recorder, events, .. } = sink.into_inner();
    let trajectory = recorder.samples;

    if !cli.animate {
        println!("  Trajectory");
        print_table_header();
        let sample_interval = (trajectory.len() / 30).max(1);
        for (i, s) in trajectory.iter().enumerate() {
            if i % sample_interval == 0 || i == trajectory.len() - 1 {
                print_row(s);
            }
        }
    }
    println!();

    let Some(summary) = FlightSummary::from_trajectory(&config, &trajectory) else {
        return Ok(());
    };
    print_summary(&summary, &events, &outcome, &config);

    if let Some(path) = &cli.csv {
        csv::write_trajectory_file(path, &trajectory)?;
        println!("  Exported trajectory: {path}");
    }
    if let Some(path) = &cli.json {
        json::write_summary_file(path, &config, &summary)?;
        println!("  Exported summary:    {path}");
    }
    Ok(())
}

fn print_parameters(config: &SimulationConfig) {
    println!();
    println!("====================================================================");
    println!("  PROJECTILE TRAJECTORY WITH AIR RESISTANCE");
    println!("====================================================================");
    println!();
    println!("  Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Height:        {:>10.4} m        Angle:        {:>8.2} deg",
        config.height, config.angle
    );
    println!(
        "  Velocity:      {:>10.3} m/s      Gravity:      {:>8.3} m/s^2",
        config.velocity, config.gravity
    );
    println!(
        "  Air density:   {:>10.4} kg/m^3   Cd:           {:>8.3}",
        config.density, config.drag_coefficient
    );
    println!(
        "  Area:          {:>10.6} m^2      Mass:         {:>8.4} kg",
        config.area, config.mass
    );
    println!(
        "  Time step:     {:>10.5} s        Terminal vel: {:>8.2} m/s",
        config.time_step,
        config.drag_model().terminal_velocity(config.mass, config.gravity)
    );
    println!();
}

fn print_summary(summary: &FlightSummary, events: &EventLog, outcome: &Outcome, config: &SimulationConfig) {
    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    if let Some(apex) = events.first(&EventKind::Apex) {
        let s = &apex.sample;
        println!(
            "  APEX      t={:>7.3}s   x={:>8.4}m   y={:>8.4}m   v={:>7.3}m/s",
            s.time,
            s.pos.x,
            s.pos.y,
            s.vel.norm()
        );
    }
    if let Some(impact) = events.first(&EventKind::Impact) {
        let s = &impact.sample;
        println!(
            "  IMPACT    t={:>7.3}s   x={:>8.4}m   y={:>8.4}m   v={:>7.3}m/s",
            s.time,
            s.pos.x,
            s.pos.y,
            s.vel.norm()
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Max altitude:  {:>8.4} m", summary.apex_y_m);
    println!(
        "  Range:         {:>8.4} m   (vacuum {:.4} m, {:.1}% lost to drag)",
        summary.range_m, summary.vacuum_range_m, summary.range_loss_pct
    );
    println!("  Max speed:     {:>8.3} m/s", summary.max_speed_ms);
    println!("  Impact speed:  {:>8.3} m/s", summary.impact_speed_ms);
    println!("  Flight time:   {:>8.3} s", outcome.flight_time());
    println!();
    println!(
        "  Simulation: {} samples, {} steps, dt={} s",
        summary.samples, outcome.steps, config.time_step
    );
    println!("====================================================================");
    println!();
}
