use std::time::{Duration, Instant};

use clap::Parser;
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use projectile_sim::dynamics::Sample;
use projectile_sim::io::json::FlightSummary;
use projectile_sim::sim::{self, presets, Pacing, Samples, SimulationConfig};

/// Plot a projectile trajectory, optionally drawn live.
#[derive(Parser)]
#[command(name = "projectile-viz", about, long_about = None)]
struct Args {
    /// Named preset
    #[arg(long, value_parser = presets::NAMES, default_value = "ping-pong", conflicts_with = "config")]
    preset: String,

    /// JSON config file
    #[arg(short, long)]
    config: Option<String>,

    /// Reveal the trajectory one sample per frame delay
    #[arg(long)]
    animate: bool,

    /// Delay per sample when animating (ms)
    #[arg(long, default_value_t = 1)]
    delay_ms: u64,
}

fn main() -> eframe::Result {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path),
        None => Ok(presets::by_name(&args.preset).unwrap_or_default()),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let samples = match sim::integrate(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let pacing = Pacing::from_flag(args.animate, Duration::from_millis(args.delay_ms));
    let app = TrajectoryViz::new(config, samples, pacing);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Projectile Trajectory with Air Resistance",
        options,
        Box::new(|_| Ok(Box::new(app))),
    )
}

struct TrajectoryViz {
    config: SimulationConfig,
    source: Samples,
    pacing: Pacing,
    trajectory: Vec<Sample>,
    error: Option<String>,
    started: Instant,
}

impl TrajectoryViz {
    fn new(config: SimulationConfig, source: Samples, pacing: Pacing) -> Self {
        Self {
            config,
            source,
            pacing,
            trajectory: Vec::new(),
            error: None,
            started: Instant::now(),
        }
    }

    /// Pull as many samples as the pacing allows for this frame.
    fn pull(&mut self) {
        let due = match self.pacing {
            Pacing::Immediate => usize::MAX,
            Pacing::Animated(delay) => {
                let per = delay.as_secs_f64().max(1e-6);
                (self.started.elapsed().as_secs_f64() / per) as usize + 1
            }
        };
        while self.trajectory.len() < due {
            match self.source.next() {
                Some(Ok(sample)) => self.trajectory.push(sample),
                Some(Err(e)) => {
                    self.error = Some(e.to_string());
                    break;
                }
                None => break,
            }
        }
    }

    fn done(&self) -> bool {
        self.source.is_terminated()
    }
}

impl eframe::App for TrajectoryViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pull();
        if !self.done() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Projectile Trajectory with Air Resistance");
            let c = &self.config;
            ui.label(format!(
                "h={} m  |  angle={} deg  |  v0={} m/s  |  g={}  |  rho={}  |  A={}  |  Cd={}  |  m={} kg  |  dt={} s",
                c.height, c.angle, c.velocity, c.gravity, c.density, c.area,
                c.drag_coefficient, c.mass, c.time_step,
            ));
            if let Some(err) = &self.error {
                ui.colored_label(egui::Color32::RED, err);
            } else if self.done() {
                if let Some(s) = FlightSummary::from_trajectory(c, &self.trajectory) {
                    ui.label(format!(
                        "Apex: {:.3} m  |  Range: {:.3} m (vacuum {:.3} m)  |  Flight: {:.2} s  |  Samples: {}",
                        s.apex_y_m, s.range_m, s.vacuum_range_m, s.flight_time_s, s.samples,
                    ));
                }
            } else {
                ui.label(format!("Drawing... {} samples", self.trajectory.len()));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let path: PlotPoints = self.trajectory.iter().map(|s| [s.pos.x, s.pos.y]).collect();
            let head: PlotPoints = self
                .trajectory
                .last()
                .map(|s| vec![[s.pos.x, s.pos.y]])
                .unwrap_or_default()
                .into();
            Plot::new("trajectory")
                .x_axis_label("Horizontal Distance (m)")
                .y_axis_label("Vertical Distance (m)")
                .data_aspect(1.0)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Trajectory", path).width(2.0));
                    plot_ui.points(Points::new("Projectile", head).radius(4.0));
                });
        });
    }
}
