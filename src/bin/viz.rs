use clap::Parser;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use arrow_flight::cli::{load_catalog, EngineArgs};
use arrow_flight::dynamics::state::FlightState;
use arrow_flight::logging;
use arrow_flight::sight::{ring_hit, ring_outline, RING_DIAMETERS};
use arrow_flight::sim::{solve, Solution, Target};

#[derive(Parser)]
#[command(
    name = "arrow-flight-viz",
    about = "Plot solved arrow trajectories",
    allow_negative_numbers = true
)]
struct Cli {
    /// Target horizontal distance [m]
    target_x: f64,

    /// Target height relative to the bow [m]
    target_y: f64,

    #[arg(default_value = "default")]
    profiles: Vec<String>,

    #[arg(short, long)]
    config_file: Option<std::path::PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let catalog = load_catalog(cli.config_file.as_deref())?;
    let target = Target::new(cli.target_x, cli.target_y);
    let sim = cli.engine.sim_config();
    let solver = cli.engine.solver_config();
    let physics = cli.engine.physics();

    let mut solutions = Vec::new();
    for name in &cli.profiles {
        let profile = catalog.get(name)?;
        solutions.push(solve(&profile, &target, &sim, &solver, &physics)?);
    }

    let app = FlightViz { target, solutions };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native("Arrow Flight", options, Box::new(|_| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

struct FlightViz {
    target: Target,
    solutions: Vec<Solution>,
}

fn sampled(traj: &[FlightState]) -> impl Iterator<Item = &FlightState> {
    let step = (traj.len() / 2000).max(1);
    traj.iter().step_by(step)
}

impl eframe::App for FlightViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!(
                "Target: {:.1} m out, {:+.1} m high",
                self.target.distance, self.target.height
            ));
            for s in &self.solutions {
                let ring = ring_hit(s.holdover)
                    .map_or_else(|| "off face".to_string(), |d| format!("D={d:.1} m ring"));
                ui.label(format!(
                    "{}  |  launch {:.3}°  |  holdover {:.2} m ({ring})  |  \
                     flight {:.3} s  |  impact {:.1} m/s",
                    s.profile_name,
                    s.launch_angle_deg(),
                    s.holdover,
                    s.flight.time(),
                    s.flight.speed(),
                ));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let ring_side = available.x / 3.0;

            // Holdover against the target face
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Holdover on target (m)");
                    let reach = self
                        .solutions
                        .iter()
                        .map(|s| s.holdover.abs() + 0.1)
                        .fold(0.4, f64::max);
                    Plot::new("rings")
                        .width(ring_side)
                        .height(ring_side.min(available.y / 2.0))
                        .data_aspect(1.0)
                        .include_x(-reach)
                        .include_x(reach)
                        .include_y(-reach)
                        .include_y(reach)
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            for d in RING_DIAMETERS {
                                let outline = ring_outline(d, 128);
                                plot_ui.line(Line::new(format!("D={d:.1} m"), outline));
                            }
                            for s in &self.solutions {
                                plot_ui.points(
                                    Points::new(s.profile_name.clone(), vec![[0.0, s.holdover]])
                                        .radius(4.0),
                                );
                            }
                        });
                });
            });

            ui.horizontal(|ui| {
                // Height vs distance
                ui.vertical(|ui| {
                    ui.label("Height (m)");
                    Plot::new("path")
                        .width(half_w)
                        .height(available.y / 2.0 - 24.0)
                        .x_axis_label("Distance (m)")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            for s in &self.solutions {
                                let Some(traj) = &s.flight.trajectory else { continue };
                                let points: PlotPoints =
                                    sampled(traj).map(|p| [p.x(), p.y()]).collect();
                                plot_ui.line(Line::new(s.profile_name.clone(), points));
                            }
                        });
                });

                // Speed vs distance
                ui.vertical(|ui| {
                    ui.label("Speed (m/s)");
                    Plot::new("speed")
                        .width(half_w)
                        .height(available.y / 2.0 - 24.0)
                        .x_axis_label("Distance (m)")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            for s in &self.solutions {
                                let Some(traj) = &s.flight.trajectory else { continue };
                                let points: PlotPoints =
                                    sampled(traj).map(|p| [p.x(), p.speed()]).collect();
                                plot_ui.line(Line::new(s.profile_name.clone(), points));
                            }
                        });
                });
            });
        });
    }
}
