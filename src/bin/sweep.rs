use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use arrow_flight::cli::{load_catalog, EngineArgs};
use arrow_flight::io::csv::write_results;
use arrow_flight::logging;
use arrow_flight::sweep::{aim_surface, run_sweep, write_aim_surface, AxisRange, SweepGrid};

#[derive(Parser)]
#[command(
    name = "arrow-flight-sweep",
    version,
    about = "Solve launch angles over a grid of target distances and heights",
    allow_negative_numbers = true
)]
struct Cli {
    /// Profile name from the config file
    #[arg(default_value = "default")]
    profile_name: String,

    /// Distance range: START STEP END [m], end inclusive
    #[arg(
        long,
        num_args = 3,
        value_names = ["START", "STEP", "END"],
        default_values_t = [10.0, 2.0, 100.0]
    )]
    x_values: Vec<f64>,

    /// Height range: START STEP END [m], end inclusive
    #[arg(
        long,
        num_args = 3,
        value_names = ["START", "STEP", "END"],
        default_values_t = [-10.0, 1.0, 10.0]
    )]
    y_values: Vec<f64>,

    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Output CSV (default: <profile>_results.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a per-cell aim correction table to this CSV
    #[arg(long)]
    aim_out: Option<PathBuf>,

    /// Worker threads (default: one per core)
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    engine: EngineArgs,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn axis(values: &[f64]) -> AxisRange {
    AxisRange::new(values[0], values[1], values[2])
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let catalog = load_catalog(cli.config_file.as_deref())?;
    let profile = catalog.get(&cli.profile_name)?;
    let grid = SweepGrid {
        distances: axis(&cli.x_values),
        heights: axis(&cli.y_values),
    };

    let sim = cli.engine.sim_config();
    let solver = cli.engine.solver_config();
    let physics = cli.engine.physics();

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(n) = cli.threads {
        pool = pool.num_threads(n);
    }
    let pool = pool.build().context("building worker pool")?;
    let report = pool.install(|| run_sweep(&profile, &grid, &sim, &solver, &physics))?;

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}_results.csv", profile.name())));
    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    write_results(BufWriter::new(file), &report.records)
        .with_context(|| format!("writing {}", output.display()))?;

    if let Some(path) = &cli.aim_out {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_aim_surface(BufWriter::new(file), &aim_surface(&report.records))
            .with_context(|| format!("writing {}", path.display()))?;
    }

    eprintln!(
        "{}: {} of {} targets solved, {} failed -> {}",
        profile.name(),
        report.records.len(),
        report.cells(),
        report.failures.len(),
        output.display()
    );
    Ok(())
}
