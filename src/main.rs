use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use arrow_flight::cli::{load_catalog, EngineArgs};
use arrow_flight::io::csv::write_trajectory_file;
use arrow_flight::io::json::{write_summaries_file, FlightSummary};
use arrow_flight::io::{write_table, ResultRecord};
use arrow_flight::logging;
use arrow_flight::sim::{solve, Solution, Target};

#[derive(Parser)]
#[command(
    name = "arrow-flight",
    version,
    about = "Compute the launch angle and holdover that put an arrow on target",
    allow_negative_numbers = true
)]
struct Cli {
    /// Target horizontal distance [m]
    #[arg(required_unless_present = "list_profiles")]
    target_x: Option<f64>,

    /// Target height relative to the bow [m]
    #[arg(required_unless_present = "list_profiles")]
    target_y: Option<f64>,

    /// One or more named profiles from the config file
    #[arg(default_value = "default")]
    profiles: Vec<String>,

    /// List available profiles and exit
    #[arg(long)]
    list_profiles: bool,

    /// JSON file with named profiles (default: ./arrows.json, else built-ins)
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Do not print the header row
    #[arg(long)]
    no_header: bool,

    /// Write <profile>_trajectory.csv for each solved profile into this directory
    #[arg(long)]
    trajectory_dir: Option<PathBuf>,

    /// Write a JSON flight summary for all solved profiles
    #[arg(long)]
    summary_json: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let catalog = load_catalog(cli.config_file.as_deref())?;

    if cli.list_profiles {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for name in catalog.names() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    let (Some(distance), Some(height)) = (cli.target_x, cli.target_y) else {
        bail!("target_x and target_y are required unless --list-profiles is used");
    };
    let target = Target::new(distance, height);

    let profiles = cli
        .profiles
        .iter()
        .map(|name| catalog.get(name))
        .collect::<Result<Vec<_>, _>>()?;

    let sim = cli.engine.sim_config();
    let solver = cli.engine.solver_config();
    let physics = cli.engine.physics();

    let mut solutions: Vec<Solution> = Vec::with_capacity(profiles.len());
    let mut failures = Vec::new();
    for profile in &profiles {
        match solve(profile, &target, &sim, &solver, &physics) {
            Ok(solution) => solutions.push(solution),
            Err(err) => failures.push(format!("{}: {err}", profile.name())),
        }
    }

    let records: Vec<ResultRecord> = solutions.iter().map(ResultRecord::from_solution).collect();
    if !records.is_empty() {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_table(&mut out, &records, !cli.no_header)?;
        out.flush()?;
    }

    if let Some(dir) = &cli.trajectory_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        for s in &solutions {
            if let Some(traj) = &s.flight.trajectory {
                let path = dir.join(format!("{}_trajectory.csv", s.profile_name));
                write_trajectory_file(&path, traj)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
        }
    }

    if let Some(path) = &cli.summary_json {
        let summaries: Vec<FlightSummary> =
            solutions.iter().map(FlightSummary::from_solution).collect();
        write_summaries_file(path, &summaries)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if !failures.is_empty() {
        bail!("{}", failures.join("; "));
    }
    Ok(())
}
