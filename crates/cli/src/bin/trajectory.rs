//! Integrate a charged particle through uniform fields with one or more schemes
//! and export the sampled trajectories.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use lorentz_tracker::config::{RunConfig, load_run_config};
use lorentz_tracker::export::summary::{Metadata, write_sidecar};
use lorentz_tracker::export::trajectory::TrajectoryWriter;
use lorentz_tracker::export::writer_for_path;
use lorentz_tracker::scenario::Scenario;
use lorentz_tracker::steppers::{Stepper, StepperKind};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Charged-particle trajectory integrator (RK4, Boris, Yoshida)"
)]
struct Cli {
    /// Run manifest (YAML or TOML). Defaults to an electron at 0.9 c in a 1 T field.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Integration scheme (rk4, boris, yoshida or an alias); repeat to compare
    /// several (overrides the manifest)
    #[arg(long = "scheme")]
    schemes: Vec<StepperKind>,

    /// Number of steps (overrides the manifest)
    #[arg(long)]
    steps: Option<usize>,

    /// Step size in seconds (overrides the manifest)
    #[arg(long)]
    step: Option<f64>,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/trajectory.csv")]
    output: PathBuf,

    /// Optional JSON summary sidecar
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_run_config(path)?,
        None => RunConfig::electron_demo(),
    };
    if !cli.schemes.is_empty() {
        config.schemes = cli.schemes.clone();
    }
    if let Some(steps) = cli.steps {
        config.time.steps = steps;
    }
    if let Some(step) = cli.step {
        config.time.step_s = step;
    }

    let scenario = Scenario::from_config(&config)?;
    let runs = scenario.run()?;

    let times = scenario.grid.times();
    let mut writer = TrajectoryWriter::new(writer_for_path(&cli.output)?)?;
    for run in &runs {
        writer.write_run(run.scheme.name(), &times, &run.states, scenario.particle.mass())?;
    }
    writer.finish()?;
    info!("wrote {} trajectories to {}", runs.len(), cli.output.display());

    if let Some(path) = &cli.summary {
        let metadata = Metadata {
            mass_kg: scenario.particle.mass(),
            charge_c: scenario.particle.charge(),
            t0_s: scenario.grid.t0,
            step_s: scenario.grid.dt,
            steps: scenario.grid.steps,
        };
        let summaries: Vec<_> = runs.iter().map(|run| &run.summary).collect();
        write_sidecar(path, &metadata, &summaries)?;
        info!("wrote summary to {}", path.display());
    }

    Ok(())
}
