//! Sample a raised-cosine probe pulse and write it to an `.npz` file.
//!
//! ```bash
//! # one period of a 10 rad/μs pulse with τ = 1 μs
//! envelope --op-max 10 --tau 1 --points 1000
//!
//! # from a config file, with the pulse duration overridden
//! envelope --config pulse.toml --tau 0.8 --output output/probe.npz
//! ```

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{ fmt, prelude::*, EnvFilter };
use eit_pulse::{
    write_npz,
    config::{ PulseConfig, DEFAULT_POINTS },
};

const DEFAULT_OP_MAX: f64 = 10.0;
const DEFAULT_TAU: f64 = 1.0;

/// Sample a raised-cosine probe pulse envelope.
#[derive(Debug, Parser)]
#[command(name = "envelope")]
#[command(about = "Sample a raised-cosine probe pulse envelope")]
struct Cli {
    /// Path to a TOML pulse config; flags given alongside it override its
    /// values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Peak Rabi frequency [default: 10]
    #[arg(long, allow_negative_numbers = true)]
    op_max: Option<f64>,

    /// Pulse duration; a negative duration is sampled over [0, |tau|]
    /// [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    tau: Option<f64>,

    /// Number of time points in the sampling grid [default: 1000]
    #[arg(long)]
    points: Option<usize>,

    /// Output file
    #[arg(short, long, default_value = "output/envelope.npz")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// Resolve the pulse config from the command line: start from the config
/// file if one is given, then apply any explicit flags on top.
fn pulse_config(cli: &Cli) -> anyhow::Result<PulseConfig> {
    let Some(path) = &cli.config else {
        return PulseConfig::new(
            cli.op_max.unwrap_or(DEFAULT_OP_MAX),
            cli.tau.unwrap_or(DEFAULT_TAU),
            cli.points.unwrap_or(DEFAULT_POINTS),
        )
        .context("invalid pulse parameters");
    };
    let mut config = PulseConfig::from_toml_file(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    if let Some(op_max) = cli.op_max { config.pulse.op_max = op_max; }
    if let Some(tau) = cli.tau { config.pulse.tau = tau; }
    if let Some(points) = cli.points { config.sampling.points = points; }
    config.validate().context("invalid pulse parameters")?;
    Ok(config)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = pulse_config(cli)?;
    let pulse = config.pulse()?;
    let time = config.time_grid();
    let omega_p = pulse.gen(&time);
    let peak = omega_p.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    info!(
        op_max = pulse.op_max(),
        tau = pulse.tau(),
        area = pulse.area(),
        points = time.len(),
        peak,
        "sampled probe envelope"
    );

    write_npz!(
        &cli.output,
        arrays: {
            "time" => &time,
            "envelope" => &omega_p,
        }
    )
    .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(output = %cli.output.display(), "done");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    run(&cli)
}
