use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use fuzzy_brake::{Config, Inputs, LinguisticTerm, Outputs, Pressure, Rules};
use tracing_subscriber::EnvFilter;

/// Recommends a brake pressure from the distance to an obstacle and the vehicle speed.
#[derive(Parser)]
#[command(name = "fuzzy-brake", version, about, long_about = None)]
struct Cli {
    /// Distance to the obstacle
    #[arg(value_name = "DISTANCE", allow_hyphen_values = true)]
    distance: String,

    /// Vehicle speed
    #[arg(value_name = "SPEED", allow_hyphen_values = true)]
    speed: String,

    /// TOML file overriding the range tables or inference operators
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the membership degrees and rule activations before the result
    #[arg(long)]
    explain: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    let vars = config.variables().context("validating configuration")?;
    let model = config.inference();

    let inputs = match Inputs::parse(&cli.distance, &cli.speed) {
        Ok(inputs) => inputs,
        Err(err) => {
            tracing::warn!(error = %err, "rejected input");
            println!("INVALID INPUT");
            return Ok(ExitCode::FAILURE);
        },
    };

    match model.eval(&vars, &Rules::default(), &inputs) {
        Ok(outputs) => {
            if cli.explain {
                explain(&outputs);
            }
            println!("{}", outputs.pressure());
            Ok(ExitCode::SUCCESS)
        },
        Err(err) => {
            tracing::error!(error = %err, "evaluation failed");
            println!("CALCULATION FAILED");
            Ok(ExitCode::FAILURE)
        },
    }
}

fn explain(outputs: &Outputs) {
    for (term, degree) in outputs.distance().iter() {
        println!("distance {term:<12} {degree:.3}");
    }
    for (term, degree) in outputs.speed().iter() {
        println!("speed    {term:<12} {degree:.3}");
    }
    for term in Pressure::ALL {
        println!("brake    {term:<12} {:.3}", outputs.activations().get(term));
    }
}
