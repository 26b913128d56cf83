use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FIER water-fraction forecast correction.
#[derive(Parser)]
#[command(
    name = "fier",
    version,
    about = "Quantile-mapping bias correction for water-fraction forecasts"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Correct a forecast stack against a paired observed/synthetic history.
    Correct(CorrectArgs),
}

/// Arguments for the `correct` subcommand.
#[derive(clap::Args)]
pub struct CorrectArgs {
    /// Path to the historical observed water-fraction NetCDF stack.
    #[arg(long)]
    pub observed: PathBuf,

    /// Path to the historical synthetic water-fraction NetCDF stack.
    #[arg(long)]
    pub synthetic: PathBuf,

    /// Path to the forecast water-fraction NetCDF stack to correct.
    #[arg(long)]
    pub forecast: PathBuf,

    /// Path for the corrected output NetCDF stack.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number of quantile bins.
    #[arg(long = "n-bins", default_value_t = 100)]
    pub n_bins: usize,

    /// Weight of the mean-difference correction component.
    #[arg(long = "mean-weight", default_value_t = 1.0)]
    pub mean_weight: f64,

    /// Weight of the quantile-residual correction component.
    #[arg(long = "residual-weight", default_value_t = 1.0)]
    pub residual_weight: f64,
}
