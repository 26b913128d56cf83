//! The `correct` subcommand: stack-to-stack quantile-mapping correction.

use anyhow::{Context, Result};
use fier_io::{read_water_fraction, write_water_fraction};
use fier_quantile_map::{QmConfig, correct_forecast};
use tracing::info;

use crate::cli::CorrectArgs;

pub fn run(args: CorrectArgs) -> Result<()> {
    let observed = read_water_fraction(&args.observed)
        .with_context(|| format!("reading observed stack {}", args.observed.display()))?;
    let synthetic = read_water_fraction(&args.synthetic)
        .with_context(|| format!("reading synthetic stack {}", args.synthetic.display()))?;
    let forecast = read_water_fraction(&args.forecast)
        .with_context(|| format!("reading forecast stack {}", args.forecast.display()))?;

    let config = QmConfig::new()
        .with_n_bins(args.n_bins)
        .with_mean_weight(args.mean_weight)
        .with_residual_weight(args.residual_weight);

    let result = correct_forecast(
        observed.view(),
        synthetic.view(),
        forecast.view(),
        &config,
    )?;
    info!(
        n_valid_cells = result.n_valid_cells(),
        n_gated_cells = result.n_gated_cells(),
        "correction complete"
    );

    let corrected = forecast.with_data(result.into_corrected(), forecast.dates().to_vec())?;
    write_water_fraction(&args.output, &corrected)
        .with_context(|| format!("writing corrected stack {}", args.output.display()))?;

    let bounds = corrected.bounds();
    println!("{}", serde_json::to_string_pretty(&bounds)?);

    Ok(())
}
