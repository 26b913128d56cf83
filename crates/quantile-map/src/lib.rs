//! Empirical quantile-mapping bias correction for gridded water-fraction
//! forecasts.
//!
//! This crate corrects a synthesized water-fraction forecast against
//! historical observations by aligning per-cell quantile distributions.
//!
//! # Pipeline
//!
//! 1. **Estimate** per-cell empirical quantile functions of the paired
//!    observed and synthetic historical stacks (Q+1 levels, 0..=1)
//! 2. **Build** the additive bias field `g * d_mean + f * d_residual`
//!    from quantile and temporal-mean differences
//! 3. **Correct** each forecast value by double interpolation: value to
//!    quantile-bin position against the synthetic quantile function, then
//!    bin position to correction against the bias field; clamp to range
//!
//! Cells lacking a valid reference sample at the first historical time
//! step are left NaN for every forecast step.
//!
//! # Glossary
//!
//! - **Sample stack**: (time, lat, lon) array of bounded fractional
//!   values, NaN where undefined
//! - **Quantile surface**: (Q+1, lat, lon) per-cell empirical quantile
//!   function
//! - **Bias field**: (Q+1, lat, lon) additive correction learned from the
//!   historical pair
//!
//! # Quick Start
//!
//! ```no_run
//! use fier_quantile_map::{QmConfig, correct_forecast};
//! use ndarray::Array3;
//!
//! let observed = Array3::<f64>::zeros((24, 50, 60));
//! let synthetic = Array3::<f64>::zeros((24, 50, 60));
//! let forecast = Array3::<f64>::zeros((1, 50, 60));
//!
//! let config = QmConfig::new();
//! let result = correct_forecast(
//!     observed.view(),
//!     synthetic.view(),
//!     forecast.view(),
//!     &config,
//! );
//! ```

mod bias;
mod config;
mod correct;
mod error;
pub(crate) mod interp;
pub(crate) mod quantile;
mod result;

pub use config::QmConfig;
pub use error::QuantileMapError;
pub use quantile::temporal_mean;
pub use result::QmResult;

use ndarray::{Array2, ArrayView3, Axis, Zip};

/// Validates the inputs to [`correct_forecast`].
fn validate_inputs<'a>(
    observed: ArrayView3<'a, f64>,
    synthetic: ArrayView3<'a, f64>,
    forecast: ArrayView3<'a, f64>,
) -> Result<(), QuantileMapError> {
    // 1. Every stack must be non-empty in all three dimensions.
    for (name, stack) in [
        ("observed", &observed),
        ("synthetic", &synthetic),
        ("forecast", &forecast),
    ] {
        let (nt, rows, cols) = stack.dim();
        if nt == 0 || rows == 0 || cols == 0 {
            return Err(QuantileMapError::EmptyStack {
                name,
                nt,
                rows,
                cols,
            });
        }
    }

    // 2. Spatial extents must match the observed stack exactly.
    let (_, rows, cols) = observed.dim();
    for (name, stack) in [("synthetic", &synthetic), ("forecast", &forecast)] {
        let (_, got_rows, got_cols) = stack.dim();
        if (got_rows, got_cols) != (rows, cols) {
            return Err(QuantileMapError::SpatialShapeMismatch {
                name,
                expected_rows: rows,
                expected_cols: cols,
                got_rows,
                got_cols,
            });
        }
    }

    Ok(())
}

/// Per-cell validity gate: both historical stacks must hold a finite
/// sample at the first time step.
fn validity_gate(
    observed: ArrayView3<'_, f64>,
    synthetic: ArrayView3<'_, f64>,
) -> Array2<bool> {
    Zip::from(observed.index_axis(Axis(0), 0))
        .and(synthetic.index_axis(Axis(0), 0))
        .map_collect(|&o, &s| o.is_finite() && s.is_finite())
}

/// Corrects a forecast stack against a paired observed/synthetic history
/// using quantile mapping.
///
/// # Arguments
///
/// * `observed` — Historical observed stack, shape (T, R, C).
/// * `synthetic` — Historical synthetic stack, same spatial extent.
/// * `forecast` — New synthetic forecast stack to correct, shape (T', R, C).
/// * `config` — Bin count, correction weights, and clamp range.
///
/// # Errors
///
/// Returns [`QuantileMapError`] if a stack is empty, the spatial extents
/// disagree, or the configuration is invalid. Missing data is never an
/// error: it propagates as NaN and gated cells stay NaN in the output.
pub fn correct_forecast(
    observed: ArrayView3<'_, f64>,
    synthetic: ArrayView3<'_, f64>,
    forecast: ArrayView3<'_, f64>,
    config: &QmConfig,
) -> Result<QmResult, QuantileMapError> {
    config.validate()?;
    validate_inputs(observed.view(), synthetic.view(), forecast.view())?;

    let levels = config.probability_levels();

    let observed_quantiles = quantile::quantile_surface(observed, &levels);
    let synthetic_quantiles = quantile::quantile_surface(synthetic, &levels);
    let obs_mean = quantile::temporal_mean(observed);
    let syn_mean = quantile::temporal_mean(synthetic);

    let bias = bias::bias_surface(
        observed_quantiles.view(),
        synthetic_quantiles.view(),
        obs_mean.view(),
        syn_mean.view(),
        config,
    );

    let valid = validity_gate(observed, synthetic);
    let n_valid_cells = valid.iter().filter(|&&v| v).count();
    let n_gated_cells = valid.len() - n_valid_cells;

    tracing::debug!(
        n_bins = config.n_bins(),
        n_valid_cells,
        n_gated_cells,
        "applying quantile-mapping correction"
    );

    let corrected = correct::apply_correction(
        forecast,
        synthetic_quantiles.view(),
        bias.view(),
        &levels,
        &valid,
        config,
    );

    Ok(QmResult::new(
        corrected,
        bias,
        observed_quantiles,
        synthetic_quantiles,
        levels,
        n_valid_cells,
        n_gated_cells,
    ))
}
