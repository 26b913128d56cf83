//! Per-cell, per-quantile-bin additive bias field.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis, Zip};

use crate::config::QmConfig;

/// Builds the additive correction field from paired quantile surfaces and
/// per-cell temporal means.
///
/// With `d_quantile = qobs - qsyn` and `d_mean = obs_mean - syn_mean`
/// (broadcast across bins), the bias at each bin and cell is
/// `g * d_mean + f * (d_quantile - d_mean)` where `g` and `f` are the
/// configured correction-strength weights. NaN inputs propagate into the
/// corresponding bias entries.
pub(crate) fn bias_surface(
    qobs: ArrayView3<'_, f64>,
    qsyn: ArrayView3<'_, f64>,
    obs_mean: ArrayView2<'_, f64>,
    syn_mean: ArrayView2<'_, f64>,
    config: &QmConfig,
) -> Array3<f64> {
    let g = config.mean_weight();
    let f = config.residual_weight();

    let d_mean: Array2<f64> = &obs_mean - &syn_mean;

    // Start from the quantile difference, then fold in the mean split
    // layer by layer.
    let mut bias: Array3<f64> = &qobs - &qsyn;
    for mut layer in bias.axis_iter_mut(Axis(0)) {
        Zip::from(&mut layer).and(&d_mean).for_each(|b, &dm| {
            let residual = *b - dm;
            *b = g * dm + f * residual;
        });
    }

    bias
}
