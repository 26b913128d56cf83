//! Dual-interpolation correction of a forecast stack.

use ndarray::{Array2, Array3, ArrayView1, ArrayView3, Axis, Zip};

use crate::config::QmConfig;
use crate::interp::interp_clamped;

/// Applies the bias field to a forecast stack, cell by cell.
///
/// For each forecast value at a cell passing the validity gate, the value
/// is first located on the probability axis by interpolating against that
/// cell's synthetic quantile function, then the correction is read off the
/// bias field at that probability. The corrected value is clamped to the
/// configured range. Cells failing the gate stay NaN at every time step,
/// as do non-finite forecast values.
///
/// There is no cross-cell dependency, so the cell loop runs in parallel.
pub(crate) fn apply_correction(
    forecast: ArrayView3<'_, f64>,
    qsyn: ArrayView3<'_, f64>,
    bias: ArrayView3<'_, f64>,
    levels: &[f64],
    valid: &Array2<bool>,
    config: &QmConfig,
) -> Array3<f64> {
    let mut corrected = Array3::from_elem(forecast.raw_dim(), f64::NAN);
    let levels = ArrayView1::from(levels);
    let lo = config.value_min();
    let hi = config.value_max();

    Zip::from(corrected.lanes_mut(Axis(0)))
        .and(forecast.lanes(Axis(0)))
        .and(qsyn.lanes(Axis(0)))
        .and(bias.lanes(Axis(0)))
        .and(valid)
        .par_for_each(|mut out, samples, cell_qsyn, cell_bias, &gate_open| {
            if !gate_open {
                return;
            }
            for (slot, &v) in out.iter_mut().zip(samples.iter()) {
                if !v.is_finite() {
                    continue;
                }
                let p = interp_clamped(v, cell_qsyn, levels);
                let correction = interp_clamped(p, levels, cell_bias);
                *slot = (v + correction).clamp(lo, hi);
            }
        });

    corrected
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, Array3};

    fn levels(q: usize) -> Vec<f64> {
        (0..=q).map(|i| i as f64 / q as f64).collect()
    }

    fn all_valid(rows: usize, cols: usize) -> Array2<bool> {
        Array2::from_elem((rows, cols), true)
    }

    #[test]
    fn zero_bias_is_identity_within_range() {
        let lv = levels(4);
        let qsyn = Array3::from_shape_fn((5, 1, 1), |(k, ..)| 10.0 * k as f64);
        let bias = Array3::zeros((5, 1, 1));
        let forecast = Array3::from_shape_vec((3, 1, 1), vec![5.0, 25.0, 38.0]).unwrap();

        let out = apply_correction(
            forecast.view(),
            qsyn.view(),
            bias.view(),
            &lv,
            &all_valid(1, 1),
            &QmConfig::new(),
        );
        assert_relative_eq!(out[[0, 0, 0]], 5.0);
        assert_relative_eq!(out[[1, 0, 0]], 25.0);
        assert_relative_eq!(out[[2, 0, 0]], 38.0);
    }

    #[test]
    fn constant_bias_shifts() {
        let lv = levels(2);
        let qsyn = Array3::from_shape_vec((3, 1, 1), vec![0.0, 50.0, 100.0]).unwrap();
        let bias = Array3::from_elem((3, 1, 1), 7.0);
        let forecast = Array3::from_shape_vec((2, 1, 1), vec![10.0, 60.0]).unwrap();

        let out = apply_correction(
            forecast.view(),
            qsyn.view(),
            bias.view(),
            &lv,
            &all_valid(1, 1),
            &QmConfig::new(),
        );
        assert_relative_eq!(out[[0, 0, 0]], 17.0);
        assert_relative_eq!(out[[1, 0, 0]], 67.0);
    }

    #[test]
    fn bin_dependent_bias() {
        // Bias grows with probability: 0 at p=0, 10 at p=1. A forecast value
        // at the middle of the synthetic distribution lands at p=0.5.
        let lv = levels(2);
        let qsyn = Array3::from_shape_vec((3, 1, 1), vec![0.0, 50.0, 100.0]).unwrap();
        let bias = Array3::from_shape_vec((3, 1, 1), vec![0.0, 5.0, 10.0]).unwrap();
        let forecast = Array3::from_shape_vec((1, 1, 1), vec![50.0]).unwrap();

        let out = apply_correction(
            forecast.view(),
            qsyn.view(),
            bias.view(),
            &lv,
            &all_valid(1, 1),
            &QmConfig::new(),
        );
        assert_relative_eq!(out[[0, 0, 0]], 55.0);
    }

    #[test]
    fn edge_clamp_no_extrapolation() {
        // Forecast beyond the synthetic range gets the endpoint correction.
        let lv = levels(2);
        let qsyn = Array3::from_shape_vec((3, 1, 1), vec![10.0, 20.0, 30.0]).unwrap();
        let bias = Array3::from_shape_vec((3, 1, 1), vec![-3.0, 0.0, 3.0]).unwrap();

        let forecast = Array3::from_shape_vec((2, 1, 1), vec![90.0, 1.0]).unwrap();
        let out = apply_correction(
            forecast.view(),
            qsyn.view(),
            bias.view(),
            &lv,
            &all_valid(1, 1),
            &QmConfig::new(),
        );
        // Above the max: correction at probability 1.
        assert_relative_eq!(out[[0, 0, 0]], 93.0);
        // Below the min: correction at probability 0, then clamped to range.
        assert_relative_eq!(out[[1, 0, 0]], 0.0);
    }

    #[test]
    fn clamps_to_value_range() {
        let lv = levels(1);
        let qsyn = Array3::from_shape_vec((2, 1, 1), vec![0.0, 100.0]).unwrap();
        let bias = Array3::zeros((2, 1, 1));
        let forecast = Array3::from_shape_vec((2, 1, 1), vec![105.0, -5.0]).unwrap();

        let out = apply_correction(
            forecast.view(),
            qsyn.view(),
            bias.view(),
            &lv,
            &all_valid(1, 1),
            &QmConfig::new(),
        );
        assert_relative_eq!(out[[0, 0, 0]], 100.0);
        assert_relative_eq!(out[[1, 0, 0]], 0.0);
    }

    #[test]
    fn gated_cell_stays_nan() {
        let lv = levels(1);
        let qsyn = Array3::from_elem((2, 1, 2), 50.0);
        let bias = Array3::zeros((2, 1, 2));
        let forecast = Array3::from_elem((3, 1, 2), 40.0);

        let mut valid = all_valid(1, 2);
        valid[[0, 1]] = false;

        let out = apply_correction(
            forecast.view(),
            qsyn.view(),
            bias.view(),
            &lv,
            &valid,
            &QmConfig::new(),
        );
        for t in 0..3 {
            assert_relative_eq!(out[[t, 0, 0]], 40.0);
            assert!(out[[t, 0, 1]].is_nan(), "gated cell must be NaN at t={t}");
        }
    }

    #[test]
    fn nan_forecast_value_stays_nan() {
        let lv = levels(1);
        let qsyn = Array3::from_shape_vec((2, 1, 1), vec![0.0, 100.0]).unwrap();
        let bias = Array3::zeros((2, 1, 1));
        let forecast =
            Array3::from_shape_vec((3, 1, 1), vec![30.0, f64::NAN, 60.0]).unwrap();

        let out = apply_correction(
            forecast.view(),
            qsyn.view(),
            bias.view(),
            &lv,
            &all_valid(1, 1),
            &QmConfig::new(),
        );
        assert_relative_eq!(out[[0, 0, 0]], 30.0);
        assert!(out[[1, 0, 0]].is_nan());
        assert_relative_eq!(out[[2, 0, 0]], 60.0);
    }
}
