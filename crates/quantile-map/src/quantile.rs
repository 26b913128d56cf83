//! Per-cell empirical quantile functions and temporal means.

use ndarray::{Array2, Array3, ArrayView3, Axis, Zip};

/// Empirical quantile of pre-sorted data at probability `p`, using linear
/// interpolation between order statistics (R type-7, NumPy "linear").
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub(crate) fn empirical_quantile(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "empirical_quantile: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Computes the per-cell empirical quantile function of a sample stack.
///
/// `stack` has shape (T, R, C); the result has shape (Q+1, R, C), where
/// `levels` holds the Q+1 probability levels. Non-finite samples are
/// excluded per cell. A cell with no valid samples yields NaN at every
/// level.
pub(crate) fn quantile_surface(stack: ArrayView3<'_, f64>, levels: &[f64]) -> Array3<f64> {
    let (_, rows, cols) = stack.dim();
    let mut surface = Array3::from_elem((levels.len(), rows, cols), f64::NAN);

    Zip::from(surface.lanes_mut(Axis(0)))
        .and(stack.lanes(Axis(0)))
        .for_each(|mut out, samples| {
            let mut valid: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
            if valid.is_empty() {
                return;
            }
            valid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            for (slot, &p) in out.iter_mut().zip(levels.iter()) {
                *slot = empirical_quantile(&valid, p);
            }
        });

    surface
}

/// Computes the per-cell temporal mean of a sample stack, ignoring
/// non-finite samples.
///
/// `stack` has shape (T, R, C); the result has shape (R, C). A cell with
/// no valid samples yields NaN.
pub fn temporal_mean(stack: ArrayView3<'_, f64>) -> Array2<f64> {
    let (_, rows, cols) = stack.dim();
    let mut mean = Array2::from_elem((rows, cols), f64::NAN);

    Zip::from(&mut mean)
        .and(stack.lanes(Axis(0)))
        .for_each(|slot, samples| {
            let mut sum = 0.0;
            let mut count = 0usize;
            for &v in samples.iter() {
                if v.is_finite() {
                    sum += v;
                    count += 1;
                }
            }
            if count > 0 {
                *slot = sum / count as f64;
            }
        });

    mean
}
