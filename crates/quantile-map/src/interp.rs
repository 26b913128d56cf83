//! Piecewise-linear interpolation with endpoint clamping.

use ndarray::ArrayView1;

/// Linearly interpolate `x` against the node pairs `(xs, ys)`.
///
/// `xs` must be non-decreasing and the same length as `ys` (at least 1).
/// Values of `x` outside the range of `xs` are clamped to the nearest
/// endpoint's ordinate; there is no extrapolation. Inside a zero-width
/// (flat) segment the left node's ordinate is returned. A NaN `x` yields
/// NaN.
pub(crate) fn interp_clamped(x: f64, xs: ArrayView1<'_, f64>, ys: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(!xs.is_empty());

    if x.is_nan() {
        return f64::NAN;
    }

    let n = xs.len();
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }

    // Largest i with xs[i] <= x. Since x < xs[n-1], i + 1 is in bounds and
    // xs[i + 1] > x, so the segment has non-zero width.
    let mut lo = 0usize;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let x0 = xs[lo];
    let x1 = xs[lo + 1];
    if x1 == x0 {
        return ys[lo];
    }
    let t = (x - x0) / (x1 - x0);
    ys[lo] + t * (ys[lo + 1] - ys[lo])
}
