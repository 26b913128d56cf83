//! Raw forecast synthesis from spatial modes and temporal coefficients.

use fier_io::SpatialModes;
use ndarray::{Array3, ArrayView2, Axis};

use crate::error::ForecastError;

/// Assembles a raw synthetic forecast field as a weighted sum over
/// spatial modes plus a per-cell mean field.
///
/// `tpcs` holds one coefficient vector per mode, all of the same length
/// T'. The result has shape (T', R, C):
/// `field[t] = mean_field + sum_m tpcs[m][t] * mode_map(m)`.
///
/// # Errors
///
/// Returns [`ForecastError`] if the coefficient vectors disagree in
/// count or length, are empty, or the mean field does not match the
/// mode grid.
pub fn reconstruct(
    modes: &SpatialModes,
    tpcs: &[Vec<f64>],
    mean_field: ArrayView2<'_, f64>,
) -> Result<Array3<f64>, ForecastError> {
    if tpcs.len() != modes.n_modes() {
        return Err(ForecastError::ModeCountMismatch {
            modes: modes.n_modes(),
            series: tpcs.len(),
        });
    }

    let n_steps = tpcs[0].len();
    if n_steps == 0 {
        return Err(ForecastError::EmptyPrediction);
    }
    for tpc in tpcs {
        if tpc.len() != n_steps {
            return Err(ForecastError::TpcLengthMismatch {
                expected: n_steps,
                got: tpc.len(),
            });
        }
    }

    let (rows, cols) = modes.grid_shape();
    if mean_field.dim() != (rows, cols) {
        return Err(ForecastError::GridMismatch {
            expected_rows: mean_field.dim().0,
            expected_cols: mean_field.dim().1,
            got_rows: rows,
            got_cols: cols,
        });
    }

    let mut field = Array3::<f64>::zeros((n_steps, rows, cols));
    for (t, mut layer) in field.axis_iter_mut(Axis(0)).enumerate() {
        for (m, tpc) in tpcs.iter().enumerate() {
            layer.scaled_add(tpc[t], &modes.mode_map(m));
        }
        layer += &mean_field;
    }

    Ok(field)
}
