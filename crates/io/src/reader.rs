//! Water-fraction stack reader.

use std::path::Path;

use ndarray::Array3;
use tracing::debug;

use crate::error::IoError;
use crate::netcdf_read::{open_file, read_1d_f64, read_3d_f64, read_time_axis};
use crate::stack::SampleStack;

/// Variable name aliases tried in order when locating the water-fraction
/// variable.
const WATER_FRACTION_ALIASES: &[&str] = &["water_fraction", "wf"];
const LAT_ALIASES: &[&str] = &["lat", "latitude"];
const LON_ALIASES: &[&str] = &["lon", "longitude"];

/// Reads a water-fraction sample stack from a NetCDF file.
///
/// Expects a 3-D variable in (time, lat, lon) order with 1-D coordinate
/// axes and CF `"days since ..."` time units. `_FillValue` samples are
/// replaced by NaN.
///
/// # Errors
///
/// Returns [`IoError`] if the file is missing, a variable or coordinate
/// cannot be found, or the axes disagree with the data shape.
pub fn read_water_fraction(path: &Path) -> Result<SampleStack, IoError> {
    let file = open_file(path)?;

    let (data, [nt, ny, nx]) = read_3d_f64(&file, WATER_FRACTION_ALIASES, path)?;
    let lat = read_1d_f64(&file, LAT_ALIASES, path)?;
    let lon = read_1d_f64(&file, LON_ALIASES, path)?;
    let dates = read_time_axis(&file, "time", path)?;

    let array = Array3::from_shape_vec((nt, ny, nx), data).map_err(|e| IoError::Validation {
        reason: format!("cannot shape data as {nt} x {ny} x {nx}: {e}"),
    })?;

    let stack = SampleStack::new(array, dates, lat, lon)?;
    debug!(
        path = %path.display(),
        nt = stack.n_times(),
        rows = stack.n_rows(),
        cols = stack.n_cols(),
        "read water-fraction stack"
    );
    Ok(stack)
}
