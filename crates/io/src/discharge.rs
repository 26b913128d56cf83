//! Forecast discharge (hydrological driving data) reader.

use std::path::Path;

use chrono::NaiveDate;
use ndarray::{Array2, ArrayView1, Axis};
use tracing::debug;

use crate::error::IoError;
use crate::netcdf_read::{fill_value, open_file, read_time_axis};

const DISCHARGE_ALIASES: &[&str] = &["discharge", "q", "streamflow"];

/// Per-mode hydrological driving series: one discharge time series for
/// each spatial mode, on a shared date axis.
#[derive(Debug, Clone)]
pub struct DischargeSeries {
    /// Discharge values, shape (mode, time).
    values: Array2<f64>,
    /// Calendar date of each time step.
    dates: Vec<NaiveDate>,
}

impl DischargeSeries {
    /// Creates a new `DischargeSeries` after validating the date axis.
    pub fn new(values: Array2<f64>, dates: Vec<NaiveDate>) -> Result<Self, IoError> {
        let (_, nt) = values.dim();
        if nt != dates.len() {
            return Err(IoError::DimensionMismatch {
                name: "time".to_string(),
                expected: nt,
                got: dates.len(),
            });
        }
        Ok(Self { values, dates })
    }

    /// Returns the number of modes.
    pub fn n_modes(&self) -> usize {
        self.values.dim().0
    }

    /// Returns the number of time steps.
    pub fn n_times(&self) -> usize {
        self.values.dim().1
    }

    /// Returns the date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the full series of mode `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn series(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.index_axis(Axis(0), index)
    }

    /// Returns the values of mode `index` at every time step whose date
    /// equals `date`. Empty when the date is not on the axis.
    pub fn on_date(&self, index: usize, date: NaiveDate) -> Vec<f64> {
        self.series(index)
            .iter()
            .zip(self.dates.iter())
            .filter(|&(_, &d)| d == date)
            .map(|(&v, _)| v)
            .collect()
    }
}

/// Reads a per-mode discharge dataset from a NetCDF file.
///
/// Expects a 2-D variable of shape (mode, time) with a CF time axis.
/// `_FillValue` samples are replaced by NaN.
pub fn read_discharge(path: &Path) -> Result<DischargeSeries, IoError> {
    let file = open_file(path)?;

    let var = DISCHARGE_ALIASES
        .iter()
        .find_map(|&alias| file.variable(alias))
        .ok_or_else(|| IoError::MissingVariable {
            name: DISCHARGE_ALIASES[0].to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 2 {
        return Err(IoError::DimensionMismatch {
            name: format!("{} dimensions", var.name()),
            expected: 2,
            got: dims.len(),
        });
    }
    let (n_modes, nt) = (dims[0].len(), dims[1].len());

    let mut data = var.get_values::<f64, _>(..)?;
    if let Some(fv) = fill_value(&var) {
        for v in &mut data {
            if *v == fv {
                *v = f64::NAN;
            }
        }
    }

    let dates = read_time_axis(&file, "time", path)?;

    let values =
        Array2::from_shape_vec((n_modes, nt), data).map_err(|e| IoError::Validation {
            reason: format!("cannot shape discharge as {n_modes} x {nt}: {e}"),
        })?;

    let series = DischargeSeries::new(values, dates)?;
    debug!(
        path = %path.display(),
        n_modes = series.n_modes(),
        nt = series.n_times(),
        "read discharge series"
    );
    Ok(series)
}
