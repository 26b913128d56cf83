//! Gridded water-fraction sample stacks and their geographic bounds.

use chrono::NaiveDate;
use ndarray::{Array3, ArrayView3};
use serde::Serialize;

use crate::error::IoError;

/// Geographic bounding box of a gridded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoBounds {
    /// Southernmost latitude.
    pub lat_min: f64,
    /// Northernmost latitude.
    pub lat_max: f64,
    /// Westernmost longitude.
    pub lon_min: f64,
    /// Easternmost longitude.
    pub lon_max: f64,
}

impl GeoBounds {
    /// Computes the bounding box of non-empty coordinate axes.
    ///
    /// Handles axes stored in either ascending or descending order.
    pub fn from_coords(lat: &[f64], lon: &[f64]) -> Self {
        debug_assert!(!lat.is_empty() && !lon.is_empty());
        let (lat_min, lat_max) = min_max(lat);
        let (lon_min, lon_max) = min_max(lon);
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Returns the box as `[[lat_min, lon_min], [lat_max, lon_max]]`.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.lat_min, self.lon_min], [self.lat_max, self.lon_max]]
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

/// A water-fraction sample stack: a (time, lat, lon) array of fractional
/// values in percent, NaN where undefined, together with its coordinate
/// axes.
#[derive(Debug, Clone)]
pub struct SampleStack {
    /// Sample values, shape (T, R, C).
    data: Array3<f64>,
    /// Calendar date of each time step.
    dates: Vec<NaiveDate>,
    /// Latitude of each row.
    lat: Vec<f64>,
    /// Longitude of each column.
    lon: Vec<f64>,
}

impl SampleStack {
    /// Creates a new `SampleStack` after validating that the coordinate
    /// axes match the array shape and are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if an axis length disagrees
    /// with the array, or [`IoError::Validation`] if any dimension is zero.
    pub fn new(
        data: Array3<f64>,
        dates: Vec<NaiveDate>,
        lat: Vec<f64>,
        lon: Vec<f64>,
    ) -> Result<Self, IoError> {
        let (nt, rows, cols) = data.dim();

        if nt == 0 || rows == 0 || cols == 0 {
            return Err(IoError::Validation {
                reason: format!("stack has an empty dimension: {nt} x {rows} x {cols}"),
            });
        }

        for (name, expected, got) in [
            ("time", nt, dates.len()),
            ("lat", rows, lat.len()),
            ("lon", cols, lon.len()),
        ] {
            if expected != got {
                return Err(IoError::DimensionMismatch {
                    name: name.to_string(),
                    expected,
                    got,
                });
            }
        }

        Ok(Self {
            data,
            dates,
            lat,
            lon,
        })
    }

    /// Returns the sample array.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Returns a view of the sample array.
    pub fn view(&self) -> ArrayView3<'_, f64> {
        self.data.view()
    }

    /// Returns the date of each time step.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the latitude axis.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Returns the longitude axis.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Returns the number of time steps.
    pub fn n_times(&self) -> usize {
        self.data.dim().0
    }

    /// Returns the number of latitude rows.
    pub fn n_rows(&self) -> usize {
        self.data.dim().1
    }

    /// Returns the number of longitude columns.
    pub fn n_cols(&self) -> usize {
        self.data.dim().2
    }

    /// Returns the geographic bounding box of the stack.
    pub fn bounds(&self) -> GeoBounds {
        GeoBounds::from_coords(&self.lat, &self.lon)
    }

    /// Builds a new stack on the same spatial grid with different sample
    /// data and time axis.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the new array's spatial
    /// extent differs from this stack's.
    pub fn with_data(&self, data: Array3<f64>, dates: Vec<NaiveDate>) -> Result<Self, IoError> {
        let (_, rows, cols) = data.dim();
        if rows != self.n_rows() {
            return Err(IoError::DimensionMismatch {
                name: "lat".to_string(),
                expected: self.n_rows(),
                got: rows,
            });
        }
        if cols != self.n_cols() {
            return Err(IoError::DimensionMismatch {
                name: "lon".to_string(),
                expected: self.n_cols(),
                got: cols,
            });
        }
        Self::new(data, dates, self.lat.clone(), self.lon.clone())
    }
}
