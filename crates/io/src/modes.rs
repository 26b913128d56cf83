//! Reduced-spatial-mode (RSM) dataset reader.

use std::path::Path;

use ndarray::{Array3, ArrayView2, Axis};
use tracing::debug;

use crate::error::IoError;
use crate::netcdf_read::{open_file, read_1d_f64, read_3d_f64};

const MODES_ALIASES: &[&str] = &["spatial_modes"];
const MODE_ID_ALIASES: &[&str] = &["mode"];
const HYDRO_SITE_ALIASES: &[&str] = &["hydro_site"];
const LAT_ALIASES: &[&str] = &["lat", "latitude"];
const LON_ALIASES: &[&str] = &["lon", "longitude"];

/// A reduced spatial decomposition of historical water-fraction fields:
/// fixed 2-D weight maps, one per mode, each associated with the gauging
/// site whose hydrology drives its temporal coefficient.
#[derive(Debug, Clone)]
pub struct SpatialModes {
    /// Mode weight maps, shape (mode, lat, lon).
    modes: Array3<f64>,
    /// Identifier of each mode.
    mode_ids: Vec<i64>,
    /// Driving-site identifier of each mode.
    hydro_sites: Vec<i64>,
    /// Latitude of each row.
    lat: Vec<f64>,
    /// Longitude of each column.
    lon: Vec<f64>,
}

impl SpatialModes {
    /// Creates a new `SpatialModes` after validating axis lengths.
    pub fn new(
        modes: Array3<f64>,
        mode_ids: Vec<i64>,
        hydro_sites: Vec<i64>,
        lat: Vec<f64>,
        lon: Vec<f64>,
    ) -> Result<Self, IoError> {
        let (n_modes, rows, cols) = modes.dim();

        for (name, expected, got) in [
            ("mode", n_modes, mode_ids.len()),
            ("hydro_site", n_modes, hydro_sites.len()),
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

        if n_modes == 0 {
            return Err(IoError::Validation {
                reason: "spatial-mode dataset has no modes".to_string(),
            });
        }

        Ok(Self {
            modes,
            mode_ids,
            hydro_sites,
            lat,
            lon,
        })
    }

    /// Returns the number of modes.
    pub fn n_modes(&self) -> usize {
        self.modes.dim().0
    }

    /// Returns the spatial weight map of mode `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn mode_map(&self, index: usize) -> ArrayView2<'_, f64> {
        self.modes.index_axis(Axis(0), index)
    }

    /// Returns the identifier of mode `index`.
    pub fn mode_id(&self, index: usize) -> i64 {
        self.mode_ids[index]
    }

    /// Returns the driving-site identifier of mode `index`.
    pub fn hydro_site(&self, index: usize) -> i64 {
        self.hydro_sites[index]
    }

    /// Returns the latitude axis.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Returns the longitude axis.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Returns the spatial extent (rows, cols).
    pub fn grid_shape(&self) -> (usize, usize) {
        let (_, rows, cols) = self.modes.dim();
        (rows, cols)
    }
}

/// Reads a reduced-spatial-mode dataset from a NetCDF file.
///
/// Expects a `spatial_modes` variable of shape (mode, lat, lon) with
/// `mode` and `hydro_site` identifier axes.
pub fn read_spatial_modes(path: &Path) -> Result<SpatialModes, IoError> {
    let file = open_file(path)?;

    let (data, [n_modes, ny, nx]) = read_3d_f64(&file, MODES_ALIASES, path)?;
    let mode_ids: Vec<i64> = read_1d_f64(&file, MODE_ID_ALIASES, path)?
        .into_iter()
        .map(|v| v as i64)
        .collect();
    let hydro_sites: Vec<i64> = read_1d_f64(&file, HYDRO_SITE_ALIASES, path)?
        .into_iter()
        .map(|v| v as i64)
        .collect();
    let lat = read_1d_f64(&file, LAT_ALIASES, path)?;
    let lon = read_1d_f64(&file, LON_ALIASES, path)?;

    let array =
        Array3::from_shape_vec((n_modes, ny, nx), data).map_err(|e| IoError::Validation {
            reason: format!("cannot shape modes as {n_modes} x {ny} x {nx}: {e}"),
        })?;

    let modes = SpatialModes::new(array, mode_ids, hydro_sites, lat, lon)?;
    debug!(
        path = %path.display(),
        n_modes = modes.n_modes(),
        "read spatial-mode dataset"
    );
    Ok(modes)
}
