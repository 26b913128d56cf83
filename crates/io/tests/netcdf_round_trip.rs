//! Integration tests for NetCDF reading and writing.
//!
//! Fixtures are built programmatically with the netcdf crate, read back
//! through the public API, and checked for shape, coordinate, fill-value,
//! and time-axis handling.

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use chrono::NaiveDate;
use ndarray::Array3;
use tempfile::tempdir;

use fier_io::{
    IoError, SampleStack, read_discharge, read_spatial_modes, read_water_fraction,
    write_water_fraction,
};

// ---------------------------------------------------------------------------
// Helper: programmatic NetCDF fixture builder
// ---------------------------------------------------------------------------

/// Configuration for building a minimal water-fraction NetCDF fixture.
struct StackFixture {
    nt: usize,
    ny: usize,
    nx: usize,
    lats: Vec<f64>,
    lons: Vec<f64>,
    /// Flat water-fraction data in `[t, lat, lon]` order.
    values: Vec<f64>,
    fill_value: Option<f64>,
    var_name: &'static str,
}

impl StackFixture {
    fn new(nt: usize, ny: usize, nx: usize) -> Self {
        let n_cells = ny * nx;
        Self {
            nt,
            ny,
            nx,
            lats: (0..ny).map(|i| 10.0 + i as f64 * 0.5).collect(),
            lons: (0..nx).map(|i| 104.0 + i as f64 * 0.5).collect(),
            values: (0..nt * n_cells).map(|i| (i % 50) as f64).collect(),
            fill_value: None,
            var_name: "water_fraction",
        }
    }

    fn with_fill_value(mut self, fv: f64) -> Self {
        self.fill_value = Some(fv);
        self
    }

    fn with_value(mut self, t: usize, cell: usize, value: f64) -> Self {
        self.values[t * self.ny * self.nx + cell] = value;
        self
    }

    fn with_var_name(mut self, name: &'static str) -> Self {
        self.var_name = name;
        self
    }

    fn write(&self, dir: &Path) -> PathBuf {
        let path = dir.join("stack.nc");
        let mut file = netcdf::create(&path).expect("failed to create NetCDF file");

        file.add_dimension("time", self.nt).expect("add dim time");
        file.add_dimension("lat", self.ny).expect("add dim lat");
        file.add_dimension("lon", self.nx).expect("add dim lon");

        {
            let mut var = file
                .add_variable::<f64>("lat", &["lat"])
                .expect("add var lat");
            var.put_values(&self.lats, ..).expect("put lat values");
        }
        {
            let mut var = file
                .add_variable::<f64>("lon", &["lon"])
                .expect("add var lon");
            var.put_values(&self.lons, ..).expect("put lon values");
        }
        {
            let time_vals: Vec<f64> = (0..self.nt).map(|t| t as f64).collect();
            let mut var = file
                .add_variable::<f64>("time", &["time"])
                .expect("add var time");
            var.put_values(&time_vals, ..).expect("put time values");
            var.put_attribute("units", "days since 2020-01-01")
                .expect("add time units");
        }
        {
            let mut var = file
                .add_variable::<f64>(self.var_name, &["time", "lat", "lon"])
                .expect("add var water_fraction");
            if let Some(fv) = self.fill_value {
                var.put_attribute("_FillValue", fv).expect("add _FillValue");
            }
            var.put_values(&self.values, ..).expect("put values");
        }

        path
    }
}

// ---------------------------------------------------------------------------
// Stack reading
// ---------------------------------------------------------------------------

#[test]
fn read_basic_stack() {
    let dir = tempdir().unwrap();
    let path = StackFixture::new(4, 2, 3).write(dir.path());

    let stack = read_water_fraction(&path).unwrap();
    assert_eq!(stack.n_times(), 4);
    assert_eq!(stack.n_rows(), 2);
    assert_eq!(stack.n_cols(), 3);

    assert_eq!(stack.dates()[0], NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    assert_eq!(stack.dates()[3], NaiveDate::from_ymd_opt(2020, 1, 4).unwrap());

    let b = stack.bounds();
    assert_relative_eq!(b.lat_min, 10.0);
    assert_relative_eq!(b.lat_max, 10.5);
    assert_relative_eq!(b.lon_min, 104.0);
    assert_relative_eq!(b.lon_max, 105.0);
}

#[test]
fn fill_values_become_nan() {
    let dir = tempdir().unwrap();
    let path = StackFixture::new(2, 2, 2)
        .with_fill_value(-9999.0)
        .with_value(0, 1, -9999.0)
        .write(dir.path());

    let stack = read_water_fraction(&path).unwrap();
    assert!(stack.data()[[0, 0, 1]].is_nan());
    assert!(stack.data()[[1, 0, 1]].is_finite());
}

#[test]
fn missing_variable_error() {
    let dir = tempdir().unwrap();
    let path = StackFixture::new(2, 2, 2)
        .with_var_name("something_else")
        .write(dir.path());

    let result = read_water_fraction(&path);
    assert!(
        matches!(result, Err(IoError::MissingVariable { .. })),
        "expected MissingVariable, got {result:?}"
    );
}

#[test]
fn missing_file_error() {
    let result = read_water_fraction(Path::new("/nonexistent/stack.nc"));
    assert!(matches!(result, Err(IoError::FileNotFound { .. })));
}

// ---------------------------------------------------------------------------
// Stack writing
// ---------------------------------------------------------------------------

#[test]
fn write_then_read_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.nc");

    let mut data = Array3::from_elem((2, 2, 2), 42.0);
    data[[1, 1, 0]] = f64::NAN;
    let dates = vec![
        NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2021, 6, 2).unwrap(),
    ];
    let stack =
        SampleStack::new(data, dates.clone(), vec![10.0, 10.5], vec![104.0, 104.5]).unwrap();

    write_water_fraction(&path, &stack).unwrap();
    let loaded = read_water_fraction(&path).unwrap();

    assert_eq!(loaded.dates(), dates.as_slice());
    assert_eq!(loaded.lat(), stack.lat());
    assert_eq!(loaded.lon(), stack.lon());
    assert_relative_eq!(loaded.data()[[0, 0, 0]], 42.0);
    assert!(loaded.data()[[1, 1, 0]].is_nan());
}

// ---------------------------------------------------------------------------
// Spatial modes
// ---------------------------------------------------------------------------

fn write_modes_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("rsm.nc");
    let mut file = netcdf::create(&path).expect("create rsm file");

    file.add_dimension("mode", 2).unwrap();
    file.add_dimension("lat", 2).unwrap();
    file.add_dimension("lon", 3).unwrap();

    {
        let mut var = file.add_variable::<f64>("mode", &["mode"]).unwrap();
        var.put_values(&[0.0, 1.0], ..).unwrap();
    }
    {
        let mut var = file.add_variable::<f64>("hydro_site", &["mode"]).unwrap();
        var.put_values(&[1001.0, 1002.0], ..).unwrap();
    }
    {
        let mut var = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        var.put_values(&[10.0, 10.5], ..).unwrap();
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"]).unwrap();
        var.put_values(&[104.0, 104.5, 105.0], ..).unwrap();
    }
    {
        let data: Vec<f64> = (0..12).map(|i| i as f64 * 0.1).collect();
        let mut var = file
            .add_variable::<f64>("spatial_modes", &["mode", "lat", "lon"])
            .unwrap();
        var.put_values(&data, ..).unwrap();
    }

    path
}

#[test]
fn read_modes_fixture() {
    let dir = tempdir().unwrap();
    let path = write_modes_fixture(dir.path());

    let modes = read_spatial_modes(&path).unwrap();
    assert_eq!(modes.n_modes(), 2);
    assert_eq!(modes.grid_shape(), (2, 3));
    assert_eq!(modes.mode_id(0), 0);
    assert_eq!(modes.hydro_site(1), 1002);
    assert_relative_eq!(modes.mode_map(1)[[0, 0]], 0.6);
}

// ---------------------------------------------------------------------------
// Discharge series
// ---------------------------------------------------------------------------

fn write_discharge_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("discharge.nc");
    let mut file = netcdf::create(&path).expect("create discharge file");

    file.add_dimension("mode", 2).unwrap();
    file.add_dimension("time", 3).unwrap();

    {
        let mut var = file.add_variable::<f64>("time", &["time"]).unwrap();
        var.put_values(&[0.0, 1.0, 2.0], ..).unwrap();
        var.put_attribute("units", "days since 2021-06-01").unwrap();
    }
    {
        let mut var = file
            .add_variable::<f64>("discharge", &["mode", "time"])
            .unwrap();
        var.put_values(&[100.0, 110.0, 120.0, 200.0, 210.0, 220.0], ..)
            .unwrap();
    }

    path
}

#[test]
fn read_discharge_fixture() {
    let dir = tempdir().unwrap();
    let path = write_discharge_fixture(dir.path());

    let series = read_discharge(&path).unwrap();
    assert_eq!(series.n_modes(), 2);
    assert_eq!(series.n_times(), 3);

    let doi = NaiveDate::from_ymd_opt(2021, 6, 3).unwrap();
    assert_eq!(series.on_date(0, doi), vec![120.0]);
    assert_eq!(series.on_date(1, doi), vec![220.0]);
}
