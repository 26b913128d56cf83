//! # fier-io
//!
//! Read water-fraction stacks, reduced-spatial-mode datasets, and
//! hydrological driving series from NetCDF, and write corrected forecast
//! stacks back out. Bridges external files into FIER's internal
//! `ndarray`-based data model.

mod discharge;
mod error;
mod modes;
mod netcdf_read;
mod reader;
mod stack;
mod writer;

pub use discharge::{DischargeSeries, read_discharge};
pub use error::IoError;
pub use modes::{SpatialModes, read_spatial_modes};
pub use reader::read_water_fraction;
pub use stack::{GeoBounds, SampleStack};
pub use writer::write_water_fraction;
