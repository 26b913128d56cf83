//! Forecast orchestration for FIER water-fraction maps.
//!
//! Assembles a raw synthetic forecast as a weighted sum over reduced
//! spatial modes, where each mode's weight per forecast step comes from a
//! per-mode predictive model evaluated on hydrological driving data, then
//! corrects the synthesis against observed history with quantile mapping.
//!
//! The predictive models themselves are external collaborators reached
//! through the [`TpcModel`]/[`TpcModelStore`] traits; this crate supplies
//! the lookup key, the AOI path layout, the reconstruction arithmetic,
//! and the end-to-end driver.
//!
//! # Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use fier_forecast::{AoiPaths, ForecastInputs, run_forecast};
//! use fier_quantile_map::QmConfig;
//!
//! # fn store() -> Box<dyn fier_forecast::TpcModelStore> { unimplemented!() }
//! let paths = AoiPaths::new("AOI", "tonle_sap");
//! let inputs = ForecastInputs::load(&paths)?;
//! let date = NaiveDate::from_ymd_opt(2021, 6, 3).unwrap();
//! let store = store();
//! let output = run_forecast(&inputs, store.as_ref(), date, &QmConfig::new())?;
//! println!("{:?}", output.bounds().corners());
//! # Ok::<(), fier_forecast::ForecastError>(())
//! ```

mod error;
mod model;
mod orchestrate;
mod paths;
mod reconstruct;

pub use error::ForecastError;
pub use model::{ModelKey, TpcModel, TpcModelStore};
pub use orchestrate::{ForecastInputs, ForecastOutput, run_forecast};
pub use paths::AoiPaths;
pub use reconstruct::reconstruct;
