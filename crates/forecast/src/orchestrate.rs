//! End-to-end forecast driver for one AOI/date invocation.

use chrono::NaiveDate;
use fier_io::{
    DischargeSeries, GeoBounds, SampleStack, SpatialModes, read_discharge, read_spatial_modes,
    read_water_fraction,
};
use fier_quantile_map::{QmConfig, correct_forecast, temporal_mean};
use tracing::{debug, info};

use crate::error::ForecastError;
use crate::model::{ModelKey, TpcModelStore};
use crate::paths::AoiPaths;
use crate::reconstruct::reconstruct;

/// All datasets a forecast invocation reads.
#[derive(Debug, Clone)]
pub struct ForecastInputs {
    /// Historical observed water-fraction stack.
    pub observed: SampleStack,
    /// Historical synthetic water-fraction stack.
    pub synthetic: SampleStack,
    /// Reduced spatial modes with their driving sites.
    pub modes: SpatialModes,
    /// Forecast discharge series, one per mode.
    pub discharge: DischargeSeries,
}

impl ForecastInputs {
    /// Loads all four datasets from an AOI's directory tree.
    pub fn load(paths: &AoiPaths) -> Result<Self, ForecastError> {
        debug!(aoi = paths.aoi(), "loading forecast inputs");
        Ok(Self {
            observed: read_water_fraction(&paths.historical_observed())?,
            synthetic: read_water_fraction(&paths.historical_synthetic())?,
            modes: read_spatial_modes(&paths.spatial_modes())?,
            discharge: read_discharge(&paths.forecast_discharge())?,
        })
    }
}

/// The corrected forecast map and its geographic bounding box.
#[derive(Debug, Clone)]
pub struct ForecastOutput {
    map: SampleStack,
    bounds: GeoBounds,
    n_valid_cells: usize,
    n_gated_cells: usize,
}

impl ForecastOutput {
    /// Returns the corrected water-fraction forecast.
    pub fn map(&self) -> &SampleStack {
        &self.map
    }

    /// Consumes `self` and returns the owned forecast stack.
    pub fn into_map(self) -> SampleStack {
        self.map
    }

    /// Returns the geographic bounding box of the forecast.
    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    /// Returns the number of cells that passed the validity gate.
    pub fn n_valid_cells(&self) -> usize {
        self.n_valid_cells
    }

    /// Returns the number of cells left NaN by the validity gate.
    pub fn n_gated_cells(&self) -> usize {
        self.n_gated_cells
    }
}

/// Runs one forecast invocation: predict per-mode temporal coefficients
/// from the driving data at `date`, reconstruct the raw synthetic field,
/// and correct it against the historical pair.
///
/// # Errors
///
/// Returns [`ForecastError`] if a dataset is inconsistent, the driving
/// data lacks the requested date, a model is missing
/// ([`ForecastError::ModelLookup`], fatal for the invocation), or the
/// quantile-mapping engine rejects its inputs. Failures are not
/// recovered: there is no partial result.
pub fn run_forecast(
    inputs: &ForecastInputs,
    store: &dyn TpcModelStore,
    date: NaiveDate,
    config: &QmConfig,
) -> Result<ForecastOutput, ForecastError> {
    let modes = &inputs.modes;

    if inputs.discharge.n_modes() != modes.n_modes() {
        return Err(ForecastError::ModeCountMismatch {
            modes: modes.n_modes(),
            series: inputs.discharge.n_modes(),
        });
    }

    let (rows, cols) = (inputs.observed.n_rows(), inputs.observed.n_cols());
    if modes.grid_shape() != (rows, cols) {
        let (got_rows, got_cols) = modes.grid_shape();
        return Err(ForecastError::GridMismatch {
            expected_rows: rows,
            expected_cols: cols,
            got_rows,
            got_cols,
        });
    }

    // Predict one coefficient vector per mode from the driving data at
    // the date of interest.
    let mut tpcs = Vec::with_capacity(modes.n_modes());
    for index in 0..modes.n_modes() {
        let key = ModelKey {
            site: modes.hydro_site(index),
            mode: modes.mode_id(index),
        };

        let driving = inputs.discharge.on_date(index, date);
        if driving.is_empty() {
            return Err(ForecastError::NoDrivingData {
                mode: key.mode,
                date,
            });
        }

        let model = store.model(key).ok_or(ForecastError::ModelLookup {
            site: key.site,
            mode: key.mode,
        })?;
        let tpc = model.predict(&driving)?;
        if tpc.is_empty() {
            return Err(ForecastError::Prediction {
                site: key.site,
                mode: key.mode,
                reason: "model returned no coefficients".to_string(),
            });
        }

        debug!(%key, n_steps = tpc.len(), "predicted temporal coefficients");
        tpcs.push(tpc);
    }

    let mean_field = temporal_mean(inputs.observed.view());
    let raw = reconstruct(modes, &tpcs, mean_field.view())?;

    let result = correct_forecast(
        inputs.observed.view(),
        inputs.synthetic.view(),
        raw.view(),
        config,
    )?;
    let n_valid_cells = result.n_valid_cells();
    let n_gated_cells = result.n_gated_cells();

    let n_steps = raw.dim().0;
    let map = inputs
        .observed
        .with_data(result.into_corrected(), vec![date; n_steps])?;
    let bounds = map.bounds();

    info!(
        %date,
        n_modes = modes.n_modes(),
        n_steps,
        n_valid_cells,
        n_gated_cells,
        "forecast corrected"
    );

    Ok(ForecastOutput {
        map,
        bounds,
        n_valid_cells,
        n_gated_cells,
    })
}
