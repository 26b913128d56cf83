//! AOI directory layout.
//!
//! Each area of interest keeps its model artifacts and auxiliary data in
//! a fixed tree under a common root:
//!
//! ```text
//! <root>/<aoi>/TF_model/site-<site>_tpc<mode>/   predictive models
//! <root>/<aoi>/aux_img_stack/                    historical stacks
//! <root>/<aoi>/RSM/                              spatial-mode dataset
//! <root>/<aoi>/hydrodata/                        forecast driving data
//! ```

use std::path::{Path, PathBuf};

use crate::model::ModelKey;

/// Resolves file locations inside one AOI's directory tree.
///
/// File names default to the conventional layout and can be overridden
/// with the builder methods.
#[derive(Debug, Clone)]
pub struct AoiPaths {
    root: PathBuf,
    aoi: String,
    observed_file: String,
    synthetic_file: String,
    modes_file: String,
    discharge_file: String,
}

impl AoiPaths {
    /// Creates the path layout for `aoi` under `root`.
    pub fn new(root: impl Into<PathBuf>, aoi: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            aoi: aoi.into(),
            observed_file: "hist_real_wf_2020.nc".to_string(),
            synthetic_file: "hist_syn_stack_2020.nc".to_string(),
            modes_file: "RSM_hydro.nc".to_string(),
            discharge_file: "mid_fct_2019_2021_0024.nc".to_string(),
        }
    }

    /// Overrides the historical observed stack file name.
    pub fn with_observed_file(mut self, name: impl Into<String>) -> Self {
        self.observed_file = name.into();
        self
    }

    /// Overrides the historical synthetic stack file name.
    pub fn with_synthetic_file(mut self, name: impl Into<String>) -> Self {
        self.synthetic_file = name.into();
        self
    }

    /// Overrides the spatial-mode dataset file name.
    pub fn with_modes_file(mut self, name: impl Into<String>) -> Self {
        self.modes_file = name.into();
        self
    }

    /// Overrides the forecast discharge file name.
    pub fn with_discharge_file(mut self, name: impl Into<String>) -> Self {
        self.discharge_file = name.into();
        self
    }

    /// Returns the AOI's base directory.
    pub fn aoi_dir(&self) -> PathBuf {
        self.root.join(&self.aoi)
    }

    /// Returns the predictive-model directory.
    pub fn model_dir(&self) -> PathBuf {
        self.aoi_dir().join("TF_model")
    }

    /// Returns the artifact path for a site/mode model key.
    pub fn model_artifact(&self, key: ModelKey) -> PathBuf {
        self.model_dir().join(key.artifact_name())
    }

    /// Returns the historical observed stack path.
    pub fn historical_observed(&self) -> PathBuf {
        self.aoi_dir().join("aux_img_stack").join(&self.observed_file)
    }

    /// Returns the historical synthetic stack path.
    pub fn historical_synthetic(&self) -> PathBuf {
        self.aoi_dir().join("aux_img_stack").join(&self.synthetic_file)
    }

    /// Returns the spatial-mode dataset path.
    pub fn spatial_modes(&self) -> PathBuf {
        self.aoi_dir().join("RSM").join(&self.modes_file)
    }

    /// Returns the forecast discharge path.
    pub fn forecast_discharge(&self) -> PathBuf {
        self.aoi_dir().join("hydrodata").join(&self.discharge_file)
    }
}

impl AoiPaths {
    /// Returns the AOI name.
    pub fn aoi(&self) -> &str {
        &self.aoi
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
