//! Temporal-predictor-coefficient model seam.
//!
//! The per-mode predictive network is an external collaborator: this
//! module only defines the lookup key and the traits through which the
//! orchestrator invokes it.

use std::fmt;

use crate::error::ForecastError;

/// Identifies a predictive model by its driving site and spatial mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelKey {
    /// Driving-site identifier.
    pub site: i64,
    /// Mode identifier.
    pub mode: i64,
}

impl ModelKey {
    /// Returns the conventional on-disk artifact name for this key,
    /// e.g. `site-1001_tpc03`.
    pub fn artifact_name(&self) -> String {
        format!("site-{}_tpc{:02}", self.site, self.mode)
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.artifact_name())
    }
}

/// A per-mode predictive model: maps a driving hydrological series (one
/// value per forecast step) to a temporal coefficient per step.
pub trait TpcModel {
    /// Predicts one temporal coefficient per driving sample.
    fn predict(&self, discharge: &[f64]) -> Result<Vec<f64>, ForecastError>;
}

/// A collection of predictive models indexed by [`ModelKey`].
pub trait TpcModelStore {
    /// Looks up the model for `key`, if one exists.
    fn model(&self, key: ModelKey) -> Option<&dyn TpcModel>;
}
