//! Result type for quantile-mapping correction.

use ndarray::Array3;

/// The output of a quantile-mapping correction.
///
/// Contains the corrected forecast stack together with the learned bias
/// field, both historical quantile surfaces, the probability levels they
/// are indexed by, and validity-gate bookkeeping.
#[derive(Debug, Clone)]
pub struct QmResult {
    /// Corrected forecast, shape (T', R, C), clamped to the value range.
    corrected: Array3<f64>,
    /// Additive bias field, shape (Q+1, R, C).
    bias: Array3<f64>,
    /// Observed historical quantile surface, shape (Q+1, R, C).
    observed_quantiles: Array3<f64>,
    /// Synthetic historical quantile surface, shape (Q+1, R, C).
    synthetic_quantiles: Array3<f64>,
    /// Probability levels shared by the surfaces and the bias field.
    levels: Vec<f64>,
    /// Number of cells that passed the validity gate.
    n_valid_cells: usize,
    /// Number of cells left NaN by the validity gate.
    n_gated_cells: usize,
}

impl QmResult {
    /// Creates a new `QmResult` from its constituent parts.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        corrected: Array3<f64>,
        bias: Array3<f64>,
        observed_quantiles: Array3<f64>,
        synthetic_quantiles: Array3<f64>,
        levels: Vec<f64>,
        n_valid_cells: usize,
        n_gated_cells: usize,
    ) -> Self {
        Self {
            corrected,
            bias,
            observed_quantiles,
            synthetic_quantiles,
            levels,
            n_valid_cells,
            n_gated_cells,
        }
    }

    /// Returns the corrected forecast stack.
    pub fn corrected(&self) -> &Array3<f64> {
        &self.corrected
    }

    /// Consumes `self` and returns the owned corrected stack.
    pub fn into_corrected(self) -> Array3<f64> {
        self.corrected
    }

    /// Returns the additive bias field.
    pub fn bias(&self) -> &Array3<f64> {
        &self.bias
    }

    /// Returns the observed historical quantile surface.
    pub fn observed_quantiles(&self) -> &Array3<f64> {
        &self.observed_quantiles
    }

    /// Returns the synthetic historical quantile surface.
    pub fn synthetic_quantiles(&self) -> &Array3<f64> {
        &self.synthetic_quantiles
    }

    /// Returns the probability levels.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Returns the number of cells that passed the validity gate.
    pub fn n_valid_cells(&self) -> usize {
        self.n_valid_cells
    }

    /// Returns the number of cells rejected by the validity gate.
    pub fn n_gated_cells(&self) -> usize {
        self.n_gated_cells
    }
}
