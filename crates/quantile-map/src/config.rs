//! Configuration for quantile-mapping bias correction.

use crate::error::QuantileMapError;

/// Configuration for quantile-mapping estimation and correction.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use fier_quantile_map::QmConfig;
///
/// let config = QmConfig::new()
///     .with_n_bins(50)
///     .with_mean_weight(0.8);
/// ```
#[derive(Clone, Debug)]
pub struct QmConfig {
    n_bins: usize,
    mean_weight: f64,
    residual_weight: f64,
    value_min: f64,
    value_max: f64,
}

impl QmConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `n_bins = 100`, `mean_weight = 1.0`,
    /// `residual_weight = 1.0`, `value_min = 0.0`, `value_max = 100.0`.
    ///
    /// The default weights reproduce conventional full-strength
    /// quantile-to-quantile mapping.
    pub fn new() -> Self {
        Self {
            n_bins: 100,
            mean_weight: 1.0,
            residual_weight: 1.0,
            value_min: 0.0,
            value_max: 100.0,
        }
    }

    // --- Builder methods ---

    /// Sets the number of quantile bins Q (the engine evaluates Q+1 levels).
    pub fn with_n_bins(mut self, n: usize) -> Self {
        self.n_bins = n;
        self
    }

    /// Sets the weight applied to the mean-difference component of the bias.
    pub fn with_mean_weight(mut self, g: f64) -> Self {
        self.mean_weight = g;
        self
    }

    /// Sets the weight applied to the quantile-residual component of the bias.
    pub fn with_residual_weight(mut self, f: f64) -> Self {
        self.residual_weight = f;
        self
    }

    /// Sets the output clamp range `[min, max]`.
    pub fn with_value_range(mut self, min: f64, max: f64) -> Self {
        self.value_min = min;
        self.value_max = max;
        self
    }

    // --- Accessors ---

    /// Returns the number of quantile bins Q.
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Returns the mean-difference weight.
    pub fn mean_weight(&self) -> f64 {
        self.mean_weight
    }

    /// Returns the quantile-residual weight.
    pub fn residual_weight(&self) -> f64 {
        self.residual_weight
    }

    /// Returns the lower output clamp bound.
    pub fn value_min(&self) -> f64 {
        self.value_min
    }

    /// Returns the upper output clamp bound.
    pub fn value_max(&self) -> f64 {
        self.value_max
    }

    /// Returns the Q+1 probability levels `0, 1/Q, ..., 1`.
    ///
    /// The levels are strictly increasing and shared between the quantile
    /// surfaces and the bias field.
    pub fn probability_levels(&self) -> Vec<f64> {
        let q = self.n_bins as f64;
        (0..=self.n_bins).map(|i| i as f64 / q).collect()
    }

    /// Validates this configuration.
    ///
    /// Checks that `n_bins` is at least 1, both weights are finite, and
    /// the clamp range is a non-empty interval with finite bounds.
    pub fn validate(&self) -> Result<(), QuantileMapError> {
        if self.n_bins < 1 {
            return Err(QuantileMapError::InvalidConfig {
                reason: format!("n_bins must be >= 1, got {}", self.n_bins),
            });
        }

        if !self.mean_weight.is_finite() {
            return Err(QuantileMapError::InvalidConfig {
                reason: format!("mean_weight must be finite, got {}", self.mean_weight),
            });
        }

        if !self.residual_weight.is_finite() {
            return Err(QuantileMapError::InvalidConfig {
                reason: format!(
                    "residual_weight must be finite, got {}",
                    self.residual_weight
                ),
            });
        }

        if !self.value_min.is_finite()
            || !self.value_max.is_finite()
            || self.value_min >= self.value_max
        {
            return Err(QuantileMapError::InvalidConfig {
                reason: format!(
                    "value range must be finite with min < max, got [{}, {}]",
                    self.value_min, self.value_max
                ),
            });
        }

        Ok(())
    }
}

impl Default for QmConfig {
    fn default() -> Self {
        Self::new()
    }
}
