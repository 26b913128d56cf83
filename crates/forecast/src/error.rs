//! Error types for the fier-forecast crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the fier-forecast crate.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// Returned when no predictive model artifact matches a site/mode key.
    #[error("no predictive model for site {site}, mode {mode}")]
    ModelLookup {
        /// Driving-site identifier.
        site: i64,
        /// Mode identifier.
        mode: i64,
    },

    /// Returned when a predictive model fails or misbehaves.
    #[error("prediction failed for site {site}, mode {mode}: {reason}")]
    Prediction {
        /// Driving-site identifier.
        site: i64,
        /// Mode identifier.
        mode: i64,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when the driving-data series has no sample at the
    /// requested date.
    #[error("no driving data for mode {mode} on {date}")]
    NoDrivingData {
        /// Mode identifier.
        mode: i64,
        /// Requested date of interest.
        date: NaiveDate,
    },

    /// Returned when the number of modes disagrees between datasets.
    #[error("mode count mismatch: {modes} spatial modes but {series} driving series")]
    ModeCountMismatch {
        /// Number of spatial modes.
        modes: usize,
        /// Number of driving series (or coefficient vectors).
        series: usize,
    },

    /// Returned when predicted coefficient vectors differ in length
    /// across modes.
    #[error("coefficient length mismatch: expected {expected} steps, got {got}")]
    TpcLengthMismatch {
        /// Length of the first mode's coefficients.
        expected: usize,
        /// Offending length.
        got: usize,
    },

    /// Returned when a predictive model yields no coefficients at all.
    #[error("predictive model returned no temporal coefficients")]
    EmptyPrediction,

    /// Returned when the spatial-mode grid disagrees with the stack grid.
    #[error(
        "grid mismatch: modes are {got_rows} x {got_cols}, \
         stacks are {expected_rows} x {expected_cols}"
    )]
    GridMismatch {
        /// Stack rows.
        expected_rows: usize,
        /// Stack columns.
        expected_cols: usize,
        /// Mode-map rows.
        got_rows: usize,
        /// Mode-map columns.
        got_cols: usize,
    },

    /// Wraps a failure from the I/O layer.
    #[error("io error: {0}")]
    Io(#[from] fier_io::IoError),

    /// Wraps a failure from the quantile-mapping engine.
    #[error("quantile mapping error: {0}")]
    QuantileMap(#[from] fier_quantile_map::QuantileMapError),
}
