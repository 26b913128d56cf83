//! Error types for the fier-quantile-map crate.

/// Error type for all fallible operations in the fier-quantile-map crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuantileMapError {
    /// Returned when an input stack has a zero-length dimension.
    #[error("stack '{name}' is empty (shape {nt} x {rows} x {cols})")]
    EmptyStack {
        /// Which input stack was empty.
        name: &'static str,
        /// Number of time steps.
        nt: usize,
        /// Number of latitude rows.
        rows: usize,
        /// Number of longitude columns.
        cols: usize,
    },

    /// Returned when two stacks disagree on their spatial extent.
    #[error(
        "spatial shape mismatch: stack '{name}' is {got_rows} x {got_cols}, \
         expected {expected_rows} x {expected_cols}"
    )]
    SpatialShapeMismatch {
        /// Which input stack had the unexpected extent.
        name: &'static str,
        /// Expected number of latitude rows.
        expected_rows: usize,
        /// Expected number of longitude columns.
        expected_cols: usize,
        /// Actual number of latitude rows.
        got_rows: usize,
        /// Actual number of longitude columns.
        got_cols: usize,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_stack() {
        let e = QuantileMapError::EmptyStack {
            name: "observed",
            nt: 0,
            rows: 4,
            cols: 5,
        };
        assert_eq!(e.to_string(), "stack 'observed' is empty (shape 0 x 4 x 5)");
    }

    #[test]
    fn error_shape_mismatch() {
        let e = QuantileMapError::SpatialShapeMismatch {
            name: "synthetic",
            expected_rows: 10,
            expected_cols: 12,
            got_rows: 10,
            got_cols: 11,
        };
        assert_eq!(
            e.to_string(),
            "spatial shape mismatch: stack 'synthetic' is 10 x 11, expected 10 x 12"
        );
    }

    #[test]
    fn error_invalid_config() {
        let e = QuantileMapError::InvalidConfig {
            reason: "n_bins must be >= 1, got 0".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid configuration: n_bins must be >= 1, got 0"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<QuantileMapError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<QuantileMapError>();
    }
}
