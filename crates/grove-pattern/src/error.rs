//! Error types for pattern construction and time series validation.

use grove_tree::TreeError;

/// Errors from building pattern factories and validating their inputs.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// Returned when an empty slice is provided as a time series.
    #[error("time series must be non-empty")]
    EmptySeries,

    /// Returned when a time series contains NaN, infinity, or negative infinity.
    #[error("time series contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when z-normalizing values that are all identical.
    #[error("cannot z-normalize {n} constant values (all = {value})")]
    ConstantSeries {
        /// Number of values.
        n: usize,
        /// The repeated value.
        value: f64,
    },

    /// Returned when the shapelet length range is empty or starts at zero.
    #[error("shapelet lengths must satisfy 1 <= min_length <= max_length, got {min_length}..={max_length}")]
    InvalidShapeletLength {
        /// Shortest shapelet length requested.
        min_length: usize,
        /// Longest shapelet length requested.
        max_length: usize,
    },

    /// Returned when a feature schema has no attributes.
    #[error("feature schema must describe at least one attribute")]
    EmptySchema,

    /// Returned when a record's width differs from the feature schema.
    #[error("record {example_index} has {got} attributes, schema has {expected}")]
    SchemaMismatch {
        /// Number of attributes in the schema.
        expected: usize,
        /// Number of attributes in the record.
        got: usize,
        /// Zero-based index of the offending record.
        example_index: usize,
    },
}

impl From<PatternError> for TreeError {
    fn from(err: PatternError) -> Self {
        TreeError::PatternFactory {
            reason: err.to_string(),
        }
    }
}
