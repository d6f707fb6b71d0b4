use std::path::PathBuf;

/// Errors from tree and ensemble induction, prediction bookkeeping and persistence.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Returned when the number of ensemble members is zero.
    #[error("n_members must be at least 1, got {n_members}")]
    InvalidMemberCount {
        /// The invalid n_members value provided.
        n_members: usize,
    },

    /// Returned when the number of candidate patterns per node is zero.
    #[error("n_candidates must be at least 1, got {n_candidates}")]
    InvalidCandidateCount {
        /// The invalid n_candidates value provided.
        n_candidates: usize,
    },

    /// Returned when max_depth is zero.
    #[error("max_depth must be at least 1, got {max_depth}")]
    InvalidMaxDepth {
        /// The invalid max_depth value provided.
        max_depth: usize,
    },

    /// Returned when min_split_weight is negative or not finite.
    #[error("min_split_weight must be finite and non-negative, got {min_split_weight}")]
    InvalidMinSplitWeight {
        /// The invalid min_split_weight value provided.
        min_split_weight: f64,
    },

    /// Returned when the example and label sequences differ in length.
    #[error("got {n_examples} examples but {n_labels} labels")]
    LengthMismatch {
        /// Number of feature records.
        n_examples: usize,
        /// Number of labels.
        n_labels: usize,
    },

    /// Returned when the training set is empty, leaving an empty label domain.
    #[error("training dataset has zero examples")]
    EmptyDataset,

    /// Returned when a label lies outside the domain of a fitted model.
    #[error("label {label} at example {example_index} is outside the domain of {n_labels} labels")]
    LabelOutOfDomain {
        /// The offending label.
        label: usize,
        /// The zero-based index of the example carrying it.
        example_index: usize,
        /// Size of the label domain.
        n_labels: usize,
    },

    /// Returned by a pattern factory that cannot produce candidates for the data it was given.
    #[error("pattern factory failed: {reason}")]
    PatternFactory {
        /// Human-readable description of the failure.
        reason: String,
    },

    /// Returned when fitting one ensemble member fails; the whole ensemble fit is abandoned.
    #[error("fitting ensemble member {member} failed")]
    MemberFit {
        /// Zero-based index of the failing member.
        member: usize,
        /// The error raised while fitting that member.
        source: Box<TreeError>,
    },

    /// Returned when the dedicated worker pool cannot be created.
    #[error("failed to build worker pool")]
    ThreadPool {
        /// The underlying rayon error.
        source: rayon::ThreadPoolBuildError,
    },

    /// Returned when OOB evaluation fails (no example has any OOB member).
    #[error("OOB evaluation failed: {reason}")]
    OobEvaluationFailed {
        /// Human-readable description of why OOB evaluation failed.
        reason: String,
    },

    /// Returned when model serialization fails.
    #[error("failed to serialize model")]
    SerializeModel {
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when model deserialization fails.
    #[error("failed to deserialize model from {path}")]
    DeserializeModel {
        /// Path to the model file that could not be deserialized.
        path: PathBuf,
        /// The underlying bincode error.
        source: Box<bincode::ErrorKind>,
    },

    /// Returned when writing the model file fails.
    #[error("failed to write model to {path}")]
    WriteModel {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when reading the model file fails.
    #[error("failed to read model from {path}")]
    ReadModel {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when loading a model with an incompatible format version.
    #[error("incompatible model version in {path}: expected {expected}, found {found}")]
    IncompatibleModelVersion {
        /// The model format version this build expects.
        expected: u32,
        /// The model format version found in the file.
        found: u32,
        /// Path to the model file with the incompatible version.
        path: PathBuf,
    },
}
