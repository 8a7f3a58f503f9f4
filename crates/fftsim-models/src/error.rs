//! Error types for classifier model operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Errors that can occur during model training, loading, and inference
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Model file not found or unreadable
    #[error("model file not found: {path}")]
    FileNotFound {
        /// Path that was attempted
        path: PathBuf,
    },

    /// Blob does not start with the model magic
    #[error("invalid model header: expected magic bytes \"TCM1\"")]
    InvalidHeader,

    /// Blob shorter than its header claims
    #[error("model blob truncated: {len} bytes, expected {expected}")]
    Truncated {
        /// Actual blob length
        len: usize,
        /// Length the header implies
        expected: usize,
    },

    /// Inference input length differs from the trained feature length
    #[error("feature length mismatch: got {got}, model expects {expected}")]
    FeatureLength {
        /// Length of the offered magnitude vector
        got: usize,
        /// Feature length the model was trained with
        expected: usize,
    },

    /// Training set missing a class entirely
    #[error("class \"{class}\" has no training samples")]
    EmptyClass {
        /// Human-readable class name
        class: &'static str,
    },

    /// Training set empty or inconsistent
    #[error("training set is empty")]
    EmptyDataset,

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error
        #[from]
        source: std::io::Error,
    },
}
