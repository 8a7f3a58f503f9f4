//! Error types for the FFT block and sample buffers

use thiserror::Error;

/// Result type alias for DSP operations
pub type Result<T> = std::result::Result<T, DspError>;

/// Errors raised by [`crate::SampleBuffer`]
#[derive(Debug, Error)]
pub enum BufferError {
    /// `full_threshold > capacity` at construction
    #[error("full threshold {threshold} exceeds buffer capacity {capacity}")]
    ThresholdExceedsCapacity {
        /// Requested full threshold
        threshold: usize,
        /// Buffer capacity
        capacity: usize,
    },

    /// Write longer than the buffer capacity
    #[error("{len} samples exceed buffer capacity {capacity}")]
    CapacityExceeded {
        /// Length of the rejected write
        len: usize,
        /// Buffer capacity
        capacity: usize,
    },
}

/// Errors raised by the FFT block
#[derive(Debug, Error)]
pub enum DspError {
    /// Configuration word does not fit the 32-bit register
    #[error("configuration word {word:#x} does not fit in 32 bits")]
    InvalidConfig {
        /// Rejected word
        word: u64,
    },

    /// Size code outside the fixed length table
    #[error("size code {code} maps to no FFT length (valid codes: 0–11)")]
    InvalidSize {
        /// Rejected size code
        code: u8,
    },

    /// Reserved bits [31:19] set in the configuration word
    #[error("reserved bits set in configuration word: {bits:#x}")]
    ReservedBitsSet {
        /// The nonzero reserved field
        bits: u32,
    },

    /// Strict padding mode with a short input
    #[error("insufficient samples: need {needed}, have {available}")]
    InsufficientSamples {
        /// Configured FFT length
        needed: usize,
        /// Samples actually available
        available: usize,
    },

    /// Run triggered with no valid configuration loaded
    #[error("no valid configuration loaded")]
    NotConfigured,

    /// Buffer operation failed
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
