//! Error types for register-map operations

use crate::entry::Access;
use thiserror::Error;

/// Result type alias for register-map operations
pub type Result<T> = std::result::Result<T, RegMapError>;

/// Error type returned by peripheral handlers.
///
/// Peripherals live in their own crates with their own error enums; the
/// engine carries them boxed so `?` works across the dispatch seam.
pub type PeripheralError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during register-map operations
#[derive(Debug, Error)]
pub enum RegMapError {
    /// Register name not present in the map
    #[error("unknown register: {name}")]
    UnknownRegister {
        /// Name that was looked up
        name: String,
    },

    /// Operation not permitted by the register's access mode
    #[error("register {name} is {access}: access denied")]
    AccessDenied {
        /// Register name
        name: String,
        /// The register's access mode
        access: Access,
    },

    /// Value does not fit in the register width
    #[error("value {value:#x} out of range for {size}-byte register {name}")]
    OutOfRange {
        /// Register name
        name: String,
        /// Rejected value
        value: u64,
        /// Register width in bytes
        size: u8,
    },

    /// Two entries with the same name at map construction
    #[error("duplicate register name: {name}")]
    DuplicateRegister {
        /// Offending name
        name: String,
    },

    /// A bound peripheral rejected the dispatched write
    #[error("peripheral rejected write to {register}")]
    Dispatch {
        /// Register whose write was dispatched
        register: String,
        /// The peripheral's own error
        #[source]
        source: PeripheralError,
    },

    /// Write landed on the diagnostic fallback path
    #[error("register {register} has no handler on the bound peripheral")]
    UnhandledRegister {
        /// Register with no resolved port
        register: String,
    },
}

impl RegMapError {
    /// Create an unknown-register error
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownRegister { name: name.into() }
    }
}
