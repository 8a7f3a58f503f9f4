//! Classifier peripheral register namespace
//!
//! | register | offset | size | access |
//! |----------|--------|------|--------|
//! | `CLASSIFY_TRIGGER` | 0x20 | 1 | rw — write 1 to run inference |
//! | `CLASSIFY_RESULT` | 0x21 | 1 | r — posted class label |
//! | `CLASSIFY_DONE` | 0x22 | 1 | r — set after each inference |

use crate::block::ClassifierBlock;
use fftsim_regmap::{Access, RegMapError, RegisterEntry, RegisterMap};

/// Inference trigger — writing 1 classifies the bound buffer.
pub const CLASSIFY_TRIGGER: &str = "CLASSIFY_TRIGGER";
/// Posted class label (see `SignalClass::label`).
pub const CLASSIFY_RESULT: &str = "CLASSIFY_RESULT";
/// Done flag, posted after each inference.
pub const CLASSIFY_DONE: &str = "CLASSIFY_DONE";

/// Register offsets within the classifier's aperture.
pub mod addr {
    /// `CLASSIFY_TRIGGER`
    pub const CLASSIFY_TRIGGER: u16 = 0x20;
    /// `CLASSIFY_RESULT`
    pub const CLASSIFY_RESULT: u16 = 0x21;
    /// `CLASSIFY_DONE`
    pub const CLASSIFY_DONE: u16 = 0x22;
}

/// Build the classifier's register map.
///
/// # Errors
///
/// Propagates `DuplicateRegister` from map construction (the fixed layout
/// has none; the signature stays fallible so callers `?` uniformly).
pub fn classifier_register_map() -> Result<RegisterMap<ClassifierBlock>, RegMapError> {
    RegisterMap::new([
        RegisterEntry::new(CLASSIFY_TRIGGER, addr::CLASSIFY_TRIGGER, 1, Access::ReadWrite),
        RegisterEntry::new(CLASSIFY_RESULT, addr::CLASSIFY_RESULT, 1, Access::ReadOnly),
        RegisterEntry::new(CLASSIFY_DONE, addr::CLASSIFY_DONE, 1, Access::ReadOnly),
    ])
}
