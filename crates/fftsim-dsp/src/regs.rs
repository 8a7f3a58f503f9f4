//! FFT peripheral register namespace
//!
//! Names, offsets, and widths of the registers the FFT block exposes, plus
//! the map constructor that lays them all out. Offsets are informational —
//! the bus model addresses registers by name.
//!
//! | register | offset | size | access |
//! |----------|--------|------|--------|
//! | `FFT_START` | 0x00 | 1 | rw — write 1 to trigger a run |
//! | `FFT_DONE` | 0x01 | 1 | r — set after each completed run |
//! | `FFT_DATA_IN` | 0x02 | 4 | rw — word staging |
//! | `FFT_DATA_OUT` | 0x06 | 4 | r — word staging |
//! | `FFT_CONFIG` | 0x0A | 4 | rw — packed word, see [`crate::FftConfig`] |
//! | `FFT_STATUS` | 0x0E | 1 | r — block state (0 idle / 1 configured / 2 running) |
//! | `WINDOW_SIZE` | 0x0F | 1 | rw — reserved for the window seam |
//! | `WINDOW_TYPE` | 0x10 | 1 | rw — reserved for the window seam |
//!
//! Bulk samples do not travel through the data registers; they go through
//! the bound [`crate::SampleBuffer`]s.

use crate::block::FftBlock;
use fftsim_regmap::{Access, RegMapError, RegisterEntry, RegisterMap};

/// Run trigger — writing 1 starts the pipeline.
pub const FFT_START: &str = "FFT_START";
/// Done flag, posted by the block after each successful run.
pub const FFT_DONE: &str = "FFT_DONE";
/// Input word staging.
pub const FFT_DATA_IN: &str = "FFT_DATA_IN";
/// Output word staging.
pub const FFT_DATA_OUT: &str = "FFT_DATA_OUT";
/// Packed configuration word.
pub const FFT_CONFIG: &str = "FFT_CONFIG";
/// Block state, posted by the block on every transition.
pub const FFT_STATUS: &str = "FFT_STATUS";
/// Window length override — storage only, no handler bound.
pub const WINDOW_SIZE: &str = "WINDOW_SIZE";
/// Window function selector — storage only, no handler bound.
pub const WINDOW_TYPE: &str = "WINDOW_TYPE";

/// Register offsets within the peripheral's aperture.
pub mod addr {
    /// `FFT_START`
    pub const FFT_START: u16 = 0x00;
    /// `FFT_DONE`
    pub const FFT_DONE: u16 = 0x01;
    /// `FFT_DATA_IN`
    pub const FFT_DATA_IN: u16 = 0x02;
    /// `FFT_DATA_OUT`
    pub const FFT_DATA_OUT: u16 = 0x06;
    /// `FFT_CONFIG`
    pub const FFT_CONFIG: u16 = 0x0A;
    /// `FFT_STATUS`
    pub const FFT_STATUS: u16 = 0x0E;
    /// `WINDOW_SIZE`
    pub const WINDOW_SIZE: u16 = 0x0F;
    /// `WINDOW_TYPE`
    pub const WINDOW_TYPE: u16 = 0x10;
}

/// Build the FFT peripheral's register map with all entries in place.
///
/// # Errors
///
/// Propagates `DuplicateRegister` from map construction (the fixed layout
/// has none; the signature stays fallible so callers `?` uniformly).
pub fn fft_register_map() -> Result<RegisterMap<FftBlock>, RegMapError> {
    RegisterMap::new([
        RegisterEntry::new(FFT_START, addr::FFT_START, 1, Access::ReadWrite),
        RegisterEntry::new(FFT_DONE, addr::FFT_DONE, 1, Access::ReadOnly),
        RegisterEntry::new(FFT_DATA_IN, addr::FFT_DATA_IN, 4, Access::ReadWrite),
        RegisterEntry::new(FFT_DATA_OUT, addr::FFT_DATA_OUT, 4, Access::ReadOnly),
        RegisterEntry::new(FFT_CONFIG, addr::FFT_CONFIG, 4, Access::ReadWrite),
        RegisterEntry::new(FFT_STATUS, addr::FFT_STATUS, 1, Access::ReadOnly),
        RegisterEntry::new(WINDOW_SIZE, addr::WINDOW_SIZE, 1, Access::ReadWrite),
        RegisterEntry::new(WINDOW_TYPE, addr::WINDOW_TYPE, 1, Access::ReadWrite),
    ])
}
