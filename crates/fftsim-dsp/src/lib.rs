//! Register-driven FFT accelerator block.
//!
//! Software model of a memory-mapped FFT peripheral: a packed 32-bit
//! configuration word, fixed-capacity complex-sample staging buffers, and a
//! synchronous compute pipeline (window → transform → normalize → phase
//! rotation) triggered by register writes through `fftsim-regmap`.
//!
//! # Quick start
//!
//! ```
//! use fftsim_dsp::{fft_register_map, regs, FftBlock, SampleBuffer};
//! use fftsim_dsp::{signal, FftConfig, PaddingMode, PhaseSign};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut map = fft_register_map()?;
//! let input = SampleBuffer::shared(4096, 4096)?;
//! let output = SampleBuffer::shared(4096, 4096)?;
//!
//! let fft = Rc::new(RefCell::new(FftBlock::new()));
//! fft.borrow_mut().bind_buffers(input.clone(), output.clone());
//! map.bind(regs::FFT_START, &fft)?;
//! map.bind(regs::FFT_CONFIG, &fft)?;
//! let done = map.bind(regs::FFT_DONE, &fft)?;
//! let status = map.bind(regs::FFT_STATUS, &fft)?;
//! fft.borrow_mut().attach_registers(done, status);
//!
//! let word = FftConfig::new(5, PaddingMode::Strict, 0, PhaseSign::Positive, true)?.encode();
//! map.write(regs::FFT_CONFIG, u64::from(word))?;
//! input.borrow_mut().write(&signal::single_tone(5.0, 64))?;
//! map.write(regs::FFT_START, 1)?;
//!
//! assert_eq!(map.read(regs::FFT_DONE)?, 1);
//! assert_eq!(output.borrow().len(), 64);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

mod block;
mod buffer;
mod config;
mod error;
pub mod regs;
pub mod signal;

pub use block::{BlockState, FftBlock, FftPort};
pub use buffer::{SampleBuffer, SharedBuffer};
pub use config::{fft_size_for_code, FftConfig, PaddingMode, PhaseSign, FFT_SIZES, PHASE_STEPS};
pub use error::{BufferError, DspError, Result};
pub use regs::fft_register_map;
