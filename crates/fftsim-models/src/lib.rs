//! Tone classifier for FFT accelerator output.
//!
//! This crate provides the classifier peripheral that consumes the FFT
//! block's output buffer, the nearest-centroid model behind it with its
//! compact `.tcm` serialisation, and the offline tooling (synthetic dataset
//! generation and the `train` binary) that produces model files.
//!
//! # Example
//!
//! ```no_run
//! use fftsim_models::{ClassifierBlock, ToneClassifier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = ToneClassifier::from_file("tone_classifier.tcm")?;
//! let classifier = ClassifierBlock::new(model);
//! # let _ = classifier;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

mod block;
pub mod dataset;
mod error;
mod model;
pub mod regs;

pub use block::{ClassifierBlock, ClassifierPort};
pub use dataset::{generate_dataset, Dataset, DEFAULT_NOISE_RATIO};
pub use error::{ClassifierError, Result};
pub use model::{SignalClass, ToneClassifier, MODEL_EXTENSION, MODEL_MAGIC};
pub use regs::classifier_register_map;
