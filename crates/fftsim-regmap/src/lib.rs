//! Generic register-map engine for simulated memory-mapped peripherals.
//!
//! This crate has **no DSP knowledge** — it is a pure model of the bus
//! surface: named fixed-width registers with access control, synchronous
//! dispatch of writes to a bound peripheral, and a narrow bypass capability
//! a peripheral uses to post results into its own registers.
//!
//! # Dispatch model
//!
//! ```text
//! caller ──write(name, value)──▶ RegisterMap
//!                                   │  access + range check, store
//!                                   ▼
//!                               Binding (port resolved once, at bind time)
//!                                   │
//!                     ┌─────────────┴──────────────┐
//!                     ▼                            ▼
//!            Peripheral::handle(port, v)   Peripheral::fallback(name, v)
//!                                          (diagnostic only — warns and fails)
//! ```
//!
//! The write call returns only after the dispatched side effect has fully
//! completed: the engine models a blocking register poke against a
//! synchronous device, one writer, no arbitration, no queued writes.
//!
//! # Bypass path
//!
//! [`RegisterMap::bind`] returns a [`RegisterHandle`] for the bound
//! register. The handle skips access and range checks (values are masked to
//! the register width) and is how a peripheral posts done flags and result
//! labels without re-entering the checked path. External callers never see
//! this type unless they bound the peripheral themselves.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod entry;
mod error;
mod handle;
mod map;

pub use entry::{Access, RegisterEntry};
pub use error::{PeripheralError, RegMapError, Result};
pub use handle::RegisterHandle;
pub use map::{Peripheral, RegisterMap};
