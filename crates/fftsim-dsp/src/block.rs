//! The FFT accelerator block
//!
//! A software model of the register-driven FFT peripheral: decodes the
//! packed configuration word, applies the buffer-consumption policy, runs
//! the compute pipeline, and posts `done`/status through the bypass handles
//! granted at bind time.
//!
//! ## Pipeline
//!
//! ```text
//! acquire (padding policy, §consumption) ─▶ window (rectangular identity)
//!        ─▶ forward DFT (rustfft) ─▶ normalize (optional 1/√N)
//!        ─▶ phase rotation exp(±i·φ) ─▶ commit (output buffer or result slot)
//! ```
//!
//! Every stage completes within one `run()`; there is no suspension point,
//! so a caller that triggered the run via a register write observes the
//! committed output and the done flag as soon as the write returns.
//!
//! ## State machine
//!
//! `Idle` (no valid config) → `Configured` → `Running` → `Configured`.
//! Triggering while `Idle` fails — no default configuration is assumed.

use crate::buffer::SharedBuffer;
use crate::config::{FftConfig, PaddingMode};
use crate::error::{DspError, Result};
use crate::regs;
use fftsim_regmap::{Peripheral, PeripheralError, RegisterHandle};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// FFT block state, as exposed through `FFT_STATUS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// No valid configuration loaded
    Idle,
    /// Valid configuration, no run in progress
    Configured,
    /// Pipeline executing (momentary — the run is synchronous)
    Running,
}

impl BlockState {
    /// Encoding posted to the status register.
    pub const fn status_bits(self) -> u64 {
        match self {
            Self::Idle => 0,
            Self::Configured => 1,
            Self::Running => 2,
        }
    }
}

/// Register ports the FFT block handles directly.
#[derive(Debug, Clone, Copy)]
pub enum FftPort {
    /// `FFT_START` — value 1 triggers a run
    Start,
    /// `FFT_CONFIG` — packed word, delegated to [`FftBlock::configure`]
    Config,
}

/// The FFT accelerator peripheral.
pub struct FftBlock {
    config: Option<FftConfig>,
    state: BlockState,
    done: bool,

    planner: FftPlanner<f64>,
    plan: Option<Arc<dyn Fft<f64>>>,
    scratch: Vec<Complex64>,

    input_buffer: Option<SharedBuffer>,
    output_buffer: Option<SharedBuffer>,
    input_data: Vec<Complex64>,
    result: Option<Vec<Complex64>>,

    done_reg: Option<RegisterHandle>,
    status_reg: Option<RegisterHandle>,
}

impl FftBlock {
    /// Create an unconfigured block with no buffers bound.
    pub fn new() -> Self {
        Self {
            config: None,
            state: BlockState::Idle,
            done: false,
            planner: FftPlanner::new(),
            plan: None,
            scratch: Vec::new(),
            input_buffer: None,
            output_buffer: None,
            input_data: Vec::new(),
            result: None,
            done_reg: None,
            status_reg: None,
        }
    }

    /// Bind the input and output staging buffers.
    ///
    /// A bound input buffer takes precedence over raw input loaded with
    /// [`FftBlock::load_input`] and is consumed with sliding-window
    /// semantics; a bound output buffer receives each committed result.
    pub fn bind_buffers(&mut self, input: SharedBuffer, output: SharedBuffer) {
        self.input_buffer = Some(input);
        self.output_buffer = Some(output);
    }

    /// Attach the bypass handles for `FFT_DONE` and `FFT_STATUS`, posting
    /// the current state through them immediately.
    pub fn attach_registers(&mut self, done: RegisterHandle, status: RegisterHandle) {
        self.done_reg = Some(done);
        self.status_reg = Some(status);
        self.post_done();
        self.post_status();
    }

    /// Stage raw input samples, used when no input buffer is bound.
    ///
    /// Unlike a bound buffer, raw input is not consumed by a run.
    pub fn load_input(&mut self, samples: &[Complex64]) {
        self.input_data = samples.to_vec();
    }

    /// Decode, validate, and adopt a configuration word.
    ///
    /// On success the new configuration replaces the old one wholesale and
    /// the transform plan for the new length is prepared; on failure the
    /// previous configuration stays in force untouched.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `word` exceeds 32 bits, `InvalidSize` /
    /// `ReservedBitsSet` per [`FftConfig::decode`].
    pub fn configure(&mut self, word: u64) -> Result<()> {
        let word = u32::try_from(word).map_err(|_| DspError::InvalidConfig { word })?;
        let config = FftConfig::decode(word)?;

        let plan = self.planner.plan_fft_forward(config.fft_size());
        self.scratch = vec![Complex64::default(); plan.get_inplace_scratch_len()];
        self.plan = Some(plan);
        self.config = Some(config);
        self.set_state(BlockState::Configured);
        debug!(
            fft_size = config.fft_size(),
            padding = ?config.padding(),
            normalize = config.normalize(),
            "configuration adopted"
        );
        Ok(())
    }

    /// Execute one pipeline pass.
    ///
    /// In skip mode a short input aborts silently: no output, no state
    /// change, `done` untouched. Every other mode either produces a
    /// committed result with `done = 1` or fails without touching state.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when no valid configuration is loaded,
    /// `InsufficientSamples` in strict mode with a short input, and buffer
    /// errors from the commit stage.
    pub fn run(&mut self) -> Result<()> {
        let config = self.config.ok_or(DspError::NotConfigured)?;
        let plan = self.plan.clone().ok_or(DspError::NotConfigured)?;

        let Some(samples) = self.acquire(config)? else {
            debug!("input below transform length, run skipped");
            return Ok(());
        };

        self.set_state(BlockState::Running);
        self.done = false;
        self.post_done();

        let mut samples = self.window(samples);
        plan.process_with_scratch(&mut samples, &mut self.scratch);

        if config.normalize() {
            let scale = 1.0 / (config.fft_size() as f64).sqrt();
            for sample in &mut samples {
                *sample *= scale;
            }
        }

        let rotation = Complex64::from_polar(1.0, config.signed_phase());
        for sample in &mut samples {
            *sample *= rotation;
        }

        if let Some(output) = &self.output_buffer {
            output.borrow_mut().write(&samples)?;
        } else {
            self.result = Some(samples);
        }

        self.done = true;
        self.post_done();
        self.set_state(BlockState::Configured);
        info!(fft_size = config.fft_size(), "transform committed");
        Ok(())
    }

    /// Clear the done flag and any internal result; the configuration stays.
    pub fn reset(&mut self) {
        self.done = false;
        self.result = None;
        self.post_done();
        self.set_state(if self.config.is_some() {
            BlockState::Configured
        } else {
            BlockState::Idle
        });
    }

    /// The committed result: output-buffer contents if one is bound (empty
    /// buffer reads as `None`), otherwise the internal result slot.
    pub fn output(&self) -> Option<Vec<Complex64>> {
        match &self.output_buffer {
            Some(buffer) => {
                let buffer = buffer.borrow();
                if buffer.is_empty() {
                    None
                } else {
                    Some(buffer.samples().to_vec())
                }
            }
            None => self.result.clone(),
        }
    }

    /// Done flag — set after each successful run, cleared by the next run
    /// or [`FftBlock::reset`].
    pub const fn done(&self) -> bool {
        self.done
    }

    /// Current state.
    pub const fn state(&self) -> BlockState {
        self.state
    }

    /// Active configuration, if any.
    pub const fn config(&self) -> Option<FftConfig> {
        self.config
    }

    /// Configured transform length, if any.
    pub fn fft_size(&self) -> Option<usize> {
        self.config.map(FftConfig::fft_size)
    }

    /// Acquire exactly `fft_size` samples per the padding policy.
    ///
    /// `Ok(None)` is the skip-mode silent abort. When the source is a bound
    /// buffer, the buffer is reset and refilled with whatever remained
    /// beyond the consumed window.
    fn acquire(&mut self, config: FftConfig) -> Result<Option<Vec<Complex64>>> {
        let n = config.fft_size();
        let mut samples: Vec<Complex64> = match &self.input_buffer {
            Some(buffer) => buffer.borrow().samples().to_vec(),
            None => self.input_data.clone(),
        };

        if samples.len() < n {
            let shortfall = n - samples.len();
            match config.padding() {
                PaddingMode::Strict => {
                    return Err(DspError::InsufficientSamples {
                        needed: n,
                        available: samples.len(),
                    });
                }
                PaddingMode::Skip => return Ok(None),
                PaddingMode::PadFront => {
                    let mut padded = vec![Complex64::default(); shortfall];
                    padded.extend_from_slice(&samples);
                    samples = padded;
                }
                PaddingMode::PadBack => {
                    samples.resize(n, Complex64::default());
                }
            }
        }

        let remainder = samples.split_off(n);
        if let Some(buffer) = &self.input_buffer {
            let mut buffer = buffer.borrow_mut();
            buffer.clear();
            buffer.write(&remainder)?;
        }
        Ok(Some(samples))
    }

    /// Rectangular window — the identity. Seam for future window functions.
    #[allow(clippy::unused_self)]
    fn window(&self, samples: Vec<Complex64>) -> Vec<Complex64> {
        samples
    }

    fn set_state(&mut self, state: BlockState) {
        self.state = state;
        self.post_status();
    }

    fn post_done(&self) {
        if let Some(reg) = &self.done_reg {
            reg.post(u64::from(self.done));
        }
    }

    fn post_status(&self) {
        if let Some(reg) = &self.status_reg {
            reg.post(self.state.status_bits());
        }
    }
}

impl Default for FftBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FftBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftBlock")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("done", &self.done)
            .finish()
    }
}

impl Peripheral for FftBlock {
    type Port = FftPort;

    fn resolve(&self, register: &str) -> Option<FftPort> {
        match register {
            regs::FFT_START => Some(FftPort::Start),
            regs::FFT_CONFIG => Some(FftPort::Config),
            _ => None,
        }
    }

    fn handle(&mut self, port: FftPort, value: u64) -> std::result::Result<(), PeripheralError> {
        match port {
            FftPort::Start => {
                if value == 1 {
                    self.run()?;
                }
                Ok(())
            }
            FftPort::Config => {
                self.configure(value)?;
                Ok(())
            }
        }
    }
}
