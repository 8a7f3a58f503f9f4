//! Simulator assembly and the `run_fft` convenience flow
//!
//! Builds the whole simulated system — FFT register map, FFT block,
//! staging buffers, and (when a model file is given) the classifier with
//! its own map bound to the FFT output buffer — and owns the documented
//! defaulting behavior of the `run_fft` command.

use anyhow::{Context, Result};
use fftsim_dsp::{
    fft_register_map, fft_size_for_code, regs as fft_regs, signal, FftBlock, FftConfig,
    PaddingMode, PhaseSign, SampleBuffer, SharedBuffer,
};
use fftsim_models::{classifier_register_map, regs as cls_regs, ClassifierBlock, ToneClassifier};
use fftsim_regmap::RegisterMap;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing::info;

/// Default configuration applied by `run_fft` when `FFT_CONFIG` is zero:
/// 64-point transform (size code 5), strict padding, normalization on,
/// zero phase, positive rotation.
pub fn default_config() -> FftConfig {
    // The fixed field set cannot fail validation.
    FftConfig::new(5, PaddingMode::Strict, 0, PhaseSign::Positive, true)
        .expect("default configuration is valid")
}

/// Frequency bin of the synthetic tone `run_fft` loads.
pub const DEFAULT_TONE_BIN: f64 = 5.0;

/// The assembled simulator.
pub struct System {
    /// FFT peripheral register map.
    pub fft_map: RegisterMap<FftBlock>,
    /// Classifier register map, present when a model was loaded.
    pub cls_map: Option<RegisterMap<ClassifierBlock>>,
    /// FFT input staging buffer.
    pub input: SharedBuffer,
    /// FFT output staging buffer (classifier input).
    pub output: SharedBuffer,
}

impl std::fmt::Debug for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
            .field("has_classifier", &self.cls_map.is_some())
            .field("input", &self.input)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl System {
    /// Wire up the simulator.
    ///
    /// `model` optionally points at a `.tcm` classifier model; without it
    /// the classifier peripheral (and its register map) is absent.
    pub fn new(buffer_capacity: usize, model: Option<&Path>) -> Result<Self> {
        let mut fft_map = fft_register_map()?;
        let input = SampleBuffer::shared(buffer_capacity, buffer_capacity)?;
        let output = SampleBuffer::shared(buffer_capacity, buffer_capacity)?;

        let fft = Rc::new(RefCell::new(FftBlock::new()));
        fft.borrow_mut().bind_buffers(input.clone(), output.clone());
        fft_map.bind(fft_regs::FFT_START, &fft)?;
        fft_map.bind(fft_regs::FFT_CONFIG, &fft)?;
        let done = fft_map.bind(fft_regs::FFT_DONE, &fft)?;
        let status = fft_map.bind(fft_regs::FFT_STATUS, &fft)?;
        fft.borrow_mut().attach_registers(done, status);

        let cls_map = match model {
            Some(path) => {
                let model = ToneClassifier::from_file(path)
                    .with_context(|| format!("loading classifier model {}", path.display()))?;
                info!(path = %path.display(), "classifier model loaded");

                let mut map = classifier_register_map()?;
                let classifier = Rc::new(RefCell::new(ClassifierBlock::new(model)));
                classifier.borrow_mut().bind_input(output.clone());
                map.bind(cls_regs::CLASSIFY_TRIGGER, &classifier)?;
                let result = map.bind(cls_regs::CLASSIFY_RESULT, &classifier)?;
                let cls_done = map.bind(cls_regs::CLASSIFY_DONE, &classifier)?;
                classifier.borrow_mut().attach_registers(result, cls_done);
                Some(map)
            }
            None => None,
        };

        Ok(Self {
            fft_map,
            cls_map,
            input,
            output,
        })
    }

    /// The `run_fft` convenience: apply the documented default config when
    /// none is set, load a synthetic single tone, and trigger the run.
    pub fn run_fft_flow(&mut self) -> Result<()> {
        let mut config_value = self.fft_map.read(fft_regs::FFT_CONFIG)?;
        if config_value == 0 {
            println!("No FFT_CONFIG set. Applying default configuration...");
            config_value = u64::from(default_config().encode());
            self.fft_map.write(fft_regs::FFT_CONFIG, config_value)?;
        } else {
            println!("Using existing FFT_CONFIG: {config_value:#010x}");
        }

        let size_code = (config_value & 0xF) as u8;
        let fft_size = match fft_size_for_code(size_code) {
            Some(size) => size,
            None => {
                println!("Unknown FFT size code. Defaulting to 64.");
                64
            }
        };

        let tone = signal::single_tone(DEFAULT_TONE_BIN, fft_size);
        self.input.borrow_mut().write(&tone)?;

        self.fft_map.write(fft_regs::FFT_START, 1)?;
        println!("FFT triggered.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flow_applies_default_config_when_unset() {
        let mut sys = System::new(4096, None).unwrap();
        sys.run_fft_flow().unwrap();

        let config = sys.fft_map.read(fft_regs::FFT_CONFIG).unwrap();
        assert_eq!(config, u64::from(default_config().encode()));
        assert_eq!(sys.fft_map.read(fft_regs::FFT_DONE).unwrap(), 1);
        assert_eq!(sys.output.borrow().len(), 64);
    }

    #[test]
    fn run_flow_respects_existing_config() {
        let mut sys = System::new(4096, None).unwrap();
        // 128-point transform, pad-back, no normalization
        let word = FftConfig::new(6, PaddingMode::PadBack, 0, PhaseSign::Positive, false)
            .unwrap()
            .encode();
        sys.fft_map
            .write(fft_regs::FFT_CONFIG, u64::from(word))
            .unwrap();

        sys.run_fft_flow().unwrap();
        assert_eq!(
            sys.fft_map.read(fft_regs::FFT_CONFIG).unwrap(),
            u64::from(word),
            "existing config untouched"
        );
        assert_eq!(sys.output.borrow().len(), 128);
    }

    #[test]
    fn default_tone_peaks_at_bin_five() {
        let mut sys = System::new(4096, None).unwrap();
        sys.run_fft_flow().unwrap();

        let output = sys.output.borrow();
        let peak = output
            .samples()
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 5);
    }

    #[test]
    fn missing_model_file_is_an_error() {
        let err = System::new(4096, Some(Path::new("/nonexistent/model.tcm"))).unwrap_err();
        assert!(err.to_string().contains("loading classifier model"));
    }
}
