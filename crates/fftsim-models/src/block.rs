//! Classifier peripheral
//!
//! Binds to the FFT block's output buffer, and on its trigger register
//! reads the transform magnitudes, runs model inference, and posts the
//! label and a done bit through the bypass handles granted at bind time.

use crate::error::Result;
use crate::model::{SignalClass, ToneClassifier};
use crate::regs;
use fftsim_dsp::SharedBuffer;
use fftsim_regmap::{Peripheral, PeripheralError, RegisterHandle};
use tracing::{info, warn};

/// Register ports the classifier handles directly.
#[derive(Debug, Clone, Copy)]
pub enum ClassifierPort {
    /// `CLASSIFY_TRIGGER` — value 1 runs inference
    Trigger,
}

/// The classifier peripheral.
#[derive(Debug)]
pub struct ClassifierBlock {
    model: ToneClassifier,
    input: Option<SharedBuffer>,
    result_reg: Option<RegisterHandle>,
    done_reg: Option<RegisterHandle>,
}

impl ClassifierBlock {
    /// Wrap a trained model; no buffer bound yet.
    pub fn new(model: ToneClassifier) -> Self {
        Self {
            model,
            input: None,
            result_reg: None,
            done_reg: None,
        }
    }

    /// Bind the buffer to classify — normally the FFT block's output.
    pub fn bind_input(&mut self, buffer: SharedBuffer) {
        self.input = Some(buffer);
    }

    /// Attach the bypass handles for `CLASSIFY_RESULT` and `CLASSIFY_DONE`.
    pub fn attach_registers(&mut self, result: RegisterHandle, done: RegisterHandle) {
        self.result_reg = Some(result);
        self.done_reg = Some(done);
    }

    /// The wrapped model.
    pub const fn model(&self) -> &ToneClassifier {
        &self.model
    }

    /// Run inference over the bound buffer's magnitudes.
    ///
    /// Returns `None` without posting anything when no buffer is bound or
    /// the buffer is empty — there is nothing to classify, which is not an
    /// error at the register level.
    ///
    /// # Errors
    ///
    /// `FeatureLength` when the buffer length differs from the model's
    /// trained feature length.
    pub fn classify(&mut self) -> Result<Option<SignalClass>> {
        let Some(buffer) = &self.input else {
            warn!("classifier triggered with no input buffer bound");
            return Ok(None);
        };

        let magnitudes: Vec<f64> = {
            let buffer = buffer.borrow();
            if buffer.is_empty() {
                warn!("classifier triggered with an empty input buffer");
                return Ok(None);
            }
            buffer.samples().iter().map(|s| s.norm()).collect()
        };

        let class = self.model.predict(&magnitudes)?;
        if let Some(reg) = &self.result_reg {
            reg.post(u64::from(class.label()));
        }
        if let Some(reg) = &self.done_reg {
            reg.post(1);
        }
        info!(class = class.name(), "classification posted");
        Ok(Some(class))
    }
}

impl Peripheral for ClassifierBlock {
    type Port = ClassifierPort;

    fn resolve(&self, register: &str) -> Option<ClassifierPort> {
        (register == regs::CLASSIFY_TRIGGER).then_some(ClassifierPort::Trigger)
    }

    fn handle(
        &mut self,
        port: ClassifierPort,
        value: u64,
    ) -> std::result::Result<(), PeripheralError> {
        match port {
            ClassifierPort::Trigger => {
                if value == 1 {
                    self.classify()?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fftsim_dsp::SampleBuffer;
    use num_complex::Complex64;

    fn toy_model() -> ToneClassifier {
        // Idealised 8-bin centroids, built through the public fit API.
        let features = vec![
            vec![9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            vec![0.0, 6.0, 0.0, 6.0, 0.0, 0.0, 0.0, 0.0],
            vec![1.0, 1.1, 0.9, 1.0, 1.2, 0.8, 1.0, 1.1],
        ];
        let labels = vec![
            SignalClass::SingleTone,
            SignalClass::TwoTones,
            SignalClass::Noise,
        ];
        ToneClassifier::fit(&features, &labels).unwrap()
    }

    #[test]
    fn empty_buffer_classifies_nothing() {
        let buffer = SampleBuffer::shared(8, 8).unwrap();
        let mut block = ClassifierBlock::new(toy_model());
        block.bind_input(buffer);
        assert_eq!(block.classify().unwrap(), None);
    }

    #[test]
    fn no_buffer_classifies_nothing() {
        let mut block = ClassifierBlock::new(toy_model());
        assert_eq!(block.classify().unwrap(), None);
    }

    #[test]
    fn dominant_bin_classified_as_single_tone() {
        let buffer = SampleBuffer::shared(8, 8).unwrap();
        let mut spectrum = vec![Complex64::default(); 8];
        spectrum[3] = Complex64::new(0.0, 8.0);
        buffer.borrow_mut().write(&spectrum).unwrap();

        let mut block = ClassifierBlock::new(toy_model());
        block.bind_input(buffer);
        assert_eq!(block.classify().unwrap(), Some(SignalClass::SingleTone));
    }

    #[test]
    fn trigger_value_other_than_one_is_ignored() {
        let buffer = SampleBuffer::shared(8, 8).unwrap();
        let mut block = ClassifierBlock::new(toy_model());
        block.bind_input(buffer);
        block.handle(ClassifierPort::Trigger, 0).unwrap();
        block.handle(ClassifierPort::Trigger, 2).unwrap();
    }
}
