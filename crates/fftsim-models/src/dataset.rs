//! Synthetic dataset generation for the tone classifier
//!
//! Per sample: broadband noise with probability `noise_ratio`, otherwise
//! one or two unit-amplitude tones at distinct random bins with random
//! phase. Features are the magnitude spectra of the signals; labels follow
//! the [`SignalClass`] register encoding.

use crate::model::SignalClass;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use rustfft::FftPlanner;
use std::f64::consts::{FRAC_1_SQRT_2, TAU};

/// Fraction of samples drawn as noise by default.
pub const DEFAULT_NOISE_RATIO: f64 = 0.33;

/// A labelled set of magnitude spectra.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Magnitude spectra, one row per sample.
    pub features: Vec<Vec<f64>>,
    /// Class labels, parallel to `features`.
    pub labels: Vec<SignalClass>,
}

impl Dataset {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the set holds no samples.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sample count per class, in label order.
    pub fn class_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for label in &self.labels {
            counts[usize::from(label.label())] += 1;
        }
        counts
    }

    /// Split into a training head and a test tail at `train_fraction`.
    pub fn split(&self, train_fraction: f64) -> (Dataset, Dataset) {
        let cut = ((self.len() as f64) * train_fraction).round() as usize;
        let cut = cut.min(self.len());
        (
            Dataset {
                features: self.features[..cut].to_vec(),
                labels: self.labels[..cut].to_vec(),
            },
            Dataset {
                features: self.features[cut..].to_vec(),
                labels: self.labels[cut..].to_vec(),
            },
        )
    }
}

/// One or two unit tones at distinct random bins, each with random phase.
pub fn mixed_tones(tone_count: usize, fft_size: usize, rng: &mut impl Rng) -> Vec<Complex64> {
    let mut bins: Vec<usize> = Vec::with_capacity(tone_count);
    while bins.len() < tone_count {
        let bin = rng.gen_range(0..fft_size);
        if !bins.contains(&bin) {
            bins.push(bin);
        }
    }

    let mut signal = vec![Complex64::default(); fft_size];
    for bin in bins {
        let phase = rng.gen_range(0.0..TAU);
        for (n, sample) in signal.iter_mut().enumerate() {
            *sample += Complex64::from_polar(
                1.0,
                TAU * bin as f64 * n as f64 / fft_size as f64 + phase,
            );
        }
    }
    signal
}

/// Unit-variance complex Gaussian noise.
pub fn noise(fft_size: usize, rng: &mut impl Rng) -> Vec<Complex64> {
    let normal = Normal::new(0.0, 1.0).expect("valid normal parameters");
    (0..fft_size)
        .map(|_| {
            Complex64::new(
                normal.sample(rng) * FRAC_1_SQRT_2,
                normal.sample(rng) * FRAC_1_SQRT_2,
            )
        })
        .collect()
}

/// Generate `num_samples` labelled magnitude spectra.
pub fn generate_dataset(
    num_samples: usize,
    fft_size: usize,
    noise_ratio: f64,
    rng: &mut StdRng,
) -> Dataset {
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    let mut scratch = vec![Complex64::default(); fft.get_inplace_scratch_len()];

    let mut features = Vec::with_capacity(num_samples);
    let mut labels = Vec::with_capacity(num_samples);

    for _ in 0..num_samples {
        let (mut signal, label) = if rng.gen::<f64>() < noise_ratio {
            (noise(fft_size, rng), SignalClass::Noise)
        } else {
            let tone_count = rng.gen_range(1..=2);
            let label = if tone_count == 1 {
                SignalClass::SingleTone
            } else {
                SignalClass::TwoTones
            };
            (mixed_tones(tone_count, fft_size, rng), label)
        };

        fft.process_with_scratch(&mut signal, &mut scratch);
        features.push(signal.iter().map(|s| s.norm()).collect());
        labels.push(label);
    }

    Dataset { features, labels }
}
