//! Synthetic test signals
//!
//! Small generators used by the CLI's run convenience and the test suites.
//! Dataset-scale generation (mixed tones, noise) lives with the classifier
//! tooling in `fftsim-models`.

use num_complex::Complex64;
use std::f64::consts::TAU;

/// Complex sinusoid of unit amplitude at `frequency_bin` cycles per window.
///
/// `x[n] = exp(i·2π·bin·n / fft_size)` — with an integer bin this lands all
/// signal energy in a single FFT bin; fractional bins leak as expected.
pub fn single_tone(frequency_bin: f64, fft_size: usize) -> Vec<Complex64> {
    (0..fft_size)
        .map(|n| Complex64::from_polar(1.0, TAU * frequency_bin * n as f64 / fft_size as f64))
        .collect()
}
