//! Full-system integration: register map + FFT block + buffers
//!
//! Drives the peripheral exactly the way an external caller would — named
//! register writes only — and checks the committed results, the done flag,
//! and the status register after each step.

use fftsim_dsp::{
    fft_register_map, regs, signal, FftBlock, FftConfig, PaddingMode, PhaseSign, SampleBuffer,
    SharedBuffer,
};
use fftsim_regmap::{RegMapError, RegisterMap};
use std::cell::RefCell;
use std::rc::Rc;

struct Harness {
    map: RegisterMap<FftBlock>,
    input: SharedBuffer,
    output: SharedBuffer,
}

fn harness() -> Harness {
    let mut map = fft_register_map().unwrap();
    let input = SampleBuffer::shared(4096, 4096).unwrap();
    let output = SampleBuffer::shared(4096, 4096).unwrap();

    let fft = Rc::new(RefCell::new(FftBlock::new()));
    fft.borrow_mut().bind_buffers(input.clone(), output.clone());
    map.bind(regs::FFT_START, &fft).unwrap();
    map.bind(regs::FFT_CONFIG, &fft).unwrap();
    let done = map.bind(regs::FFT_DONE, &fft).unwrap();
    let status = map.bind(regs::FFT_STATUS, &fft).unwrap();
    fft.borrow_mut().attach_registers(done, status);

    Harness { map, input, output }
}

fn config_word(padding: PaddingMode, normalize: bool) -> u64 {
    u64::from(
        FftConfig::new(5, padding, 0, PhaseSign::Positive, normalize)
            .unwrap()
            .encode(),
    )
}

#[test]
fn end_to_end_tone_through_registers() {
    let mut h = harness();

    assert_eq!(h.map.read(regs::FFT_STATUS).unwrap(), 0, "idle before configure");

    h.map
        .write(regs::FFT_CONFIG, config_word(PaddingMode::Strict, true))
        .unwrap();
    assert_eq!(h.map.read(regs::FFT_STATUS).unwrap(), 1, "configured");

    h.input
        .borrow_mut()
        .write(&signal::single_tone(5.0, 64))
        .unwrap();
    h.map.write(regs::FFT_START, 1).unwrap();

    // Side effects are fully visible once the write has returned.
    assert_eq!(h.map.read(regs::FFT_DONE).unwrap(), 1);
    assert_eq!(h.map.read(regs::FFT_STATUS).unwrap(), 1, "back to configured");

    let out = h.output.borrow();
    assert_eq!(out.len(), 64);
    let magnitudes: Vec<f64> = out.samples().iter().map(|s| s.norm()).collect();
    let peak_bin = magnitudes
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(peak_bin, 5);
    assert!((magnitudes[5] - 8.0).abs() < 1e-9, "peak scaled by 1/√64");
}

#[test]
fn trigger_without_config_fails_through_the_map() {
    let mut h = harness();
    h.input
        .borrow_mut()
        .write(&signal::single_tone(5.0, 64))
        .unwrap();
    let err = h.map.write(regs::FFT_START, 1).unwrap_err();
    assert!(matches!(err, RegMapError::Dispatch { .. }), "no default config assumed");
    assert_eq!(h.map.read(regs::FFT_DONE).unwrap(), 0);
}

#[test]
fn invalid_config_word_fails_dispatch_but_keeps_stored_value() {
    let mut h = harness();
    let bad = 13u64; // unmapped size code
    let err = h.map.write(regs::FFT_CONFIG, bad).unwrap_err();
    assert!(matches!(err, RegMapError::Dispatch { .. }));
    // The raw register write landed before the handler rejected the word.
    assert_eq!(h.map.read(regs::FFT_CONFIG).unwrap(), bad);
    assert_eq!(h.map.read(regs::FFT_STATUS).unwrap(), 0, "block still idle");
}

#[test]
fn strict_mode_shortfall_surfaces_insufficient_samples() {
    let mut h = harness();
    h.map
        .write(regs::FFT_CONFIG, config_word(PaddingMode::Strict, false))
        .unwrap();
    h.input
        .borrow_mut()
        .write(&signal::single_tone(1.0, 3))
        .unwrap();
    let err = h.map.write(regs::FFT_START, 1).unwrap_err();
    let RegMapError::Dispatch { source, .. } = err else {
        panic!("expected dispatch error");
    };
    assert!(source.to_string().contains("insufficient samples"));
}

#[test]
fn skip_mode_shortfall_is_not_an_error() {
    let mut h = harness();
    h.map
        .write(regs::FFT_CONFIG, config_word(PaddingMode::Skip, false))
        .unwrap();
    h.input
        .borrow_mut()
        .write(&signal::single_tone(1.0, 3))
        .unwrap();
    h.map.write(regs::FFT_START, 1).unwrap();
    assert_eq!(h.map.read(regs::FFT_DONE).unwrap(), 0, "done untouched");
    assert!(h.output.borrow().is_empty(), "no output produced");
}

#[test]
fn sliding_window_leaves_remainder_for_next_run() {
    let mut h = harness();
    h.map
        .write(regs::FFT_CONFIG, config_word(PaddingMode::Strict, false))
        .unwrap();
    h.input
        .borrow_mut()
        .write(&signal::single_tone(5.0, 96))
        .unwrap();

    h.map.write(regs::FFT_START, 1).unwrap();
    assert_eq!(h.input.borrow().len(), 32);

    // The 32 leftover samples are short of 64: strict mode now fails.
    let err = h.map.write(regs::FFT_START, 1).unwrap_err();
    assert!(matches!(err, RegMapError::Dispatch { .. }));
}

#[test]
fn done_register_rejects_external_writes() {
    let mut h = harness();
    let err = h.map.write(regs::FFT_DONE, 1).unwrap_err();
    assert!(matches!(err, RegMapError::AccessDenied { .. }));
}

#[test]
fn config_register_rejects_values_beyond_four_bytes() {
    let mut h = harness();
    let err = h.map.write(regs::FFT_CONFIG, 1 << 32).unwrap_err();
    assert!(matches!(err, RegMapError::OutOfRange { .. }));
}

#[test]
fn unknown_register_rejected() {
    let mut h = harness();
    assert!(matches!(
        h.map.read("FFT_NOPE"),
        Err(RegMapError::UnknownRegister { .. })
    ));
    assert!(matches!(
        h.map.write("FFT_NOPE", 1),
        Err(RegMapError::UnknownRegister { .. })
    ));
}

#[test]
fn window_registers_store_without_side_effects() {
    let mut h = harness();
    h.map.write(regs::WINDOW_SIZE, 64).unwrap();
    h.map.write(regs::WINDOW_TYPE, 0).unwrap();
    assert_eq!(h.map.read(regs::WINDOW_SIZE).unwrap(), 64);
    assert_eq!(h.map.read(regs::FFT_STATUS).unwrap(), 0, "block untouched");
}
