//! Offline classifier training
//!
//! Generates a synthetic dataset, fits the nearest-centroid model,
//! evaluates it on a held-out split, and writes the `.tcm` model file the
//! simulator loads at startup.
//!
//! ## Usage
//!
//! ```bash
//! # Defaults: 1000 samples, 64-point FFT, noise ratio 0.33, seed 42
//! train
//!
//! # Customised run
//! train --samples 5000 --fft-size 128 --noise-ratio 0.25 --seed 7 \
//!       --out models/tone_classifier.tcm
//! ```

use fftsim_models::{generate_dataset, SignalClass, ToneClassifier, DEFAULT_NOISE_RATIO};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber");

    if let Err(e) = run() {
        error!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> fftsim_models::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut samples = 1000usize;
    let mut fft_size = 64usize;
    let mut noise_ratio = DEFAULT_NOISE_RATIO;
    let mut seed = 42u64;
    let mut out = "tone_classifier.tcm".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--samples" | "-n" => {
                i += 1;
                if let Some(v) = args.get(i).and_then(|v| v.parse().ok()) {
                    samples = v;
                }
            }
            "--fft-size" | "-f" => {
                i += 1;
                if let Some(v) = args.get(i).and_then(|v| v.parse().ok()) {
                    fft_size = v;
                }
            }
            "--noise-ratio" | "-r" => {
                i += 1;
                if let Some(v) = args.get(i).and_then(|v| v.parse().ok()) {
                    noise_ratio = v;
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if let Some(v) = args.get(i).and_then(|v| v.parse().ok()) {
                    seed = v;
                }
            }
            "--out" | "-o" => {
                i += 1;
                if let Some(v) = args.get(i) {
                    out = v.clone();
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                error!("Unknown option: {other}");
                print_help();
                return Ok(());
            }
        }
        i += 1;
    }

    info!("Generating {samples} samples ({fft_size}-point FFT, noise ratio {noise_ratio})");
    let mut rng = StdRng::seed_from_u64(seed);
    let set = generate_dataset(samples, fft_size, noise_ratio, &mut rng);
    let counts = set.class_counts();
    info!(
        "Label distribution: single-tone {} / two-tones {} / noise {}",
        counts[0], counts[1], counts[2]
    );

    let (train, test) = set.split(0.7);
    let model = ToneClassifier::fit(&train.features, &train.labels)?;

    let mut correct = 0usize;
    let mut per_class_total = [0usize; 3];
    let mut per_class_correct = [0usize; 3];
    for (spectrum, &label) in test.features.iter().zip(&test.labels) {
        let predicted = model.predict(spectrum)?;
        let row = usize::from(label.label());
        per_class_total[row] += 1;
        if predicted == label {
            correct += 1;
            per_class_correct[row] += 1;
        }
    }

    println!("\nClassification report ({} held-out samples):", test.len());
    for class in SignalClass::ALL {
        let row = usize::from(class.label());
        println!(
            "  {:12} {:4}/{:4}",
            class.name(),
            per_class_correct[row],
            per_class_total[row]
        );
    }
    let accuracy = if test.is_empty() {
        0.0
    } else {
        correct as f64 / test.len() as f64 * 100.0
    };
    println!("  accuracy     {accuracy:.2}%");

    model.to_file(&out)?;
    info!("Model saved to {out}");
    Ok(())
}

fn print_help() {
    println!("train — fit the tone classifier on a synthetic dataset");
    println!();
    println!("OPTIONS:");
    println!("  -n, --samples <N>       dataset size        (default 1000)");
    println!("  -f, --fft-size <N>      transform length    (default 64)");
    println!("  -r, --noise-ratio <F>   noise fraction      (default 0.33)");
    println!("  -s, --seed <N>          RNG seed            (default 42)");
    println!("  -o, --out <PATH>        model file          (default tone_classifier.tcm)");
}
