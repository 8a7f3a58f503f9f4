//! `fftsim` — command-line interface to the FFT accelerator simulator.
//!
//! ```text
//! USAGE:
//!   fftsim [--capacity N] [--model PATH] shell    Interactive register shell
//!   fftsim [--capacity N] [--model PATH] run      One-shot FFT flow with defaults
//! ```
//!
//! With no subcommand the shell starts. `--model` loads a `.tcm` tone
//! classifier (see the `train` binary in `fftsim-models`) and exposes the
//! classifier registers alongside the FFT peripheral's.

mod shell;
mod system;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fftsim_models::{regs as cls_regs, SignalClass};
use std::path::PathBuf;
use system::System;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fftsim", about = "Register-driven FFT accelerator simulator", version)]
struct Cli {
    /// Capacity of the input and output staging buffers, in samples.
    #[arg(long, default_value_t = 4096)]
    capacity: usize,

    /// Path to a trained classifier model (.tcm).
    #[arg(long)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Start the interactive register shell (default).
    Shell,
    /// Run the FFT flow once and print the magnitude spectrum.
    Run,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut sys = System::new(cli.capacity, cli.model.as_deref())?;

    match cli.command.unwrap_or(Cmd::Shell) {
        Cmd::Shell => shell::run(&mut sys)?,
        Cmd::Run => cmd_run(&mut sys)?,
    }
    Ok(())
}

fn cmd_run(sys: &mut System) -> Result<()> {
    sys.run_fft_flow()?;

    let output = sys.output.borrow();
    println!("FFT output magnitudes ({} bins):", output.len());
    for (bin, sample) in output.samples().iter().enumerate() {
        println!("  {bin:4}  {:12.6}", sample.norm());
    }
    drop(output);

    if let Some(map) = sys.cls_map.as_mut() {
        map.write(cls_regs::CLASSIFY_TRIGGER, 1)?;
        let label = map.read(cls_regs::CLASSIFY_RESULT)?;
        let name = u8::try_from(label)
            .ok()
            .and_then(SignalClass::from_label)
            .map_or("unknown", SignalClass::name);
        println!("Classifier result: {label} ({name})");
    }
    Ok(())
}
