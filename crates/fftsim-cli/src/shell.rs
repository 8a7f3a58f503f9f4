//! Interactive register shell
//!
//! Line-oriented control loop over the assembled simulator: named register
//! reads and writes, a full register dump, the `run_fft` convenience, and
//! a classifier trigger.

use crate::system::System;
use anyhow::Result;
use fftsim_models::{regs as cls_regs, SignalClass};
use fftsim_regmap::RegMapError;
use std::io::{self, BufRead, Write};

/// Run the shell until `exit` or end of input.
pub fn run(sys: &mut System) -> Result<()> {
    println!("--- FFT Block Control ---");
    print_help();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("fftsim> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            [] => {}
            ["set_reg", name, value] => match parse_value(value) {
                Some(value) => set_reg(sys, name, value),
                None => println!("Could not parse value: {value}"),
            },
            ["get_reg", name] => get_reg(sys, name),
            ["dump_reg"] => dump_reg(sys),
            ["run_fft"] => {
                if let Err(e) = sys.run_fft_flow() {
                    println!("Error: {e:#}");
                } else {
                    print_spectrum(sys);
                }
            }
            ["classify"] => classify(sys),
            ["help"] => print_help(),
            ["exit"] | ["quit"] => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
    Ok(())
}

fn print_help() {
    println!("  set_reg <name> <value>   write a register (decimal or 0x hex)");
    println!("  get_reg <name>           read a register");
    println!("  dump_reg                 list all registers and values");
    println!("  run_fft                  run the FFT flow (defaults applied if unconfigured)");
    println!("  classify                 trigger the classifier on the FFT output");
    println!("  help                     show this help");
    println!("  exit                     leave the shell");
}

fn parse_value(text: &str) -> Option<u64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        text.parse().ok()
    }
}

fn set_reg(sys: &mut System, name: &str, value: u64) {
    let outcome = if sys.fft_map.contains(name) {
        sys.fft_map.write(name, value)
    } else if let Some(map) = sys.cls_map.as_mut().filter(|m| m.contains(name)) {
        map.write(name, value)
    } else {
        Err(RegMapError::unknown(name))
    };
    match outcome {
        Ok(()) => println!("Written {value} to {name}"),
        Err(e) => println!("Error: {:#}", anyhow::Error::new(e)),
    }
}

fn get_reg(sys: &System, name: &str) {
    let outcome = if sys.fft_map.contains(name) {
        sys.fft_map.read(name)
    } else if let Some(map) = sys.cls_map.as_ref().filter(|m| m.contains(name)) {
        map.read(name)
    } else {
        Err(RegMapError::unknown(name))
    };
    match outcome {
        Ok(value) => println!("Value of {name}: {value}"),
        Err(e) => println!("Error: {:#}", anyhow::Error::new(e)),
    }
}

fn dump_reg(sys: &System) {
    println!("Register map:");
    for entry in sys.fft_map.entries() {
        println!(
            "  {:13} {:#06x}  {}B  {:11} {:#x}",
            entry.name(),
            entry.address(),
            entry.size(),
            entry.access().to_string(),
            entry.value()
        );
    }
    if let Some(map) = &sys.cls_map {
        for entry in map.entries() {
            println!(
                "  {:13} {:#06x}  {}B  {:11} {:#x}",
                entry.name(),
                entry.address(),
                entry.size(),
                entry.access().to_string(),
                entry.value()
            );
        }
    }
}

fn classify(sys: &mut System) {
    let Some(map) = sys.cls_map.as_mut() else {
        println!("No classifier model loaded (start with --model <path>).");
        return;
    };
    if let Err(e) = map.write(cls_regs::CLASSIFY_TRIGGER, 1) {
        println!("Error: {:#}", anyhow::Error::new(e));
        return;
    }
    match (
        map.read(cls_regs::CLASSIFY_DONE),
        map.read(cls_regs::CLASSIFY_RESULT),
    ) {
        (Ok(1), Ok(label)) => {
            let name = u8::try_from(label)
                .ok()
                .and_then(SignalClass::from_label)
                .map_or("unknown", SignalClass::name);
            println!("Classifier result: {label} ({name})");
        }
        (Ok(_), _) => println!("Classifier did not complete (is the FFT output empty?)."),
        (Err(e), _) | (_, Err(e)) => println!("Error: {:#}", anyhow::Error::new(e)),
    }
}

fn print_spectrum(sys: &System) {
    let output = sys.output.borrow();
    if output.is_empty() {
        println!("Output buffer is empty.");
        return;
    }
    println!("FFT output magnitudes ({} bins):", output.len());
    for (bin, sample) in output.samples().iter().enumerate() {
        println!("  {bin:4}  {:12.6}", sample.norm());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex_values() {
        assert_eq!(parse_value("42"), Some(42));
        assert_eq!(parse_value("0x2A"), Some(42));
        assert_eq!(parse_value("0X2a"), Some(42));
        assert_eq!(parse_value("nope"), None);
    }
}
