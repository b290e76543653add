//! # Gearhead CLI
//!
//! Terminal front end for the Gearhead calculation engine. Runs a small
//! interactive demo against `gear_core`; the full calculator catalog is
//! reachable through the same `evaluate` entry point the web pages use.

use std::io::{self, BufRead, Write};

use gear_core::calculations::evaluate;
use gear_core::catalog::FormulaKind;
use gear_core::validate::{inputs, RawValue};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn print_envelope(envelope: &gear_core::ResultEnvelope) {
    match &envelope.result {
        Some(result) => {
            println!(
                "  Result: {:.*} {}",
                result.precision as usize,
                result.display_value(),
                result.unit
            );
            if let Some(category) = &result.category {
                println!("  Class:  {}", category);
            }
            for derived in &result.derived {
                println!(
                    "    {} = {:.*} {}",
                    derived.label,
                    derived.precision as usize,
                    derived.display_value(),
                    derived.unit
                );
            }
        }
        None => {
            println!(
                "  Error: {}",
                envelope.error.as_deref().unwrap_or("unknown failure")
            );
        }
    }
    for warning in &envelope.warnings {
        println!("  ⚠ {}", warning.message);
    }
    for recommendation in &envelope.recommendations {
        println!("  → {}", recommendation.message);
    }
}

fn main() {
    println!("Gearhead CLI - Automotive Calculators");
    println!("=====================================");
    println!();

    // --- Engine displacement ---
    println!("Engine displacement:");
    let bore = prompt_f64("  Bore (in) [4.00]: ", 4.0);
    let stroke = prompt_f64("  Stroke (in) [3.48]: ", 3.48);
    let cylinders = prompt_f64("  Cylinders [8]: ", 8.0);

    let raw = inputs([
        ("bore_in", RawValue::Number(bore)),
        ("stroke_in", RawValue::Number(stroke)),
        ("cylinders", RawValue::Number(cylinders)),
    ]);
    let envelope = evaluate(FormulaKind::EngineDisplacement, &raw);
    print_envelope(&envelope);
    println!();

    // --- Torque to horsepower ---
    println!("Torque to horsepower:");
    let torque = prompt_f64("  Torque (lb-ft) [400]: ", 400.0);
    let rpm = prompt_f64("  RPM [5252]: ", 5252.0);

    let raw = inputs([
        ("torque_lbft", RawValue::Number(torque)),
        ("rpm", RawValue::Number(rpm)),
    ]);
    let envelope = evaluate(FormulaKind::TorqueHorsepower, &raw);
    print_envelope(&envelope);
    println!();

    // --- Supercharger boost ---
    println!("Supercharger boost:");
    let base_hp = prompt_f64("  Base HP [300]: ", 300.0);
    let boost = prompt_f64("  Boost (psi) [10]: ", 10.0);

    let raw = inputs([
        ("base_hp", RawValue::Number(base_hp)),
        ("boost_psi", RawValue::Number(boost)),
    ]);
    let envelope = evaluate(FormulaKind::SuperchargerBoost, &raw);
    print_envelope(&envelope);
    println!();

    println!("Envelope JSON for the last calculation:");
    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("serialization error: {}", e),
    }
}
