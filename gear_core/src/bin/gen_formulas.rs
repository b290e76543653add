//! Generate FORMULAS.md from the formula catalog.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-formulas
//! ```
//!
//! The generated file is written to `gear_core/FORMULAS.md`.

use std::fs;
use std::path::Path;

use gear_core::catalog::generate_formulas_markdown;

fn main() {
    println!("Generating FORMULAS.md...");

    let markdown = generate_formulas_markdown();

    // Relative to the workspace root
    let output_path = Path::new("gear_core/FORMULAS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!(
                "Successfully wrote {} bytes to {}",
                markdown.len(),
                output_path.display()
            );
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
