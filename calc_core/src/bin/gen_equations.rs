//! Generate EQUATIONS.md from the equation registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-equations
//! cargo run --bin gen-equations -- docs/EQUATIONS.md
//! ```
//!
//! Without an argument the file is written to
//! `calc_core/src/equations/EQUATIONS.md` (relative to the workspace root).

use std::fs;
use std::path::PathBuf;

use calc_core::equations::{generate_equations_markdown, ALL_EQUATIONS};

const DEFAULT_OUTPUT: &str = "calc_core/src/equations/EQUATIONS.md";

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    println!("Generating EQUATIONS.md ({} equations)...", ALL_EQUATIONS.len());

    let markdown = generate_equations_markdown();

    match fs::write(&output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            std::process::exit(1);
        }
    }
}
