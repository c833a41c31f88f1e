//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use natgrad_ir::Circuit;

/// Load a circuit from a JSON circuit document.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !ext.is_empty() && !ext.eq_ignore_ascii_case("json") {
        anyhow::bail!("Unsupported circuit format '.{ext}': expected a JSON circuit document");
    }

    Circuit::from_json_file(path_obj).with_context(|| format!("Failed to load circuit: {path}"))
}

/// Print the one-line header shared by every command.
pub fn print_loaded(circuit: &Circuit) {
    println!(
        "{} Loaded {}: {} qubits, {} instructions, {} variables",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        circuit.num_qubits(),
        circuit.num_instructions(),
        circuit.variables().len()
    );
}

/// Check that one value was given per declared variable.
pub fn check_values(circuit: &Circuit, values: &[f64]) -> Result<()> {
    let expected = circuit.variables().len();
    if values.len() != expected {
        anyhow::bail!(
            "Expected {expected} values ({}), got {}",
            circuit.variables().join(", "),
            values.len()
        );
    }
    Ok(())
}
