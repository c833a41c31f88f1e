//! Blocks command implementation.
//!
//! Build the per-layer block circuits a backend would execute to estimate
//! the metric blocks at one point in parameter space.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::info;

use natgrad_ir::CircuitDocument;
use natgrad_qng::{BlockCircuit, QngOptions, QuantumNaturalGradient};

use super::common::{check_values, load_circuit, print_loaded};

/// JSON view of one block circuit.
#[derive(Serialize)]
struct BlockReport {
    layer_index: usize,
    param_indices: Vec<usize>,
    generators: Vec<Option<String>>,
    shots: u32,
    circuit: CircuitDocument,
}

impl From<&BlockCircuit> for BlockReport {
    fn from(block: &BlockCircuit) -> Self {
        Self {
            layer_index: block.layer_index,
            param_indices: block.param_indices.clone(),
            generators: block
                .generators
                .iter()
                .map(|g| g.as_ref().map(ToString::to_string))
                .collect(),
            shots: block.shots,
            circuit: CircuitDocument::from(&block.circuit),
        }
    }
}

/// Execute the blocks command.
pub fn execute(input: &str, values: &[f64], options: Option<&str>, format: &str) -> Result<()> {
    let circuit = load_circuit(input)?;
    check_values(&circuit, values)?;

    let options = match options {
        Some(path) => QngOptions::from_file(path)
            .with_context(|| format!("Failed to load options: {path}"))?,
        None => QngOptions::default(),
    };
    info!(shots = options.shots, measure = options.measure_blocks, "options");

    let qng = QuantumNaturalGradient::new(circuit, options).context("Segmentation failed")?;
    let blocks = qng
        .gradient_executions(values)
        .context("Failed to build block circuits")?;

    match format {
        "json" => {
            let reports: Vec<BlockReport> = blocks.iter().map(BlockReport::from).collect();
            let json = serde_json::to_string_pretty(&reports)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        _ => {
            print_loaded(qng.circuit());
            println!(
                "\n{} {} block circuits ({} shots each):",
                style("✓").green().bold(),
                blocks.len(),
                qng.options().shots
            );
            for block in &blocks {
                let generators: Vec<String> = block
                    .generators
                    .iter()
                    .map(|g| g.map_or_else(|| "?".to_string(), |g| g.to_string()))
                    .collect();
                println!(
                    "  {} {:>3}: {:>4} instructions  params {:?}  generators [{}]",
                    style("Block").bold(),
                    style(block.layer_index).cyan(),
                    block.circuit.num_instructions(),
                    block.param_indices,
                    style(generators.join(", ")).green()
                );
            }
        }
    }

    Ok(())
}
