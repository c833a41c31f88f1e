//! Layers command implementation.
//!
//! Segment a circuit and show each layer's operations and context sizes.

use anyhow::{Context, Result};
use console::style;

use natgrad_ir::Circuit;
use natgrad_qng::{LayerSummary, segment};

use super::common::{load_circuit, print_loaded};

/// Execute the layers command.
pub fn execute(input: &str, format: &str) -> Result<()> {
    let circuit = load_circuit(input)?;
    let layers = segment(&circuit).context("Segmentation failed")?;
    let summaries: Vec<LayerSummary> = layers
        .iter()
        .enumerate()
        .map(|(i, layer)| layer.summary(i))
        .collect();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&summaries)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        _ => {
            print_loaded(&circuit);
            print_layers(&circuit, &summaries);
        }
    }

    Ok(())
}

fn print_layers(circuit: &Circuit, summaries: &[LayerSummary]) {
    println!(
        "\n{} {} layers:",
        style("✓").green().bold(),
        summaries.len()
    );

    for summary in summaries {
        let variables: Vec<&str> = summary
            .param_indices
            .iter()
            .map(|&i| circuit.variables()[i].as_str())
            .collect();
        let qubits: Vec<String> = summary.block_qubits.iter().map(|q| format!("q{q}")).collect();

        println!(
            "\n  {} {}  params [{}]  qubits [{}]  pre {}  post {}",
            style("Layer").bold(),
            style(summary.index).cyan(),
            style(variables.join(", ")).yellow(),
            qubits.join(", "),
            summary.num_pre_ops,
            summary.num_post_ops
        );
        for op in &summary.ops {
            println!("    {op}");
        }
    }
}
