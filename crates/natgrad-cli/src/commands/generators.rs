//! Generators command implementation.

use anyhow::{Context, Result};
use console::style;

use natgrad_qng::segment;

use super::common::{load_circuit, print_loaded};

/// Execute the generators command.
pub fn execute(input: &str) -> Result<()> {
    let circuit = load_circuit(input)?;
    let layers = segment(&circuit).context("Segmentation failed")?;
    print_loaded(&circuit);

    for (i, layer) in layers.iter().enumerate() {
        println!("\n  {} {}", style("Layer").bold(), style(i).cyan());
        for ((op, &slot), generator) in layer
            .parameterized_ops()
            .zip(layer.param_indices())
            .zip(layer.generators())
        {
            let variable = &circuit.variables()[slot];
            match generator {
                Some(g) => println!(
                    "    {:<12} {:<8} {}",
                    style(variable).yellow(),
                    op.name(),
                    style(g).green()
                ),
                None => println!(
                    "    {:<12} {:<8} {}",
                    style(variable).yellow(),
                    op.name(),
                    style("no known generator").dim()
                ),
            }
        }
    }

    Ok(())
}
