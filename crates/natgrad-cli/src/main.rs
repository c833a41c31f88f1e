//! natgrad command-line interface
//!
//! Inspect how a parameterized circuit splits into natural-gradient layers,
//! which Pauli generators its rotations carry, and which block circuits a
//! backend would be asked to run.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{blocks, generators, layers};

/// natgrad - layering for the block-diagonal quantum natural gradient
#[derive(Parser)]
#[command(name = "natgrad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a circuit and print its layers
    Layers {
        /// Input circuit (JSON)
        #[arg(short, long)]
        input: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List the generators of every variable-bound rotation
    Generators {
        /// Input circuit (JSON)
        #[arg(short, long)]
        input: String,
    },

    /// Build the block circuits for one point in parameter space
    Blocks {
        /// Input circuit (JSON)
        #[arg(short, long)]
        input: String,

        /// Variable values in declaration order, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        values: Vec<f64>,

        /// Strategy options (YAML)
        #[arg(long)]
        options: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Layers { input, format } => layers::execute(&input, &format),

        Commands::Generators { input } => generators::execute(&input),

        Commands::Blocks {
            input,
            values,
            options,
            format,
        } => blocks::execute(&input, &values, options.as_deref(), &format),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
