//! CLI command parsing and utility tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from`), circuit
//! document loading from disk, and the library calls behind each command.

// The CLI is a binary crate, so the command definitions are mirrored here
// and the command bodies are exercised through the library crates.

const BELL_ANSATZ: &str = r#"{
    "name": "bell_ansatz",
    "num_qubits": 2,
    "variables": ["a", "b", "c"],
    "instructions": [
        {"gate": "rx", "qubits": [0], "param": "a"},
        {"gate": "ry", "qubits": [1], "param": "b"},
        {"gate": "cx", "qubits": [0, 1]},
        {"gate": "rz", "qubits": [0], "param": "c"}
    ]
}"#;

// ============================================================================
// Circuit document loading
// ============================================================================

mod circuit_loading {
    use super::BELL_ANSATZ;
    use natgrad_ir::Circuit;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(BELL_ANSATZ.as_bytes()).unwrap();

        let circuit = Circuit::from_json_file(file.path()).unwrap();
        assert_eq!(circuit.name(), "bell_ansatz");
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_instructions(), 4);
        assert_eq!(circuit.variables(), &["a", "b", "c"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Circuit::from_json_file("/nonexistent/circuit.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(Circuit::from_json_file(file.path()).is_err());
    }

    #[test]
    fn test_load_undeclared_variable() {
        let source = r#"{
            "num_qubits": 1,
            "instructions": [{"gate": "rx", "qubits": [0], "param": "theta"}]
        }"#;
        assert!(Circuit::from_json(source).is_err());
    }

    #[test]
    fn test_json_roundtrip_through_disk() {
        let circuit = Circuit::from_json(BELL_ANSATZ).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, circuit.to_json().unwrap()).unwrap();

        let reloaded = Circuit::from_json_file(&path).unwrap();
        assert_eq!(reloaded.num_instructions(), circuit.num_instructions());
        assert_eq!(reloaded.variables(), circuit.variables());
    }
}

// ============================================================================
// Command bodies
// ============================================================================

mod command_bodies {
    use super::BELL_ANSATZ;
    use natgrad_ir::{Circuit, CircuitDocument};
    use natgrad_qng::{QngOptions, QuantumNaturalGradient, segment};
    use std::io::Write;

    #[test]
    fn test_layers_summary_json() {
        let circuit = Circuit::from_json(BELL_ANSATZ).unwrap();
        let layers = segment(&circuit).unwrap();
        let summaries: Vec<_> = layers.iter().enumerate().map(|(i, l)| l.summary(i)).collect();

        let json = serde_json::to_value(&summaries).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["param_indices"], serde_json::json!([0, 1]));
        assert_eq!(json[0]["block_qubits"], serde_json::json!([0, 1]));
        assert_eq!(json[1]["num_pre_ops"], 3);
        assert_eq!(json[1]["ops"][0], "rz(c) q0");
    }

    #[test]
    fn test_generators_listing() {
        let circuit = Circuit::from_json(BELL_ANSATZ).unwrap();
        let layers = segment(&circuit).unwrap();
        let rendered: Vec<String> = layers
            .iter()
            .flat_map(|l| l.generators())
            .map(|g| g.unwrap().to_string())
            .collect();
        assert_eq!(rendered, vec!["0.5 X0", "0.5 Y1", "0.5 Z0"]);
    }

    #[test]
    fn test_blocks_with_options_file() {
        let mut options_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(options_file, "shots: 256").unwrap();
        writeln!(options_file, "measure_blocks: true").unwrap();
        let options = QngOptions::from_file(options_file.path()).unwrap();

        let circuit = Circuit::from_json(BELL_ANSATZ).unwrap();
        let qng = QuantumNaturalGradient::new(circuit, options).unwrap();
        let blocks = qng.gradient_executions(&[0.1, 0.2, 0.3]).unwrap();

        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.shots == 256));
        // Prefix plus one measurement per qubit.
        assert_eq!(blocks[1].circuit.num_instructions(), 4 + 2);

        let doc = CircuitDocument::from(&blocks[0].circuit);
        assert!(doc.variables.is_empty());
        assert_eq!(doc.instructions[0].gate, "rx");
    }

    #[test]
    fn test_blocks_bad_options_file() {
        let mut options_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(options_file, "shots: -3").unwrap();
        assert!(QngOptions::from_file(options_file.path()).is_err());
    }

    #[test]
    fn test_unparameterized_circuit_rejected() {
        let source = r#"{"num_qubits": 1, "instructions": [{"gate": "h", "qubits": [0]}]}"#;
        let circuit = Circuit::from_json(source).unwrap();
        let err = segment(&circuit).unwrap_err();
        assert!(err.to_string().contains("not parametrized"));
    }
}

// ============================================================================
// CLI argument parsing
// ============================================================================

mod cli_parsing {
    use clap::{Parser, Subcommand};

    #[derive(Parser)]
    #[command(name = "natgrad")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Layers {
            #[arg(short, long)]
            input: String,
            #[arg(short, long, default_value = "table")]
            format: String,
        },
        Generators {
            #[arg(short, long)]
            input: String,
        },
        Blocks {
            #[arg(short, long)]
            input: String,
            #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
            values: Vec<f64>,
            #[arg(long)]
            options: Option<String>,
            #[arg(short, long, default_value = "table")]
            format: String,
        },
    }

    // --- Layers command ---

    #[test]
    fn test_parse_layers_minimal() {
        let cli = TestCli::try_parse_from(["natgrad", "layers", "-i", "circuit.json"]).unwrap();
        match cli.command {
            TestCommands::Layers { input, format } => {
                assert_eq!(input, "circuit.json");
                assert_eq!(format, "table");
            }
            _ => panic!("Expected Layers command"),
        }
    }

    #[test]
    fn test_parse_layers_json() {
        let cli =
            TestCli::try_parse_from(["natgrad", "layers", "-i", "c.json", "--format", "json"])
                .unwrap();
        match cli.command {
            TestCommands::Layers { format, .. } => assert_eq!(format, "json"),
            _ => panic!("Expected Layers command"),
        }
    }

    #[test]
    fn test_parse_layers_missing_input() {
        assert!(TestCli::try_parse_from(["natgrad", "layers"]).is_err());
    }

    // --- Generators command ---

    #[test]
    fn test_parse_generators() {
        let cli =
            TestCli::try_parse_from(["natgrad", "generators", "--input", "c.json"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Generators { .. }));
    }

    // --- Blocks command ---

    #[test]
    fn test_parse_blocks_values() {
        let cli = TestCli::try_parse_from([
            "natgrad",
            "blocks",
            "-i",
            "c.json",
            "--values",
            "0.1,-0.2,3",
            "--options",
            "qng.yaml",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Blocks {
                values,
                options,
                format,
                ..
            } => {
                assert_eq!(values, vec![0.1, -0.2, 3.0]);
                assert_eq!(options.as_deref(), Some("qng.yaml"));
                assert_eq!(format, "table");
            }
            _ => panic!("Expected Blocks command"),
        }
    }

    #[test]
    fn test_parse_blocks_bad_value() {
        let result =
            TestCli::try_parse_from(["natgrad", "blocks", "-i", "c.json", "--values", "0.1,x"]);
        assert!(result.is_err());
    }

    // --- Verbosity ---

    #[test]
    fn test_verbose_count() {
        let cli =
            TestCli::try_parse_from(["natgrad", "-vv", "generators", "-i", "c.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["natgrad", "optimize"]).is_err());
    }
}
