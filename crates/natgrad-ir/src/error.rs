//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building or transforming a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit index is outside the circuit's classical register.
    #[error("Classical bit c{clbit} not found in circuit")]
    ClbitNotFound {
        /// The offending classical bit index.
        clbit: u32,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A variable with this name was already declared.
    #[error("Variable '{0}' is already declared")]
    DuplicateVariable(String),

    /// An instruction references a variable the circuit never declared.
    #[error("Variable '{name}' is not declared (gate: {gate_name})")]
    UndeclaredVariable {
        /// The referenced variable.
        name: String,
        /// Gate that references it.
        gate_name: String,
    },

    /// Variable bindings are only allowed on single-qubit instructions.
    #[error("Gate '{gate_name}' binds variable '{variable}' but acts on {got} qubits")]
    MultiQubitVariable {
        /// Name of the gate.
        gate_name: String,
        /// The bound variable.
        variable: String,
        /// Number of qubits the instruction targets.
        got: usize,
    },

    /// A custom gate reuses the name of a standard gate.
    #[error("Custom gate name '{0}' is reserved for a standard gate")]
    ReservedGateName(String),

    /// Parameter is unbound.
    #[error("Parameter '{0}' is unbound")]
    UnboundParameter(String),

    /// Number of supplied values does not match the declared variables.
    #[error("Expected {expected} variable values, got {got}")]
    ValueCountMismatch {
        /// Number of declared variables.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Circuit document could not be read or written.
    #[error("Invalid circuit document: {0}")]
    Document(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

impl From<serde_json::Error> for IrError {
    fn from(err: serde_json::Error) -> Self {
        IrError::Document(err.to_string())
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
