//! natgrad circuit model
//!
//! This crate provides the data structures the natural-gradient layering
//! engine consumes: gates, parameter bindings, instructions and circuits
//! with an ordered list of declared free variables.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] for built-in gates and [`CustomGate`] for
//!   opaque user-defined operations
//! - **Parameters**: [`Parameter`], either a constant angle or a reference
//!   to a declared variable
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder with variable declarations, plus the
//!   JSON [`CircuitDocument`] form
//!
//! # Example: Parameterized Circuit
//!
//! ```rust
//! use natgrad_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("ansatz", 2, 0);
//! circuit.declare_variables(["a", "b"]).unwrap();
//!
//! circuit
//!     .rx("a", QubitId(0)).unwrap()
//!     .cx(QubitId(0), QubitId(1)).unwrap()
//!     .ry("b", QubitId(1)).unwrap()
//!     .rz(1.57, QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_instructions(), 4);
//! assert_eq!(circuit.variable_index("b"), Some(1));
//!
//! let bound = circuit.bind_parameters(&[0.1, 0.2]).unwrap();
//! assert!(!bound.is_parameterized());
//! ```

pub mod circuit;
pub mod document;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use document::{CircuitDocument, InstructionDocument};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::Parameter;
pub use qubit::{ClbitId, QubitId};
