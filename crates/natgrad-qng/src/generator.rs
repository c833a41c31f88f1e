//! Pauli generators of single-qubit rotations.
//!
//! A rotation `R_P(θ) = exp(-i θ/2 · P)` is generated by `½·P`, so each of
//! the elementary rotations maps to a single weighted Pauli term:
//!
//! | Gate | Generator |
//! |------|-----------|
//! | `rx` | `0.5 · X` |
//! | `ry` | `0.5 · Y` |
//! | `rz` | `0.5 · Z` |
//!
//! # Example
//!
//! ```rust
//! use natgrad_ir::{Instruction, Parameter, QubitId, StandardGate};
//! use natgrad_qng::generator::{generator_of, PauliOp};
//!
//! let ry = Instruction::single_qubit_gate(StandardGate::Ry(Parameter::variable("x")), QubitId(2));
//! let g = generator_of(&ry).unwrap();
//! assert_eq!(g.pauli, PauliOp::Y);
//! assert_eq!(g.qubit, QubitId(2));
//! assert_eq!(g.to_string(), "0.5 Y2");
//! ```

use natgrad_ir::{Instruction, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coefficient of every rotation generator.
pub const GENERATOR_COEFF: f64 = 0.5;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// The operator's letter.
    pub fn label(self) -> char {
        match self {
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }
}

/// A weighted single-qubit Pauli term: `coeff · pauli(qubit)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    /// Real coefficient, always [`GENERATOR_COEFF`] for rotation generators.
    pub coeff: f64,
    /// The Pauli operator.
    pub pauli: PauliOp,
    /// The qubit it acts on.
    pub qubit: QubitId,
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.coeff, self.pauli.label(), self.qubit.0)
    }
}

/// Look up the generator of a rotation instruction.
///
/// Returns `None` for any instruction other than `rx`, `ry` or `rz` and for
/// instructions that do not act on exactly one qubit.
pub fn generator_of(instruction: &Instruction) -> Option<Generator> {
    let [qubit] = instruction.qubits.as_slice() else {
        return None;
    };
    let pauli = match instruction.name() {
        "rx" => PauliOp::X,
        "ry" => PauliOp::Y,
        "rz" => PauliOp::Z,
        _ => return None,
    };
    Some(Generator {
        coeff: GENERATOR_COEFF,
        pauli,
        qubit: *qubit,
    })
}
