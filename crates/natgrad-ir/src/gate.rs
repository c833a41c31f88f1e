//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::parameter::Parameter;

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(Parameter),
    /// Rotation around Y axis.
    Ry(Parameter),
    /// Rotation around Z axis.
    Rz(Parameter),
    /// Phase gate.
    P(Parameter),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Controlled rotation around Z.
    CRz(Parameter),
    /// Controlled phase gate.
    CP(Parameter),
    /// ZZ rotation gate.
    RZZ(Parameter),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::CCX => "ccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::CRz(_)
            | StandardGate::CP(_)
            | StandardGate::RZZ(_) => 2,

            StandardGate::CCX => 3,
        }
    }

    /// Get the parameter binding of this gate, if it takes one.
    pub fn parameter(&self) -> Option<&Parameter> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRz(p)
            | StandardGate::CP(p)
            | StandardGate::RZZ(p) => Some(p),
            _ => None,
        }
    }

    fn parameter_mut(&mut self) -> Option<&mut Parameter> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRz(p)
            | StandardGate::CP(p)
            | StandardGate::RZZ(p) => Some(p),
            _ => None,
        }
    }

    /// Whether the standard gate called `name` takes a parameter.
    ///
    /// Returns `None` if `name` is not a standard gate name.
    pub fn takes_parameter(name: &str) -> Option<bool> {
        match name {
            "id" | "x" | "y" | "z" | "h" | "s" | "sdg" | "t" | "tdg" | "sx" | "cx" | "cy"
            | "cz" | "swap" | "ccx" => Some(false),
            "rx" | "ry" | "rz" | "p" | "crz" | "cp" | "rzz" => Some(true),
            _ => None,
        }
    }

    /// Look up a standard gate by its lowercase name.
    ///
    /// Returns `None` for unknown names and when `param` does not match
    /// whether the gate takes a parameter.
    pub fn from_name(name: &str, param: Option<Parameter>) -> Option<Self> {
        let gate = match (name, param) {
            ("id", None) => StandardGate::I,
            ("x", None) => StandardGate::X,
            ("y", None) => StandardGate::Y,
            ("z", None) => StandardGate::Z,
            ("h", None) => StandardGate::H,
            ("s", None) => StandardGate::S,
            ("sdg", None) => StandardGate::Sdg,
            ("t", None) => StandardGate::T,
            ("tdg", None) => StandardGate::Tdg,
            ("sx", None) => StandardGate::SX,
            ("rx", Some(p)) => StandardGate::Rx(p),
            ("ry", Some(p)) => StandardGate::Ry(p),
            ("rz", Some(p)) => StandardGate::Rz(p),
            ("p", Some(p)) => StandardGate::P(p),
            ("cx", None) => StandardGate::CX,
            ("cy", None) => StandardGate::CY,
            ("cz", None) => StandardGate::CZ,
            ("swap", None) => StandardGate::Swap,
            ("crz", Some(p)) => StandardGate::CRz(p),
            ("cp", Some(p)) => StandardGate::CP(p),
            ("rzz", Some(p)) => StandardGate::RZZ(p),
            ("ccx", None) => StandardGate::CCX,
            _ => return None,
        };
        Some(gate)
    }
}

/// A user-defined gate opaque to the layering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Optional parameter binding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<Parameter>,
}

impl CustomGate {
    /// Create a new custom gate.
    ///
    /// Standard gate names are reserved: [`crate::Circuit::apply`] rejects a
    /// custom gate that reuses one.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            param: None,
        }
    }

    /// Attach a parameter binding to the gate.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<Parameter>) -> Self {
        self.param = Some(param.into());
        self
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A custom user-defined gate.
    Custom(CustomGate),
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Custom(g) => g.num_qubits,
        }
    }

    /// Get the parameter binding, if any.
    pub fn parameter(&self) -> Option<&Parameter> {
        match self {
            Gate::Standard(g) => g.parameter(),
            Gate::Custom(g) => g.param.as_ref(),
        }
    }

    /// Get a mutable reference to the parameter binding, if any.
    pub fn parameter_mut(&mut self) -> Option<&mut Parameter> {
        match self {
            Gate::Standard(g) => g.parameter_mut(),
            Gate::Custom(g) => g.param.as_mut(),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::Custom(gate)
    }
}
