//! JSON circuit documents.
//!
//! The on-disk form is a flat list of instructions plus the declared
//! variables:
//!
//! ```json
//! {
//!   "name": "ansatz",
//!   "num_qubits": 2,
//!   "variables": ["a", "b"],
//!   "instructions": [
//!     { "gate": "rx", "qubits": [0], "param": "a" },
//!     { "gate": "cx", "qubits": [0, 1] },
//!     { "gate": "rz", "qubits": [1], "param": 1.57 }
//!   ]
//! }
//! ```
//!
//! A string `param` is a variable reference, a number is a constant.
//! A standard gate must carry a `param` exactly when it takes one. Gate
//! names that are not standard gates become custom gates.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::{CustomGate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::Parameter;
use crate::qubit::{ClbitId, QubitId};

/// Serialized form of a [`Circuit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDocument {
    /// Circuit name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Number of qubits.
    pub num_qubits: u32,
    /// Number of classical bits.
    #[serde(default)]
    pub num_clbits: u32,
    /// Declared variables, in gradient-vector order.
    #[serde(default)]
    pub variables: Vec<String>,
    /// Instructions in program order.
    #[serde(default)]
    pub instructions: Vec<InstructionDocument>,
}

/// Serialized form of an [`Instruction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionDocument {
    /// Gate or operation name (`measure`, `reset` and `barrier` included).
    pub gate: String,
    /// Target qubits.
    pub qubits: Vec<u32>,
    /// Classical bits (measure only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<u32>,
    /// Parameter binding, if the gate takes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<Parameter>,
}

fn default_name() -> String {
    "circuit".into()
}

impl InstructionDocument {
    fn into_instruction(self) -> IrResult<Instruction> {
        let arity = self.qubits.len() as u32;
        let name = self.gate.as_str();

        if matches!(name, "measure" | "reset" | "barrier") && self.param.is_some() {
            return Err(IrError::Document(format!("{name}: takes no parameter")));
        }
        if matches!(name, "reset" | "barrier") && !self.clbits.is_empty() {
            return Err(IrError::Document(format!("{name}: takes no classical bits")));
        }

        let qubits = self.qubits.into_iter().map(QubitId);
        let inst = match name {
            "measure" => {
                let clbits: Vec<ClbitId> = self.clbits.into_iter().map(ClbitId).collect();
                let qubits: Vec<QubitId> = qubits.collect();
                if qubits.len() != clbits.len() {
                    return Err(IrError::Document(format!(
                        "measure: qubit count ({}) does not match clbit count ({})",
                        qubits.len(),
                        clbits.len()
                    )));
                }
                Instruction {
                    kind: InstructionKind::Measure,
                    qubits,
                    clbits,
                }
            }
            "reset" => {
                if arity != 1 {
                    return Err(IrError::Document(format!(
                        "reset: expected 1 qubit, got {arity}"
                    )));
                }
                Instruction {
                    kind: InstructionKind::Reset,
                    qubits: qubits.collect(),
                    clbits: vec![],
                }
            }
            "barrier" => Instruction::barrier(qubits),
            name => match StandardGate::takes_parameter(name) {
                Some(takes) => {
                    let standard = StandardGate::from_name(name, self.param).ok_or_else(|| {
                        IrError::Document(if takes {
                            format!("{name}: requires a parameter")
                        } else {
                            format!("{name}: takes no parameter")
                        })
                    })?;
                    Instruction::gate(standard, qubits)
                }
                None => Instruction::gate(
                    CustomGate {
                        name: name.to_string(),
                        num_qubits: arity,
                        param: self.param,
                    },
                    qubits,
                ),
            },
        };
        Ok(inst)
    }

    fn from_instruction(inst: &Instruction) -> Self {
        Self {
            gate: inst.name().to_string(),
            qubits: inst.qubits.iter().map(|q| q.0).collect(),
            clbits: inst.clbits.iter().map(|c| c.0).collect(),
            param: inst.parameter().cloned(),
        }
    }
}

impl TryFrom<CircuitDocument> for Circuit {
    type Error = IrError;

    fn try_from(doc: CircuitDocument) -> IrResult<Self> {
        let mut circuit = Circuit::with_size(doc.name, doc.num_qubits, doc.num_clbits);
        circuit.declare_variables(doc.variables)?;
        for inst in doc.instructions {
            circuit.apply(inst.into_instruction()?)?;
        }
        Ok(circuit)
    }
}

impl From<&Circuit> for CircuitDocument {
    fn from(circuit: &Circuit) -> Self {
        Self {
            name: circuit.name().to_string(),
            num_qubits: circuit.num_qubits(),
            num_clbits: circuit.num_clbits(),
            variables: circuit.variables().to_vec(),
            instructions: circuit
                .instructions()
                .iter()
                .map(|inst| InstructionDocument::from_instruction(inst))
                .collect(),
        }
    }
}

impl Circuit {
    /// Parse and validate a circuit from its JSON document form.
    pub fn from_json(source: &str) -> IrResult<Self> {
        let doc: CircuitDocument = serde_json::from_str(source)?;
        Circuit::try_from(doc)
    }

    /// Read a JSON circuit document from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> IrResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| IrError::Document(format!("{}: {e}", path.display())))?;
        Self::from_json(&source)
    }

    /// Serialize the circuit to a pretty-printed JSON document.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(&CircuitDocument::from(self))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;

    const ANSATZ: &str = r#"{
        "name": "ansatz",
        "num_qubits": 2,
        "num_clbits": 2,
        "variables": ["a", "b"],
        "instructions": [
            { "gate": "rx", "qubits": [0], "param": "a" },
            { "gate": "cx", "qubits": [0, 1] },
            { "gate": "rz", "qubits": [1], "param": 1.57 },
            { "gate": "ry", "qubits": [1], "param": "b" },
            { "gate": "measure", "qubits": [0, 1], "clbits": [0, 1] }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let circuit = Circuit::from_json(ANSATZ).unwrap();
        assert_eq!(circuit.name(), "ansatz");
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.variables(), &["a".to_string(), "b".to_string()]);
        assert_eq!(circuit.num_instructions(), 5);
        assert_eq!(circuit.instruction(0).unwrap().variable(), Some("a"));
        assert_eq!(
            circuit.instruction(2).unwrap().parameter(),
            Some(&Parameter::Constant(1.57))
        );
    }

    #[test]
    fn test_unknown_gate_becomes_custom() {
        let circuit = Circuit::from_json(
            r#"{ "num_qubits": 2, "instructions": [{ "gate": "fsim", "qubits": [0, 1] }] }"#,
        )
        .unwrap();
        let inst = circuit.instruction(0).unwrap();
        assert_eq!(inst.name(), "fsim");
        assert!(matches!(inst.as_gate(), Some(Gate::Custom(_))));
    }

    #[test]
    fn test_rotation_without_parameter_rejected() {
        let err = Circuit::from_json(
            r#"{ "num_qubits": 1, "instructions": [{ "gate": "rx", "qubits": [0] }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, IrError::Document(msg) if msg.contains("requires a parameter")));
    }

    #[test]
    fn test_fixed_gate_with_parameter_rejected() {
        let err = Circuit::from_json(
            r#"{
                "num_qubits": 1,
                "variables": ["a"],
                "instructions": [{ "gate": "h", "qubits": [0], "param": "a" }]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, IrError::Document(msg) if msg.contains("takes no parameter")));
    }

    #[test]
    fn test_reset_and_barrier_shape() {
        let load = |inst: &str| {
            Circuit::from_json(&format!(
                r#"{{ "num_qubits": 2, "num_clbits": 1, "instructions": [{inst}] }}"#
            ))
        };

        assert!(load(r#"{ "gate": "reset", "qubits": [1] }"#).is_ok());
        assert!(load(r#"{ "gate": "barrier", "qubits": [0, 1] }"#).is_ok());

        for bad in [
            r#"{ "gate": "reset", "qubits": [] }"#,
            r#"{ "gate": "reset", "qubits": [0, 1] }"#,
            r#"{ "gate": "reset", "qubits": [0], "clbits": [0] }"#,
            r#"{ "gate": "reset", "qubits": [0], "param": 0.5 }"#,
            r#"{ "gate": "barrier", "qubits": [0], "clbits": [0] }"#,
            r#"{ "gate": "barrier", "qubits": [0], "param": "a" }"#,
            r#"{ "gate": "measure", "qubits": [0], "clbits": [0], "param": 1.0 }"#,
        ] {
            let err = load(bad).unwrap_err();
            assert!(matches!(err, IrError::Document(_)), "accepted {bad}");
        }
    }

    #[test]
    fn test_custom_gates_survive_roundtrip() {
        let mut circuit = Circuit::with_size("custom", 2, 0);
        circuit.declare_variable("phi").unwrap();
        circuit
            .gate(CustomGate::new("u1", 1).with_param("phi"), [QubitId(0)])
            .unwrap()
            .gate(CustomGate::new("fsim", 2), [QubitId(0), QubitId(1)])
            .unwrap();

        let reparsed = Circuit::from_json(&circuit.to_json().unwrap()).unwrap();
        for inst in reparsed.instructions() {
            assert!(matches!(inst.as_gate(), Some(Gate::Custom(_))));
        }
        assert_eq!(reparsed.instruction(0).unwrap().variable(), Some("phi"));
    }

    #[test]
    fn test_undeclared_variable_rejected() {
        let err = Circuit::from_json(
            r#"{ "num_qubits": 1, "instructions": [{ "gate": "rx", "qubits": [0], "param": "z" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, IrError::UndeclaredVariable { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Circuit::from_json("{ not json").unwrap_err();
        assert!(matches!(err, IrError::Document(_)));
    }

    #[test]
    fn test_document_preserves_structure() {
        let circuit = Circuit::from_json(ANSATZ).unwrap();
        let reparsed = Circuit::from_json(&circuit.to_json().unwrap()).unwrap();
        assert_eq!(
            CircuitDocument::from(&circuit),
            CircuitDocument::from(&reparsed)
        );
    }
}
