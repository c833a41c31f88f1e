//! Parametrized circuit layers.

use natgrad_ir::{Instruction, QubitId};
use serde::Serialize;
use std::sync::Arc;

use crate::generator::{Generator, generator_of};

/// One block of the block-diagonal metric approximation.
///
/// A layer owns shared handles to its instructions together with the full
/// context around it: `pre_ops ++ ops ++ post_ops` is always the complete
/// instruction sequence of the circuit the layer was cut from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametrizedCircuitLayer {
    pub(crate) ops: Vec<Arc<Instruction>>,
    pub(crate) param_indices: Vec<usize>,
    pub(crate) pre_ops: Vec<Arc<Instruction>>,
    pub(crate) post_ops: Vec<Arc<Instruction>>,
}

impl ParametrizedCircuitLayer {
    pub(crate) fn new() -> Self {
        Self {
            ops: vec![],
            param_indices: vec![],
            pre_ops: vec![],
            post_ops: vec![],
        }
    }

    /// Instructions belonging to this layer, in program order.
    pub fn ops(&self) -> &[Arc<Instruction>] {
        &self.ops
    }

    /// Positions in the circuit's variable list, one per variable-bound op.
    pub fn param_indices(&self) -> &[usize] {
        &self.param_indices
    }

    /// Every instruction that precedes this layer.
    pub fn pre_ops(&self) -> &[Arc<Instruction>] {
        &self.pre_ops
    }

    /// Every instruction that follows this layer, in program order.
    pub fn post_ops(&self) -> &[Arc<Instruction>] {
        &self.post_ops
    }

    /// Total instruction count covered by `pre_ops`, `ops` and `post_ops`.
    pub fn num_instructions(&self) -> usize {
        self.pre_ops.len() + self.ops.len() + self.post_ops.len()
    }

    /// Iterate over `pre_ops ++ ops ++ post_ops`.
    pub fn full_sequence(&self) -> impl Iterator<Item = &Arc<Instruction>> {
        self.pre_ops
            .iter()
            .chain(self.ops.iter())
            .chain(self.post_ops.iter())
    }

    /// Variable-bound instructions of this layer, aligned with `param_indices`.
    pub fn parameterized_ops(&self) -> impl Iterator<Item = &Arc<Instruction>> {
        self.ops.iter().filter(|inst| inst.variable().is_some())
    }

    /// Qubits carrying a variable-bound rotation in this layer, ascending.
    pub fn block_qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<QubitId> = self
            .parameterized_ops()
            .flat_map(|inst| inst.qubits.iter().copied())
            .collect();
        qubits.sort_unstable();
        qubits
    }

    /// Generators of the variable-bound ops, aligned with `param_indices`.
    ///
    /// `None` marks an op whose gate has no known generator.
    pub fn generators(&self) -> Vec<Option<Generator>> {
        self.parameterized_ops()
            .map(|inst| generator_of(inst))
            .collect()
    }

    /// A serializable overview of the layer.
    pub fn summary(&self, index: usize) -> LayerSummary {
        LayerSummary {
            index,
            ops: self.ops.iter().map(|inst| describe(inst)).collect(),
            param_indices: self.param_indices.clone(),
            block_qubits: self.block_qubits().into_iter().map(|q| q.0).collect(),
            num_pre_ops: self.pre_ops.len(),
            num_post_ops: self.post_ops.len(),
        }
    }
}

/// Serializable overview of a [`ParametrizedCircuitLayer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    /// Position of the layer in the segmentation.
    pub index: usize,
    /// Instructions of the layer, rendered as `name(param) q0,q1`.
    pub ops: Vec<String>,
    /// Variable positions covered by the layer.
    pub param_indices: Vec<usize>,
    /// Qubits carrying variable-bound rotations.
    pub block_qubits: Vec<u32>,
    /// Number of preceding instructions.
    pub num_pre_ops: usize,
    /// Number of following instructions.
    pub num_post_ops: usize,
}

fn describe(inst: &Instruction) -> String {
    let qubits = inst
        .qubits
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    match inst.parameter() {
        Some(param) => format!("{}({param}) {qubits}", inst.name()),
        None => format!("{} {qubits}", inst.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natgrad_ir::{Parameter, StandardGate};

    fn layer() -> ParametrizedCircuitLayer {
        let h = Arc::new(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)));
        let rx = Arc::new(Instruction::single_qubit_gate(
            StandardGate::Rx(Parameter::variable("a")),
            QubitId(1),
        ));
        let rz = Arc::new(Instruction::single_qubit_gate(
            StandardGate::Rz(Parameter::constant(0.5)),
            QubitId(0),
        ));
        let ry = Arc::new(Instruction::single_qubit_gate(
            StandardGate::Ry(Parameter::variable("b")),
            QubitId(0),
        ));
        ParametrizedCircuitLayer {
            ops: vec![rx, rz, ry],
            param_indices: vec![0, 1],
            pre_ops: vec![h.clone()],
            post_ops: vec![h],
        }
    }

    #[test]
    fn test_counts_and_sequence() {
        let layer = layer();
        assert_eq!(layer.num_instructions(), 5);
        let names: Vec<&str> = layer.full_sequence().map(|i| i.name()).collect();
        assert_eq!(names, vec!["h", "rx", "rz", "ry", "h"]);
    }

    #[test]
    fn test_block_qubits_and_generators() {
        let layer = layer();
        assert_eq!(layer.block_qubits(), vec![QubitId(0), QubitId(1)]);

        let gens = layer.generators();
        assert_eq!(gens.len(), layer.param_indices().len());
        assert_eq!(gens[0].unwrap().to_string(), "0.5 X1");
        assert_eq!(gens[1].unwrap().to_string(), "0.5 Y0");
    }

    #[test]
    fn test_summary() {
        let summary = layer().summary(3);
        assert_eq!(summary.index, 3);
        assert_eq!(summary.ops, vec!["rx(a) q1", "rz(0.5) q0", "ry(b) q0"]);
        assert_eq!(summary.param_indices, vec![0, 1]);
        assert_eq!(summary.num_pre_ops, 1);
        assert_eq!(summary.num_post_ops, 1);
    }
}
