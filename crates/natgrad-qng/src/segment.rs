//! Layer segmentation.
//!
//! Splits a parameterized circuit into an ordered list of
//! [`ParametrizedCircuitLayer`]s. Each layer is a maximal run of
//! instructions in which no qubit carries two variable-bound rotations; the
//! moment a qubit is reused the layer closes and a new one opens.
//!
//! ```text
//!   q0: ─Rx(a)──●──Ry(c)─
//!   q1: ─Ry(b)──X────────
//!        └ layer 0 ┘└ 1 ┘
//! ```
//!
//! After the scan every layer receives its context: `pre_ops` is everything
//! before it and `post_ops` everything after it, both in program order.

use natgrad_ir::{Circuit, Instruction, QubitId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, trace};

use crate::error::{QngError, QngResult};
use crate::layer::ParametrizedCircuitLayer;

/// Segment `circuit` into parametrized layers.
///
/// # Errors
///
/// - [`QngError::Configuration`] if the circuit declares no variables, or an
///   instruction binds an undeclared variable or binds a variable on more
///   than one qubit.
/// - [`QngError::Internal`] if the produced layers violate the
///   reconstruction invariants.
#[instrument(skip(circuit), fields(circuit = circuit.name(), n = circuit.num_instructions()))]
pub fn segment(circuit: &Circuit) -> QngResult<Vec<ParametrizedCircuitLayer>> {
    if !circuit.is_parameterized() {
        return Err(QngError::Configuration(format!(
            "circuit '{}' is not parametrized: it declares no variables",
            circuit.name()
        )));
    }

    let index = VariableIndex::new(circuit.variables());
    let mut builder = LayerBuilder::default();

    for (position, inst) in circuit.instructions().iter().enumerate() {
        match inst.variable() {
            None => {
                trace!(position, gate = inst.name(), "fixed instruction");
                builder.push_fixed(inst);
            }
            Some(variable) => {
                let slot = index.get(variable).ok_or_else(|| {
                    QngError::Configuration(format!(
                        "instruction {position} ({}) binds undeclared variable '{variable}'",
                        inst.name()
                    ))
                })?;
                let qubit = single_target(position, inst)?;
                trace!(position, gate = inst.name(), %qubit, slot, "variable-bound instruction");
                builder.push_variable(inst, qubit, slot)?;
            }
        }
    }

    let mut layers = builder.finish()?;
    attach_context(&mut layers);
    verify(&layers, circuit.instructions())?;

    info!(layers = layers.len(), "segmented circuit");
    Ok(layers)
}

/// Variable name to declaration position, built once per circuit.
struct VariableIndex<'a> {
    slots: FxHashMap<&'a str, usize>,
}

impl<'a> VariableIndex<'a> {
    fn new(variables: &'a [String]) -> Self {
        let slots = variables
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();
        Self { slots }
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }
}

fn single_target(position: usize, inst: &Instruction) -> QngResult<QubitId> {
    match inst.qubits.as_slice() {
        [qubit] => Ok(*qubit),
        qubits => Err(QngError::Configuration(format!(
            "instruction {position} ({}) binds a variable on {} qubits; only single-qubit rotations are supported",
            inst.name(),
            qubits.len()
        ))),
    }
}

/// The open layer plus the qubits it has already rotated.
#[derive(Default)]
struct LayerBuilder {
    closed: Vec<ParametrizedCircuitLayer>,
    current: Option<ParametrizedCircuitLayer>,
    touched: FxHashSet<QubitId>,
}

impl LayerBuilder {
    fn current(&mut self) -> &mut ParametrizedCircuitLayer {
        self.current.get_or_insert_with(ParametrizedCircuitLayer::new)
    }

    fn push_fixed(&mut self, inst: &Arc<Instruction>) {
        self.current().ops.push(Arc::clone(inst));
    }

    fn push_variable(
        &mut self,
        inst: &Arc<Instruction>,
        qubit: QubitId,
        slot: usize,
    ) -> QngResult<()> {
        if self.touched.contains(&qubit) {
            debug!(%qubit, layer = self.closed.len(), "qubit reused, closing layer");
            self.close()?;
        }
        let layer = self.current();
        layer.ops.push(Arc::clone(inst));
        layer.param_indices.push(slot);
        self.touched.insert(qubit);
        Ok(())
    }

    fn close(&mut self) -> QngResult<()> {
        let layer = self.current.take().unwrap_or_else(ParametrizedCircuitLayer::new);
        if layer.ops.is_empty() || layer.param_indices.is_empty() {
            return Err(QngError::Internal(format!(
                "layer {} closed with {} ops and {} parameters",
                self.closed.len(),
                layer.ops.len(),
                layer.param_indices.len()
            )));
        }
        self.closed.push(layer);
        self.touched.clear();
        Ok(())
    }

    fn finish(mut self) -> QngResult<Vec<ParametrizedCircuitLayer>> {
        self.close()?;
        Ok(self.closed)
    }
}

/// Fill in `pre_ops` and `post_ops` for every layer.
///
/// `pre_ops[i] = pre_ops[i-1] ++ ops[i-1]` and
/// `post_ops[i] = ops[i+1] ++ post_ops[i+1]`, so both stay in program order.
fn attach_context(layers: &mut [ParametrizedCircuitLayer]) {
    for i in 1..layers.len() {
        let (done, rest) = layers.split_at_mut(i);
        let prev = &done[i - 1];
        let mut pre = Vec::with_capacity(prev.pre_ops.len() + prev.ops.len());
        pre.extend(prev.pre_ops.iter().cloned());
        pre.extend(prev.ops.iter().cloned());
        rest[0].pre_ops = pre;
    }

    for i in (0..layers.len().saturating_sub(1)).rev() {
        let (head, tail) = layers.split_at_mut(i + 1);
        let next = &tail[0];
        let mut post = Vec::with_capacity(next.ops.len() + next.post_ops.len());
        post.extend(next.ops.iter().cloned());
        post.extend(next.post_ops.iter().cloned());
        head[i].post_ops = post;
    }
}

/// Postcondition check over the full segmentation.
fn verify(layers: &[ParametrizedCircuitLayer], original: &[Arc<Instruction>]) -> QngResult<()> {
    for (i, layer) in layers.iter().enumerate() {
        if layer.num_instructions() != original.len() {
            return Err(QngError::Internal(format!(
                "layer {i} covers {} instructions ({} pre, {} ops, {} post), circuit has {}",
                layer.num_instructions(),
                layer.pre_ops.len(),
                layer.ops.len(),
                layer.post_ops.len(),
                original.len()
            )));
        }
        if layer.param_indices.is_empty() {
            return Err(QngError::Internal(format!("layer {i} has no parameters")));
        }
    }
    Ok(())
}

/// Check that every layer reconstructs `original` element by element.
///
/// This is stricter and slower than the size check [`segment`] always
/// performs; [`crate::strategy::QuantumNaturalGradient`] runs it when
/// `verify_reconstruction` is enabled.
pub fn verify_reconstruction(
    layers: &[ParametrizedCircuitLayer],
    original: &[Arc<Instruction>],
) -> QngResult<()> {
    for (i, layer) in layers.iter().enumerate() {
        let matches = layer.num_instructions() == original.len()
            && layer
                .full_sequence()
                .zip(original)
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b);
        if !matches {
            return Err(QngError::Internal(format!(
                "layer {i} does not reconstruct the circuit"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ops: &[Arc<Instruction>]) -> Vec<String> {
        ops.iter().map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn test_disjoint_rotations_share_a_layer() {
        let mut circuit = Circuit::with_size("disjoint", 2, 0);
        circuit.declare_variables(["a", "b"]).unwrap();
        circuit.rx("a", QubitId(0)).unwrap().ry("b", QubitId(1)).unwrap();

        let layers = segment(&circuit).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].ops().len(), 2);
        assert_eq!(layers[0].param_indices(), &[0, 1]);
        assert!(layers[0].pre_ops().is_empty());
        assert!(layers[0].post_ops().is_empty());
    }

    #[test]
    fn test_reused_qubit_opens_new_layer() {
        let mut circuit = Circuit::with_size("reuse", 1, 0);
        circuit.declare_variables(["a", "b"]).unwrap();
        circuit.rx("a", QubitId(0)).unwrap().rx("b", QubitId(0)).unwrap();

        let layers = segment(&circuit).unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].param_indices(), &[0]);
        assert_eq!(layers[1].param_indices(), &[1]);
        assert!(Arc::ptr_eq(&layers[0].post_ops()[0], &layers[1].ops()[0]));
        assert!(Arc::ptr_eq(&layers[1].pre_ops()[0], &layers[0].ops()[0]));
    }

    #[test]
    fn test_unparameterized_circuit_rejected() {
        let mut circuit = Circuit::with_size("fixed", 1, 0);
        circuit.rz(1.57, QubitId(0)).unwrap();

        let err = segment(&circuit).unwrap_err();
        assert!(matches!(err, QngError::Configuration(_)));
    }

    #[test]
    fn test_constant_rotation_does_not_break() {
        let mut circuit = Circuit::with_size("const", 1, 0);
        circuit.declare_variables(["a"]).unwrap();
        circuit
            .rz(0.1, QubitId(0))
            .unwrap()
            .rx("a", QubitId(0))
            .unwrap()
            .rz(0.2, QubitId(0))
            .unwrap();

        let layers = segment(&circuit).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(names(layers[0].ops()), vec!["rz", "rx", "rz"]);
        assert_eq!(layers[0].param_indices(), &[0]);
    }

    #[test]
    fn test_declared_but_unused_variables() {
        // Variables exist but nothing binds them: the only layer has no
        // parameters, which the engine reports as an invariant violation.
        let mut circuit = Circuit::with_size("unused", 1, 0);
        circuit.declare_variables(["a"]).unwrap();
        circuit.h(QubitId(0)).unwrap();

        let err = segment(&circuit).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_attach_context_forward_order() {
        let mut circuit = Circuit::with_size("ctx", 1, 0);
        circuit.declare_variables(["a", "b", "c"]).unwrap();
        circuit
            .rx("a", QubitId(0))
            .unwrap()
            .ry("b", QubitId(0))
            .unwrap()
            .rz("c", QubitId(0))
            .unwrap();

        let layers = segment(&circuit).unwrap();
        assert_eq!(layers.len(), 3);
        assert_eq!(names(layers[0].post_ops()), vec!["ry", "rz"]);
        assert_eq!(names(layers[2].pre_ops()), vec!["rx", "ry"]);
        verify_reconstruction(&layers, circuit.instructions()).unwrap();
    }

    #[test]
    fn test_verify_rejects_short_layer() {
        let mut circuit = Circuit::with_size("bad", 1, 0);
        circuit.declare_variables(["a"]).unwrap();
        circuit.rx("a", QubitId(0)).unwrap().h(QubitId(0)).unwrap();

        let mut layers = segment(&circuit).unwrap();
        layers[0].ops.pop();
        let err = verify(&layers, circuit.instructions()).unwrap_err();
        assert!(err.is_internal());
        assert!(verify_reconstruction(&layers, circuit.instructions()).is_err());
    }
}
