//! Quantum natural gradient strategy: block circuits in, gradient vector out.
//!
//! The strategy owns a circuit and its segmentation. For a given point in
//! parameter space it produces one [`BlockCircuit`] per layer (the prefix
//! `pre_ops ++ ops` with every variable bound, tail dropped), and after the
//! backend has run them it hands the measurement buffers to a
//! [`MetricAccumulator`] that folds them into the gradient vector.
//!
//! How the metric blocks are estimated from the measurements is the
//! accumulator's business; this module only fixes the plumbing and checks
//! that results line up with layers.

use natgrad_ir::Circuit;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::error::{QngError, QngResult};
use crate::generator::Generator;
use crate::layer::ParametrizedCircuitLayer;
use crate::options::QngOptions;
use crate::segment::{segment, verify_reconstruction};

/// An executable circuit for one layer's metric block.
#[derive(Debug, Clone)]
pub struct BlockCircuit {
    /// Index of the layer this block belongs to.
    pub layer_index: usize,
    /// Variable positions the block contributes to.
    pub param_indices: Vec<usize>,
    /// Generators of the layer's variable-bound rotations.
    pub generators: Vec<Option<Generator>>,
    /// The circuit to execute, fully bound.
    pub circuit: Circuit,
    /// Requested shot count.
    pub shots: u32,
}

/// Builds the executable circuit for one layer.
pub trait BlockBuilder {
    /// Build the block circuit for `layer`, cut from `source`, at `values`.
    fn build(
        &self,
        layer_index: usize,
        layer: &ParametrizedCircuitLayer,
        source: &Circuit,
        values: &[f64],
    ) -> QngResult<BlockCircuit>;
}

/// Builds `pre_ops ++ ops` with variables bound and `post_ops` truncated.
#[derive(Debug, Clone)]
pub struct PrefixBlockBuilder {
    shots: u32,
    measure: bool,
}

impl PrefixBlockBuilder {
    /// Create a builder with the given shot count.
    pub fn new(shots: u32) -> Self {
        Self {
            shots,
            measure: false,
        }
    }

    /// Append a full measurement to each block.
    #[must_use]
    pub fn with_measurement(mut self, measure: bool) -> Self {
        self.measure = measure;
        self
    }
}

impl From<&QngOptions> for PrefixBlockBuilder {
    fn from(options: &QngOptions) -> Self {
        Self::new(options.shots).with_measurement(options.measure_blocks)
    }
}

impl BlockBuilder for PrefixBlockBuilder {
    fn build(
        &self,
        layer_index: usize,
        layer: &ParametrizedCircuitLayer,
        source: &Circuit,
        values: &[f64],
    ) -> QngResult<BlockCircuit> {
        let bindings = source.value_map(values)?;
        let mut circuit = Circuit::with_size(
            format!("{}_block{layer_index}", source.name()),
            source.num_qubits(),
            source.num_clbits(),
        );
        for inst in layer.pre_ops().iter().chain(layer.ops()) {
            circuit.apply(inst.bound(&bindings)?)?;
        }
        if self.measure {
            circuit.measure_all()?;
        }

        Ok(BlockCircuit {
            layer_index,
            param_indices: layer.param_indices().to_vec(),
            generators: layer.generators(),
            circuit,
            shots: self.shots,
        })
    }
}

/// Named real-valued results of one executed block circuit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementBuffer {
    /// Layer the results belong to.
    pub layer_index: usize,
    values: FxHashMap<String, f64>,
}

impl MeasurementBuffer {
    /// Create an empty buffer for a layer.
    pub fn new(layer_index: usize) -> Self {
        Self {
            layer_index,
            values: FxHashMap::default(),
        }
    }

    /// Record a named value.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Record a named value.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Look up a named value.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the buffer holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Gradient-direction output, indexed by declared-variable position.
///
/// Writes go through a layer so an accumulator can only touch the slots
/// that layer owns.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientVector {
    values: Vec<f64>,
}

impl GradientVector {
    /// A zero vector of length `len`.
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    /// Write the `k`-th parameter of `layer`.
    pub fn write(
        &mut self,
        layer: &ParametrizedCircuitLayer,
        k: usize,
        value: f64,
    ) -> QngResult<()> {
        let slot = *layer.param_indices().get(k).ok_or_else(|| {
            QngError::ResultMismatch(format!(
                "layer has {} parameters, cannot write parameter {k}",
                layer.param_indices().len()
            ))
        })?;
        let len = self.values.len();
        let entry = self.values.get_mut(slot).ok_or_else(|| {
            QngError::ResultMismatch(format!(
                "slot {slot} is outside a gradient of length {len}"
            ))
        })?;
        *entry = value;
        Ok(())
    }

    /// Read a slot.
    pub fn get(&self, slot: usize) -> Option<f64> {
        self.values.get(slot).copied()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the vector has no slots.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// View the slots.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Consume the vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

/// Folds per-layer measurement results into the gradient vector.
pub trait MetricAccumulator {
    /// Accumulate `results` for `layers` into `gradient`.
    ///
    /// Every buffer's `layer_index` refers to an entry of `layers`, and every
    /// layer has at least one buffer.
    fn accumulate(
        &self,
        layers: &[ParametrizedCircuitLayer],
        results: &[MeasurementBuffer],
        gradient: &mut GradientVector,
    ) -> QngResult<()>;
}

/// Block-diagonal quantum natural gradient over a fixed circuit.
#[derive(Debug, Clone)]
pub struct QuantumNaturalGradient {
    circuit: Circuit,
    layers: Vec<ParametrizedCircuitLayer>,
    options: QngOptions,
}

impl QuantumNaturalGradient {
    /// Segment `circuit` and prepare the strategy.
    pub fn new(circuit: Circuit, options: QngOptions) -> QngResult<Self> {
        options.validate()?;
        let layers = segment(&circuit)?;
        if options.verify_reconstruction {
            verify_reconstruction(&layers, circuit.instructions())?;
        }
        info!(
            circuit = circuit.name(),
            layers = layers.len(),
            variables = circuit.variables().len(),
            "prepared natural gradient strategy"
        );
        Ok(Self {
            circuit,
            layers,
            options,
        })
    }

    /// The source circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// The segmentation of the source circuit.
    pub fn layers(&self) -> &[ParametrizedCircuitLayer] {
        &self.layers
    }

    /// The options in effect.
    pub fn options(&self) -> &QngOptions {
        &self.options
    }

    /// Block circuits for every layer at `values`, using the default builder.
    pub fn gradient_executions(&self, values: &[f64]) -> QngResult<Vec<BlockCircuit>> {
        self.gradient_executions_with(&PrefixBlockBuilder::from(&self.options), values)
    }

    /// Block circuits for every layer at `values`, using `builder`.
    pub fn gradient_executions_with<B: BlockBuilder + ?Sized>(
        &self,
        builder: &B,
        values: &[f64],
    ) -> QngResult<Vec<BlockCircuit>> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, layer)| -> QngResult<BlockCircuit> {
                let block = builder.build(i, layer, &self.circuit, values)?;
                debug!(
                    layer = i,
                    instructions = block.circuit.num_instructions(),
                    "built block circuit"
                );
                Ok(block)
            })
            .collect()
    }

    /// Fold measurement results into a gradient vector.
    ///
    /// The result has one entry per declared variable.
    pub fn compute<A: MetricAccumulator + ?Sized>(
        &self,
        results: &[MeasurementBuffer],
        accumulator: &A,
    ) -> QngResult<Vec<f64>> {
        let mut covered = vec![false; self.layers.len()];
        for buffer in results {
            let seen = covered.get_mut(buffer.layer_index).ok_or_else(|| {
                QngError::ResultMismatch(format!(
                    "result refers to layer {} but there are only {} layers",
                    buffer.layer_index,
                    self.layers.len()
                ))
            })?;
            *seen = true;
        }
        if let Some(missing) = covered.iter().position(|c| !c) {
            return Err(QngError::ResultMismatch(format!(
                "no results for layer {missing}"
            )));
        }

        let mut gradient = GradientVector::zeros(self.circuit.variables().len());
        accumulator.accumulate(&self.layers, results, &mut gradient)?;
        Ok(gradient.into_vec())
    }
}
