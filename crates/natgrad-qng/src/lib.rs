//! `natgrad-qng`: layering for the block-diagonal quantum natural gradient.
//!
//! The quantum natural gradient preconditions the ordinary gradient with the
//! inverse of the parameter-space metric (the quantum Fisher information).
//! The block-diagonal approximation evaluates that metric one block at a
//! time, where a block is a run of the circuit in which every qubit carries
//! at most one variable-bound rotation.
//!
//! This crate provides:
//!
//! - [`segment`]: split a circuit into [`ParametrizedCircuitLayer`]s
//! - [`generator_of`]: the Pauli generator of an `rx`/`ry`/`rz` rotation
//! - [`QuantumNaturalGradient`]: block circuits per layer and the
//!   [`MetricAccumulator`] boundary that turns results into a gradient
//!
//! # Quick start
//!
//! ```rust
//! use natgrad_ir::{Circuit, QubitId};
//! use natgrad_qng::segment;
//!
//! let mut circuit = Circuit::with_size("ansatz", 2, 0);
//! circuit.declare_variables(["a", "b", "c"]).unwrap();
//! circuit
//!     .rx("a", QubitId(0)).unwrap()
//!     .ry("b", QubitId(1)).unwrap()
//!     .cx(QubitId(0), QubitId(1)).unwrap()
//!     .rx("c", QubitId(0)).unwrap();
//!
//! let layers = segment(&circuit).unwrap();
//! assert_eq!(layers.len(), 2);
//! assert_eq!(layers[0].param_indices(), &[0, 1]);
//! assert_eq!(layers[1].param_indices(), &[2]);
//! assert_eq!(layers[1].pre_ops().len(), 3);
//! ```

pub mod error;
pub mod generator;
pub mod layer;
pub mod options;
pub mod segment;
pub mod strategy;

pub use error::{QngError, QngResult};
pub use generator::{GENERATOR_COEFF, Generator, PauliOp, generator_of};
pub use layer::{LayerSummary, ParametrizedCircuitLayer};
pub use options::QngOptions;
pub use segment::{segment, verify_reconstruction};
pub use strategy::{
    BlockBuilder, BlockCircuit, GradientVector, MeasurementBuffer, MetricAccumulator,
    PrefixBlockBuilder, QuantumNaturalGradient,
};
