//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::Instruction;
use crate::parameter::Parameter;
use crate::qubit::{ClbitId, QubitId};

/// A parameterized quantum circuit.
///
/// Instructions are kept in program order as shared immutable handles, and
/// the declared variables are kept in declaration order. A variable's
/// position in that list is its index in the gradient vector.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Instructions in program order.
    instructions: Vec<Arc<Instruction>>,
    /// Declared variable names, in declaration order.
    variables: Vec<String>,
    /// Variable name to declaration index.
    variable_lookup: FxHashMap<String, usize>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0, 0)
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
            variables: vec![],
            variable_lookup: FxHashMap::default(),
        }
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        id
    }

    /// Declare a new free variable and return its index.
    pub fn declare_variable(&mut self, name: impl Into<String>) -> IrResult<usize> {
        let name = name.into();
        if self.variable_lookup.contains_key(&name) {
            return Err(IrError::DuplicateVariable(name));
        }
        let index = self.variables.len();
        self.variable_lookup.insert(name.clone(), index);
        self.variables.push(name);
        Ok(index)
    }

    /// Declare several variables at once, in order.
    pub fn declare_variables<I, S>(&mut self, names: I) -> IrResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.declare_variable(name)?;
        }
        Ok(self)
    }

    /// Append an instruction after validating it against the circuit.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(Arc::new(instruction));
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }
        for clbit in &instruction.clbits {
            if clbit.0 >= self.num_clbits {
                return Err(IrError::ClbitNotFound { clbit: clbit.0 });
            }
        }

        if let Some(Gate::Custom(custom)) = instruction.as_gate() {
            if StandardGate::takes_parameter(&custom.name).is_some() {
                return Err(IrError::ReservedGateName(custom.name.clone()));
            }
        }

        if let Some(gate) = instruction.as_gate() {
            let got = instruction.qubits.len() as u32;
            if gate.num_qubits() != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got,
                });
            }
        }

        if let Some(variable) = instruction.variable() {
            if !self.variable_lookup.contains_key(variable) {
                return Err(IrError::UndeclaredVariable {
                    name: variable.to_string(),
                    gate_name: instruction.name().to_string(),
                });
            }
            if instruction.qubits.len() != 1 {
                return Err(IrError::MultiQubitVariable {
                    gate_name: instruction.name().to_string(),
                    variable: variable.to_string(),
                    got: instruction.qubits.len(),
                });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::SX, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: impl Into<Parameter>, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        ))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: impl Into<Parameter>, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Ry(theta.into()),
            qubit,
        ))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: impl Into<Parameter>, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: impl Into<Parameter>, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::P(theta.into()),
            qubit,
        ))
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CY, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply controlled-Rz gate with a constant angle.
    pub fn crz(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CRz(Parameter::constant(theta)),
            control,
            target,
        ))
    }

    /// Apply controlled-phase gate with a constant angle.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CP(Parameter::constant(theta)),
            control,
            target,
        ))
    }

    /// Apply RZZ gate with a constant angle.
    pub fn rzz(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::RZZ(Parameter::constant(theta)),
            q1,
            q2,
        ))
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply a custom gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure every qubit into the classical bit of the same index.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.num_clbits < self.num_qubits {
            self.add_clbit();
        }
        for i in 0..self.num_qubits {
            self.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::reset(qubit))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Get the number of instructions.
    pub fn num_instructions(&self) -> usize {
        self.instructions.len()
    }

    /// Get the instruction at `index`.
    pub fn instruction(&self, index: usize) -> Option<&Arc<Instruction>> {
        self.instructions.get(index)
    }

    /// Get all instructions in program order.
    pub fn instructions(&self) -> &[Arc<Instruction>] {
        &self.instructions
    }

    /// Get the declared variable names, in declaration order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Get the declaration index of a variable.
    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.variable_lookup.get(name).copied()
    }

    /// Check if the circuit declares any free variables.
    pub fn is_parameterized(&self) -> bool {
        !self.variables.is_empty()
    }

    /// Bind every declared variable to a value, producing a constant circuit.
    ///
    /// `values[i]` is assigned to `variables()[i]`. The result declares no
    /// variables.
    pub fn bind_parameters(&self, values: &[f64]) -> IrResult<Circuit> {
        let bindings = self.value_map(values)?;
        let mut bound = Circuit::with_size(self.name.clone(), self.num_qubits, self.num_clbits);
        for inst in &self.instructions {
            bound.apply(inst.bound(&bindings)?)?;
        }
        Ok(bound)
    }

    /// Pair each declared variable with its value.
    pub fn value_map<'a>(&'a self, values: &[f64]) -> IrResult<FxHashMap<&'a str, f64>> {
        if values.len() != self.variables.len() {
            return Err(IrError::ValueCountMismatch {
                expected: self.variables.len(),
                got: values.len(),
            });
        }
        Ok(self
            .variables
            .iter()
            .map(String::as_str)
            .zip(values.iter().copied())
            .collect())
    }
}
