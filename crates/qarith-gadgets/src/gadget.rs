//! Opaque, invertible, controllable circuit units.

use std::fmt;
use std::sync::Arc;

use qarith_ir::{Circuit, QubitId, QubitRegister, check_disjoint};

use crate::control::controlled_circuit;
use crate::error::{SynthResult, SynthesisError};
use crate::inverse::inverse_circuit;

/// The two transforms every reversible unit supports.
pub trait Reversible: Sized {
    /// The exact inverse.
    fn invert(&self) -> SynthResult<Self>;

    /// The same operation, applied only when `control` is 1.
    fn add_control(&self, control: QubitId) -> SynthResult<Self>;
}

impl Reversible for Circuit {
    fn invert(&self) -> SynthResult<Self> {
        inverse_circuit(self)
    }

    fn add_control(&self, control: QubitId) -> SynthResult<Self> {
        controlled_circuit(self, control)
    }
}

type BuildFn = Arc<dyn Fn() -> SynthResult<Circuit> + Send + Sync>;

#[derive(Clone)]
enum Strategy {
    /// Run a construction function, transform gate by gate.
    Structural(BuildFn),
    /// A dense classical block over one register.
    Lookup {
        register: QubitRegister,
        table: Arc<[u64]>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transform {
    Invert,
    Control(QubitId),
}

/// A named circuit construction treated as one reversible operation.
///
/// A gadget records transforms instead of applying them, so `invert` and
/// `add_control` are cheap and nest freely; [`Gadget::apply`] materialises
/// the circuit. Whether a gadget is backed by a construction function or a
/// lookup table is invisible to callers.
#[derive(Clone)]
pub struct Gadget {
    name: String,
    strategy: Strategy,
    transforms: Vec<Transform>,
}

impl Gadget {
    /// Package a pure construction function.
    pub fn wrap<F>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn() -> SynthResult<Circuit> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            strategy: Strategy::Structural(Arc::new(build)),
            transforms: vec![],
        }
    }

    /// Package a permutation of `register`'s basis states.
    ///
    /// The table is checked when the gadget is applied.
    pub fn lookup(name: impl Into<String>, register: QubitRegister, table: Vec<u64>) -> Self {
        Self {
            name: name.into(),
            strategy: Strategy::Lookup {
                register,
                table: table.into(),
            },
            transforms: vec![],
        }
    }

    /// Gadget name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if this gadget is backed by a lookup table.
    pub fn is_lookup(&self) -> bool {
        matches!(self.strategy, Strategy::Lookup { .. })
    }

    /// Build the circuit, then apply recorded transforms in order.
    pub fn apply(&self) -> SynthResult<Circuit> {
        let mut circuit = match &self.strategy {
            Strategy::Structural(build) => build()?,
            Strategy::Lookup { register, table } => {
                let mut circuit = Circuit::new(self.name.clone(), operand_span(&[register], &[]));
                circuit.permutation(register.qubits(), table.to_vec())?;
                circuit
            }
        };
        for transform in &self.transforms {
            circuit = match *transform {
                Transform::Invert => circuit.invert()?,
                Transform::Control(control) => circuit.add_control(control)?,
            };
        }
        circuit.set_name(self.name.clone());
        Ok(circuit)
    }

    fn with_transform(&self, transform: Transform, suffix: &str) -> Self {
        let mut next = self.clone();
        next.name = format!("{}{suffix}", self.name);
        next.transforms.push(transform);
        next
    }
}

impl Reversible for Gadget {
    fn invert(&self) -> SynthResult<Self> {
        Ok(self.with_transform(Transform::Invert, "_inv"))
    }

    fn add_control(&self, control: QubitId) -> SynthResult<Self> {
        Ok(self.with_transform(Transform::Control(control), &format!("_c{}", control.0)))
    }
}

impl fmt::Debug for Gadget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gadget")
            .field("name", &self.name)
            .field("lookup", &self.is_lookup())
            .field("transforms", &self.transforms)
            .finish()
    }
}

/// Circuit width needed to address every operand.
pub(crate) fn operand_span(registers: &[&QubitRegister], qubits: &[QubitId]) -> u32 {
    registers
        .iter()
        .filter_map(|r| r.max_index())
        .chain(qubits.iter().map(|q| q.0))
        .max()
        .map_or(0, |m| m + 1)
}

/// Reject operands sharing a wire.
pub(crate) fn ensure_disjoint(registers: &[&QubitRegister], qubits: &[QubitId]) -> SynthResult<()> {
    check_disjoint(registers, qubits).map_err(SynthesisError::from)
}

/// Reject a register whose width is not `expected`.
pub(crate) fn ensure_width(
    operation: &'static str,
    register: &QubitRegister,
    expected: usize,
) -> SynthResult<()> {
    if register.len() != expected {
        return Err(SynthesisError::DimensionMismatch {
            operation,
            expected,
            got: register.len(),
        });
    }
    Ok(())
}
