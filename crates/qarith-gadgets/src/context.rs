//! Compute/uncompute scopes.

use qarith_ir::Circuit;

use crate::error::{SynthResult, SynthesisError};
use crate::inverse::inverse_instruction;

/// Marks a section of a circuit so it can be undone later.
///
/// The usual shape is a conjugation: compute into scratch space, use the
/// result, then uncompute so the scratch space is clean again.
///
/// ```rust
/// use qarith_gadgets::UncomputeContext;
/// use qarith_ir::{Circuit, QubitId};
///
/// let mut circuit = Circuit::new("conj", 2);
/// let mut ctx = UncomputeContext::begin(&circuit);
/// circuit.x(QubitId(0)).unwrap();
/// ctx.seal(&circuit);
/// circuit.cx(QubitId(0), QubitId(1)).unwrap();
/// ctx.uncompute(&mut circuit).unwrap();
/// assert_eq!(circuit.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct UncomputeContext {
    /// Instruction count when the scope opened.
    start: usize,
    /// Instruction count when the compute section closed.
    end: Option<usize>,
    /// Label for this context (debugging).
    label: Option<String>,
}

impl UncomputeContext {
    /// Open a scope at the current end of `circuit`.
    pub fn begin(circuit: &Circuit) -> Self {
        Self {
            start: circuit.len(),
            end: None,
            label: None,
        }
    }

    /// Add a label to this context (for debugging).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Close the compute section at the current end of `circuit`.
    pub fn seal(&mut self, circuit: &Circuit) {
        self.end = Some(circuit.len());
    }

    /// Number of instructions in the compute section so far.
    pub fn compute_len(&self, circuit: &Circuit) -> usize {
        self.end.unwrap_or(circuit.len()).saturating_sub(self.start)
    }

    /// Append the inverse of the compute section.
    ///
    /// An unsealed scope is sealed at the current end first.
    pub fn uncompute(self, circuit: &mut Circuit) -> SynthResult<()> {
        let len = circuit.len();
        let end = self.end.unwrap_or(len);
        let section = circuit
            .instructions()
            .get(self.start..end)
            .ok_or(SynthesisError::ScopeMismatch {
                start: self.start,
                end,
                len,
            })?
            .iter()
            .rev()
            .map(inverse_instruction)
            .collect::<Vec<_>>();
        for inst in section {
            circuit.push(inst)?;
        }
        Ok(())
    }
}
