//! Property-based tests for operand remapping.
//!
//! Relabelling wires by a permutation and then by its inverse must give the
//! original circuit back, and relabelling never changes the circuit's shape.

use proptest::prelude::*;
use qarith_ir::{Circuit, QubitId};

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    X(u32),
    H(u32),
    P(f64, u32),
    CX(u32, u32),
    CP(f64, u32, u32),
    Swap(u32, u32),
}

impl GateOp {
    fn apply(self, circuit: &mut Circuit) {
        match self {
            GateOp::X(q) => {
                let _ = circuit.x(QubitId(q));
            }
            GateOp::H(q) => {
                let _ = circuit.h(QubitId(q));
            }
            GateOp::P(theta, q) => {
                let _ = circuit.p(theta, QubitId(q));
            }
            GateOp::CX(c, t) => {
                let _ = circuit.cx(QubitId(c), QubitId(t));
            }
            GateOp::CP(theta, c, t) => {
                let _ = circuit.cp(theta, QubitId(c), QubitId(t));
            }
            GateOp::Swap(a, b) => {
                let _ = circuit.swap(QubitId(a), QubitId(b));
            }
        }
    }
}

/// Generate a random gate operation for a circuit with given number of qubits.
fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    let pair = (0..num_qubits, 0..num_qubits)
        .prop_filter("Operands must differ", |(a, b)| a != b);
    prop_oneof![
        (0..num_qubits).prop_map(GateOp::X),
        (0..num_qubits).prop_map(GateOp::H),
        (-3.0_f64..3.0, 0..num_qubits).prop_map(|(theta, q)| GateOp::P(theta, q)),
        pair.clone().prop_map(|(c, t)| GateOp::CX(c, t)),
        (-3.0_f64..3.0, pair.clone()).prop_map(|(theta, (c, t))| GateOp::CP(theta, c, t)),
        pair.prop_map(|(a, b)| GateOp::Swap(a, b)),
    ]
}

/// A circuit over 2-6 qubits together with a shuffled relabelling of its wires.
fn arb_circuit_and_permutation() -> impl Strategy<Value = (Circuit, Vec<u32>)> {
    (2_u32..=6).prop_flat_map(|num_qubits| {
        (
            prop::collection::vec(arb_gate_op(num_qubits), 1..=12),
            Just((0..num_qubits).collect::<Vec<u32>>()).prop_shuffle(),
        )
            .prop_map(move |(ops, perm)| {
                let mut circuit = Circuit::new("random", num_qubits);
                for op in ops {
                    op.apply(&mut circuit);
                }
                (circuit, perm)
            })
    })
}

fn invert(perm: &[u32]) -> Vec<u32> {
    let mut inverse = vec![0; perm.len()];
    for (i, &image) in perm.iter().enumerate() {
        inverse[image as usize] = i as u32;
    }
    inverse
}

proptest! {
    /// Remapping by a permutation and then by its inverse is the identity.
    #[test]
    fn test_remap_roundtrip((circuit, perm) in arb_circuit_and_permutation()) {
        let inverse = invert(&perm);
        let n = circuit.num_qubits();

        let moved = circuit
            .remap(n, |q| QubitId(perm[q.index()]))
            .expect("permuted operands stay in range");
        let back = moved
            .remap(n, |q| QubitId(inverse[q.index()]))
            .expect("inverse permutation stays in range");

        prop_assert_eq!(back.instructions(), circuit.instructions());
        prop_assert_eq!(back.num_qubits(), n);
    }

    /// Relabelling wires keeps gate counts and depth.
    #[test]
    fn test_remap_preserves_shape((circuit, perm) in arb_circuit_and_permutation()) {
        let moved = circuit
            .remap(circuit.num_qubits(), |q| QubitId(perm[q.index()]))
            .expect("permuted operands stay in range");

        prop_assert_eq!(moved.len(), circuit.len());
        prop_assert_eq!(moved.gate_counts(), circuit.gate_counts());
        prop_assert_eq!(moved.depth(), circuit.depth());
    }

    /// Embedding at permuted positions is the same as remapping.
    #[test]
    fn test_embed_matches_remap((circuit, perm) in arb_circuit_and_permutation()) {
        let n = circuit.num_qubits();
        let positions: Vec<QubitId> = perm.iter().map(|&q| QubitId(q)).collect();

        let mut outer = Circuit::new("outer", n);
        outer.embed(&circuit, &positions).expect("positions cover every wire");
        let moved = circuit
            .remap(n, |q| positions[q.index()])
            .expect("permuted operands stay in range");

        prop_assert_eq!(outer.instructions(), moved.instructions());
    }
}
