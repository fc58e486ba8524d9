//! Truth tables for arithmetic modulo small primes.

mod common;

use common::{bit, init_tracing, read, run};
use qarith_gadgets::modular::{
    controlled_mod_add, controlled_mod_add_const, controlled_negate, double,
    doubly_controlled_mod_add_const, halve, mod_add, mod_add_const, mod_sub, negate,
};
use qarith_gadgets::{Gadget, ModulusConfig, Reversible};
use qarith_ir::{Circuit, QubitAllocator, QubitId, QubitRegister};

const PRIMES: [u64; 2] = [5, 7];

struct Layout {
    cfg: ModulusConfig,
    alloc: QubitAllocator,
    x: QubitRegister,
    y: QubitRegister,
    z: QubitId,
    c1: QubitRegister,
    c2: QubitRegister,
}

impl Layout {
    fn new(p: u64) -> Self {
        let cfg = ModulusConfig::new(p).unwrap();
        let mut alloc = QubitAllocator::new();
        let x = alloc.register("x", cfg.width());
        let y = alloc.register("y", cfg.width());
        let z = alloc.ancilla().qubit();
        let c1 = QubitRegister::from_qubits(vec![alloc.qubit()]);
        let c2 = QubitRegister::from_qubits(vec![alloc.qubit()]);
        Self {
            cfg,
            alloc,
            x,
            y,
            z,
            c1,
            c2,
        }
    }

    /// Pad a circuit to the full layout so every register can be loaded.
    fn full(&self, circuit: Circuit) -> Circuit {
        circuit.widened(self.alloc.num_qubits()).unwrap()
    }
}

#[test]
fn test_mod_add_truth_table() {
    init_tracing();
    for p in PRIMES {
        let l = Layout::new(p);
        let circuit = l.full(mod_add(&l.x, &l.y, l.z, &l.cfg).unwrap());
        for a in 0..p {
            for b in 0..p {
                let sv = run(&circuit, &[(&l.x, a), (&l.y, b)]);
                assert_eq!(read(&sv, &l.y), (a + b) % p, "{a} + {b} mod {p}");
                assert_eq!(read(&sv, &l.x), a);
                assert!(!bit(&sv, l.z), "ancilla dirty for {a} + {b} mod {p}");
            }
        }
    }
}

#[test]
fn test_mod_sub_truth_table() {
    let l = Layout::new(7);
    let circuit = l.full(mod_sub(&l.x, &l.y, l.z, &l.cfg).unwrap());
    for a in 0..7 {
        for b in 0..7 {
            let sv = run(&circuit, &[(&l.x, a), (&l.y, b)]);
            assert_eq!(read(&sv, &l.y), (b + 7 - a) % 7);
            assert!(!bit(&sv, l.z));
        }
    }
}

#[test]
fn test_controlled_mod_add() {
    for p in PRIMES {
        let l = Layout::new(p);
        let circuit = l.full(controlled_mod_add(l.c1[0], &l.x, &l.y, l.z, &l.cfg).unwrap());
        for a in 0..p {
            for b in 0..p {
                for ctrl in 0..2 {
                    let sv = run(&circuit, &[(&l.x, a), (&l.y, b), (&l.c1, ctrl)]);
                    let expected = if ctrl == 1 { (a + b) % p } else { b };
                    assert_eq!(read(&sv, &l.y), expected);
                    assert!(!bit(&sv, l.z));
                }
            }
        }
    }
}

#[test]
fn test_mod_add_const_variants() {
    for p in PRIMES {
        let l = Layout::new(p);
        for value in 0..p {
            let plain = l.full(mod_add_const(&l.y, value, l.z, &l.cfg).unwrap());
            let single =
                l.full(controlled_mod_add_const(l.c1[0], &l.y, value, l.z, &l.cfg).unwrap());
            let both = l.full(
                doubly_controlled_mod_add_const(l.c1[0], l.c2[0], &l.y, value, l.z, &l.cfg)
                    .unwrap(),
            );
            for b in 0..p {
                let sum = (b + value) % p;
                let sv = run(&plain, &[(&l.y, b)]);
                assert_eq!(read(&sv, &l.y), sum);
                assert!(!bit(&sv, l.z));
                for c1 in 0..2 {
                    for c2 in 0..2 {
                        let inputs = [(&l.y, b), (&l.c1, c1), (&l.c2, c2)];
                        let sv = run(&single, &inputs);
                        assert_eq!(read(&sv, &l.y), if c1 == 1 { sum } else { b });
                        let sv = run(&both, &inputs);
                        assert_eq!(read(&sv, &l.y), if c1 & c2 == 1 { sum } else { b });
                        assert!(!bit(&sv, l.z));
                    }
                }
            }
        }
    }
}

#[test]
fn test_negate() {
    for p in PRIMES {
        let l = Layout::new(p);
        let once = l.full(negate(&l.x, l.z, &l.cfg).unwrap());
        let mut twice = once.clone();
        twice.append(&once).unwrap();
        for a in 0..p {
            let sv = run(&once, &[(&l.x, a)]);
            assert_eq!(read(&sv, &l.x), (p - a) % p, "-{a} mod {p}");
            assert!(!bit(&sv, l.z));
            let sv = run(&twice, &[(&l.x, a)]);
            assert_eq!(read(&sv, &l.x), a);
        }
        let sv = run(&once, &[(&l.x, 0)]);
        assert_eq!(read(&sv, &l.x), 0);
    }
}

#[test]
fn test_controlled_negate() {
    let l = Layout::new(7);
    let circuit = l.full(controlled_negate(l.c1[0], &l.x, l.z, &l.cfg).unwrap());
    for a in 0..7 {
        for ctrl in 0..2 {
            let sv = run(&circuit, &[(&l.x, a), (&l.c1, ctrl)]);
            let expected = if ctrl == 1 { (7 - a) % 7 } else { a };
            assert_eq!(read(&sv, &l.x), expected);
            assert!(!bit(&sv, l.z));
        }
    }
}

#[test]
fn test_double_and_halve() {
    for p in PRIMES {
        let l = Layout::new(p);
        let fwd = l.full(double(&l.x, &l.cfg).unwrap());
        let back = l.full(halve(&l.x, &l.cfg).unwrap());
        let mut roundtrip = fwd.clone();
        roundtrip.append(&back).unwrap();
        for a in 0..p {
            let sv = run(&fwd, &[(&l.x, a)]);
            assert_eq!(read(&sv, &l.x), (2 * a) % p, "2·{a} mod {p}");
            let sv = run(&roundtrip, &[(&l.x, a)]);
            assert_eq!(read(&sv, &l.x), a);
        }
    }
}

#[test]
fn test_larger_modulus_spot_checks() {
    let l = Layout::new(13);
    let add = l.full(mod_add(&l.x, &l.y, l.z, &l.cfg).unwrap());
    let dbl = l.full(double(&l.x, &l.cfg).unwrap());
    for (a, b) in [(12, 12), (6, 7), (0, 12), (9, 3)] {
        let sv = run(&add, &[(&l.x, a), (&l.y, b)]);
        assert_eq!(read(&sv, &l.y), (a + b) % 13);
        let sv = run(&dbl, &[(&l.x, a)]);
        assert_eq!(read(&sv, &l.x), (2 * a) % 13);
    }
}

#[test]
fn test_inversion_law() {
    let l = Layout::new(5);
    let gadgets = [
        mod_add(&l.x, &l.y, l.z, &l.cfg).unwrap(),
        mod_add_const(&l.y, 3, l.z, &l.cfg).unwrap(),
        negate(&l.x, l.z, &l.cfg).unwrap(),
        double(&l.y, &l.cfg).unwrap(),
    ];
    for circuit in gadgets {
        let mut roundtrip = l.full(circuit.clone());
        roundtrip.append(&circuit.invert().unwrap()).unwrap();
        for a in 0..5 {
            for b in 0..5 {
                let sv = run(&roundtrip, &[(&l.x, a), (&l.y, b)]);
                assert_eq!((read(&sv, &l.x), read(&sv, &l.y)), (a, b), "{}", circuit.name());
                assert!(!bit(&sv, l.z));
            }
        }
    }
}

#[test]
fn test_controlled_gadget_law() {
    let l = Layout::new(5);
    let (x, y, z, cfg) = (l.x.clone(), l.y.clone(), l.z, l.cfg);
    let gadget = Gadget::wrap("mod_add", move || mod_add(&x, &y, z, &cfg));
    let plain = l.full(gadget.apply().unwrap());
    let controlled = l.full(gadget.add_control(l.c1[0]).unwrap().apply().unwrap());
    for a in 0..5 {
        for b in 0..5 {
            let off = run(&controlled, &[(&l.x, a), (&l.y, b), (&l.c1, 0)]);
            assert_eq!((read(&off, &l.x), read(&off, &l.y)), (a, b));
            let on = run(&controlled, &[(&l.x, a), (&l.y, b), (&l.c1, 1)]);
            let reference = run(&plain, &[(&l.x, a), (&l.y, b)]);
            assert_eq!(read(&on, &l.y), read(&reference, &l.y));
            assert!(!bit(&on, l.z));
        }
    }
}
