//! Benchmarks for circuit construction and composition
//!
//! Run with: cargo bench -p qarith-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qarith_ir::{Circuit, QubitId};
use std::f64::consts::PI;

/// Phase ladder like the one a Fourier transform emits.
fn phase_ladder(n: u32) -> Circuit {
    let mut circuit = Circuit::new("ladder", n);
    for i in (0..n).rev() {
        circuit.h(QubitId(i)).unwrap();
        for j in 0..i {
            circuit
                .cp(PI / f64::from(1_u32 << (i - j)), QubitId(j), QubitId(i))
                .unwrap();
        }
    }
    circuit
}

fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    group.bench_function("cx_gate", |b| {
        let mut circuit = Circuit::new("bench", 10);
        b.iter(|| {
            circuit.cx(black_box(QubitId(0)), black_box(QubitId(1))).unwrap();
        });
    });

    group.bench_function("ccp_decomposition", |b| {
        let mut circuit = Circuit::new("bench", 10);
        b.iter(|| {
            circuit
                .ccp(black_box(PI / 8.0), QubitId(0), QubitId(1), QubitId(2))
                .unwrap();
        });
    });

    group.finish();
}

fn bench_composition(c: &mut Criterion) {
    let mut group = c.benchmark_group("composition");

    for n in &[4_u32, 8, 16] {
        let ladder = phase_ladder(*n);
        let positions: Vec<QubitId> = (0..*n).map(|i| QubitId(2 * i)).collect();
        group.bench_with_input(BenchmarkId::new("embed", n), n, |b, &n| {
            b.iter(|| {
                let mut outer = Circuit::new("outer", 2 * n);
                outer.embed(black_box(&ladder), &positions).unwrap();
                outer
            });
        });
        group.bench_with_input(BenchmarkId::new("depth", n), &ladder, |b, ladder| {
            b.iter(|| black_box(ladder).depth());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gate_addition, bench_composition);
criterion_main!(benches);
