//! Benchmarks for hazard-graph construction and scheduling
//!
//! Run with: cargo bench -p qsched-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qsched_core::{
    AlapScheduler, AsapScheduler, HazardGraphBuilder, Scheduler, SchedulingPass,
    TopologicalOrderer,
};
use qsched_ir::{Circuit, QubitId};

/// Single-qubit chain: every gate depends on the previous one.
fn chain_circuit(depth: u32) -> Circuit {
    let mut circuit = Circuit::with_size("chain", 1);
    for i in 0..depth {
        if i % 2 == 0 {
            circuit.h(QubitId(0)).unwrap();
        } else {
            circuit.t(QubitId(0)).unwrap();
        }
    }
    circuit
}

/// CNOT ladder repeated `layers` times over `n` qubits.
fn ladder_circuit(n: u32, layers: u32) -> Circuit {
    let mut circuit = Circuit::with_size("ladder", n);
    for _ in 0..layers {
        for q in 0..n {
            circuit.h(QubitId(q)).unwrap();
        }
        for q in 0..n - 1 {
            circuit.cx(QubitId(q), QubitId(q + 1)).unwrap();
        }
    }
    circuit
}

/// Benchmark graph construction
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for depth in &[10, 100, 1000] {
        let circuit = chain_circuit(*depth);
        group.bench_with_input(BenchmarkId::new("chain", depth), &circuit, |b, circuit| {
            b.iter(|| {
                HazardGraphBuilder::new(1)
                    .build(black_box(circuit.instructions()))
                    .unwrap()
            });
        });
    }

    for num_qubits in &[5, 20, 50] {
        let circuit = ladder_circuit(*num_qubits, 10);
        group.bench_with_input(
            BenchmarkId::new("ladder", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    HazardGraphBuilder::new(circuit.num_qubits())
                        .build(black_box(circuit.instructions()))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark ordering plus both passes on a prebuilt graph
fn bench_passes(c: &mut Criterion) {
    let mut group = c.benchmark_group("passes");

    for num_qubits in &[5, 20, 50] {
        let circuit = ladder_circuit(*num_qubits, 10);
        let graph = HazardGraphBuilder::new(circuit.num_qubits())
            .build(circuit.instructions())
            .unwrap();
        let order = TopologicalOrderer.order(&graph).unwrap();

        group.bench_with_input(BenchmarkId::new("order", num_qubits), &graph, |b, graph| {
            b.iter(|| TopologicalOrderer.order(black_box(graph)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("asap", num_qubits), &graph, |b, graph| {
            b.iter(|| AsapScheduler.schedule(black_box(graph), &order).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("alap", num_qubits), &graph, |b, graph| {
            b.iter(|| AlapScheduler.schedule(black_box(graph), &order).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the full analysis pipeline
fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let scheduler = Scheduler::new();

    for num_qubits in &[5, 20, 50] {
        let circuit = ladder_circuit(*num_qubits, 10);
        group.bench_with_input(
            BenchmarkId::new("ladder", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    scheduler
                        .analyze(black_box(circuit.instructions()), circuit.num_qubits())
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_passes, bench_analyze);
criterion_main!(benches);
