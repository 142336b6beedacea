use aismatch::assignment::solve;
use aismatch::AssignmentStrategy;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use rand::prelude::*;

fn random_cost_matrix(contacts: usize, detections: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    Array2::from_shape_fn((contacts, detections), |_| rng.gen_range(0.0..500.0))
}

fn bench_exact_small(c: &mut Criterion) {
    let costs = random_cost_matrix(10, 10);

    c.bench_function("exact_10x10", |b| {
        b.iter(|| solve(black_box(costs.view()), AssignmentStrategy::Exact))
    });
}

fn bench_exact_medium(c: &mut Criterion) {
    let costs = random_cost_matrix(50, 50);

    c.bench_function("exact_50x50", |b| {
        b.iter(|| solve(black_box(costs.view()), AssignmentStrategy::Exact))
    });
}

fn bench_greedy_medium(c: &mut Criterion) {
    let costs = random_cost_matrix(50, 50);

    c.bench_function("greedy_50x50", |b| {
        b.iter(|| solve(black_box(costs.view()), AssignmentStrategy::Greedy))
    });
}

fn bench_exact_rectangular(c: &mut Criterion) {
    // More contacts on the feed than ships in view, the common case
    let costs = random_cost_matrix(80, 20);

    c.bench_function("exact_80x20", |b| {
        b.iter(|| solve(black_box(costs.view()), AssignmentStrategy::Exact))
    });
}

criterion_group!(
    benches,
    bench_exact_small,
    bench_exact_medium,
    bench_greedy_medium,
    bench_exact_rectangular
);
criterion_main!(benches);
