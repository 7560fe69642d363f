use chisquare::{critical_value, run_test, ContingencyTable};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn solver_benchmarks(c: &mut Criterion) {
    let mut solver = c.benchmark_group("Critical Value");
    solver.bench_function("closed form dof 1", |b| {
        b.iter(|| critical_value(black_box(0.05), black_box(1.0)).unwrap())
    });
    solver.bench_function("refined dof 12", |b| {
        b.iter(|| critical_value(black_box(0.05), black_box(12.0)).unwrap())
    });
    solver.bench_function("single step dof 60", |b| {
        b.iter(|| critical_value(black_box(0.05), black_box(60.0)).unwrap())
    });
    solver.finish();
}

pub fn pipeline_benchmarks(c: &mut Criterion) {
    let rows: Vec<String> = (0..8).map(|i| format!("site{}", i)).collect();
    let cols: Vec<String> = (0..6).map(|j| format!("grade{}", j)).collect();
    let data: Vec<Vec<f64>> = (0..8)
        .map(|i| (0..6).map(|j| ((i * 7 + j * 13) % 50 + 10) as f64).collect())
        .collect();
    let table = ContingencyTable::new(rows, cols, data).unwrap();

    c.bench_function("Run Test 8x6", |b| b.iter(|| run_test(black_box(&table), 0.05).unwrap()));
}

criterion_group!(benches, solver_benchmarks, pipeline_benchmarks);
criterion_main!(benches);
