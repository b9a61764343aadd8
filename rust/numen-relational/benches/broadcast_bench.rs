use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use numen_core::{Decimal, Value};
use numen_relational::Engine;

fn numbers(len: usize) -> Value {
    Value::array((0..len).map(|i| Value::Number(i as f64 * 0.5)).collect()).unwrap()
}

fn decimals(len: usize) -> Value {
    Value::array(
        (0..len)
            .map(|i| Value::Precise(Decimal::new(i as i64 * 5, 1)))
            .collect(),
    )
    .unwrap()
}

fn broadcast_benchmark(c: &mut Criterion) {
    let engine = Engine::new();
    let mut group = c.benchmark_group("smaller_broadcast");

    for len in [16usize, 1024, 65536] {
        let floats = numbers(len);
        let exact = decimals(len);
        let pivot = Value::Number(len as f64 / 4.0);

        // Collection against a scalar
        group.bench_with_input(BenchmarkId::new("scalar", len), &floats, |b, xs| {
            b.iter(|| black_box(engine.smaller(&[xs.clone(), pivot.clone()]).unwrap()));
        });

        // Pairwise, both sides floats
        group.bench_with_input(BenchmarkId::new("pairwise_float", len), &floats, |b, xs| {
            b.iter(|| black_box(engine.smaller(&[xs.clone(), xs.clone()]).unwrap()));
        });

        // Pairwise with float to decimal promotion on every element
        group.bench_with_input(BenchmarkId::new("pairwise_mixed", len), &floats, |b, xs| {
            b.iter(|| black_box(engine.smaller(&[xs.clone(), exact.clone()]).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, broadcast_benchmark);
criterion_main!(benches);
