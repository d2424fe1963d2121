//! Result assembly benchmarks.

use attrcache_bench::raw_items;
use attrcache_core::assemble;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Benchmark assembling result sets of growing size.
fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for rows in [1usize, 100, 1000] {
        let items = raw_items(rows, 8);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &items, |b, items| {
            b.iter(|| {
                let set = assemble(items.iter().cloned().map(Ok)).unwrap();
                black_box(set);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_assemble);
criterion_main!(benches);
