//! Symbol interning benchmarks.
//!
//! Run with: `cargo bench --bench symbol_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fspl_util::symbol::Symbol;

fn bench_intern(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern");
    group.throughput(Throughput::Elements(1));

    group.bench_function("intern_new_string", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            Symbol::intern(&format!("NEW_VAR_{counter}"))
        })
    });

    group.bench_function("intern_existing_string", |b| {
        let _sym = Symbol::intern("EXISTING_VAR");
        b.iter(|| black_box(Symbol::intern("EXISTING_VAR")))
    });

    group.bench_function("intern_reserved_word", |b| {
        b.iter(|| black_box(Symbol::intern("PROCEDURE")))
    });

    group.finish();
}

fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison");
    group.throughput(Throughput::Elements(1));

    let sym1 = Symbol::intern("TOTAL");
    let sym2 = Symbol::intern("TOTAL");
    let sym3 = Symbol::intern("COUNT");

    group.bench_function("symbol_eq_symbol", |b| {
        b.iter(|| {
            black_box(sym1 == sym2);
            black_box(sym1 == sym3);
        })
    });

    group.bench_function("symbol_eq_str", |b| {
        b.iter(|| {
            black_box(sym1.eq_str("TOTAL"));
            black_box(sym1.eq_str("COUNT"));
        })
    });

    group.finish();
}

fn bench_string_retrieval(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_retrieval");
    group.throughput(Throughput::Elements(1));

    let sym = Symbol::intern("RUNNING_TOTAL");

    group.bench_function("as_str", |b| b.iter(|| black_box(sym.as_str())));
    group.bench_function("to_string", |b| b.iter(|| black_box(sym.to_string())));

    group.finish();
}

fn bench_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("varying_sizes");

    for &size in &[1, 10, 100, 1000] {
        let string = "A".repeat(size);
        group.bench_with_input(BenchmarkId::new("intern", size), &string, |b, s| {
            b.iter(|| black_box(Symbol::intern(s)))
        });
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    for i in 0..1000 {
        let _ = Symbol::intern(&format!("PREFILL_{i}"));
    }

    c.bench_function("stats", |b| b.iter(|| black_box(Symbol::stats())));
}

criterion_group!(
    benches,
    bench_intern,
    bench_comparison,
    bench_string_retrieval,
    bench_varying_sizes,
    bench_statistics,
);
criterion_main!(benches);
