//! Benchmarks for the bytecode pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_pipeline(c: &mut Criterion) {
    let source = "1 + 2 * 3 - 4 / 5 % 6 << 2 >> 1 == 7 && true || false;";

    c.bench_function("tokenize", |b| {
        b.iter(|| janky::tokenize(black_box(source)).unwrap())
    });

    c.bench_function("parse", |b| {
        b.iter(|| janky::parse(black_box(source)).unwrap())
    });

    c.bench_function("compile", |b| {
        b.iter(|| janky::compile(black_box(source)).unwrap())
    });

    c.bench_function("compile_and_run", |b| {
        let bytecode = janky::compile(source).unwrap();
        b.iter(|| {
            let mut vm = janky::vm::Vm::new(black_box(bytecode.clone()));
            vm.run().unwrap();
            vm.output
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
