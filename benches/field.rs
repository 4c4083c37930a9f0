#[macro_use]
extern crate criterion;
extern crate mandelbrot;

use criterion::Criterion;
use mandelbrot::{generate_animation_frames, generate_field, FieldGenerator};

fn field_benchmark(c: &mut Criterion) {
    c.bench_function("field 200x200 @ 120", |b| {
        b.iter(|| generate_field(120, 200).unwrap())
    });
}

fn threaded_field_benchmark(c: &mut Criterion) {
    let generator = FieldGenerator::with_density(200).unwrap();
    c.bench_function("field 200x200 @ 120, 4 threads", move |b| {
        b.iter(|| generator.field_threaded(120, 4).unwrap())
    });
}

fn frames_benchmark(c: &mut Criterion) {
    c.bench_function("40 frames 50x50", |b| {
        b.iter(|| generate_animation_frames(50, 40).unwrap().count())
    });
}

criterion_group!(
    benches,
    field_benchmark,
    threaded_field_benchmark,
    frames_benchmark
);
criterion_main!(benches);
