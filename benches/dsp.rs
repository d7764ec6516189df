use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode};
use itertools_num::linspace;
use rand::prelude::*;
use zplane::dsp::engine::FilterEngine;
use zplane::dsp::StereoProcessor;
use zplane::presets::{butterworth, chebyshev_type_i, comb};

const BLOCK_SIZE: usize = 2048;

fn noise_block(seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..BLOCK_SIZE).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn bench_process(c: &mut Criterion) {
    let left = noise_block(1);
    let right = noise_block(2);
    let mut group = c.benchmark_group("process block");
    group.sample_size(100).sampling_mode(SamplingMode::Linear);
    for order in [2, 6, 12] {
        let mut engine = FilterEngine::new();
        engine.compute(butterworth(1.0, order, true).unwrap());
        group.bench_with_input(BenchmarkId::new("butterworth", order), &order, |b, _| {
            let (mut l, mut r) = (left.clone(), right.clone());
            b.iter(|| {
                engine.process_buffer_replacing(black_box(&mut l), black_box(&mut r));
            })
        });
    }

    let mut engine = FilterEngine::new();
    engine.compute(comb(-0.9, 16, false).unwrap());
    group.bench_function("comb 16", |b| {
        let (mut l, mut r) = (left.clone(), right.clone());
        b.iter(|| {
            engine.process_buffer_replacing(black_box(&mut l), black_box(&mut r));
        })
    });
    group.finish();
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    let mut engine = FilterEngine::new();
    group.bench_function("butterworth 6", |b| {
        b.iter(|| {
            let descriptor = butterworth(black_box(0.7), 6, true).unwrap();
            black_box(engine.compute(descriptor));
        })
    });
    group.bench_function("chebyshev 12", |b| {
        b.iter(|| {
            let descriptor = chebyshev_type_i(black_box(0.7), 12, 0.5, false).unwrap();
            black_box(engine.compute(descriptor));
        })
    });
    group.finish();
}

fn bench_frequency_response(c: &mut Criterion) {
    let mut engine = FilterEngine::new();
    engine.compute(chebyshev_type_i(0.4, 8, 0.5, true).unwrap());
    let mut group = c.benchmark_group("frequency response");
    for points in [128, 390, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, &points| {
            b.iter(|| black_box(engine.frequency_response(points)))
        });
    }
    // single evaluations along the upper half of the unit circle
    let omegas: Vec<f64> = linspace(0.0, std::f64::consts::PI, 64).collect();
    group.bench_function("evaluate", |b| {
        b.iter(|| {
            for &omega in &omegas {
                black_box(engine.evaluate(zplane::complex::Complex::cis(black_box(omega))));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_process, bench_compute, bench_frequency_response);
criterion_main!(benches);
