//! Benchmarks for per-pixel shading and full-frame rendering.
//!
//! Run with: cargo bench --bench shade_bench

use std::hint::black_box;

use aurora_engine::cpu::{render_with, FrameShader};
use aurora_engine::noise::{noise2, noise3};
use aurora_engine::{FrameContext, RenderParams, Vec2, Vec3};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("aurora/noise");
    group.bench_function("noise2", |b| {
        b.iter(|| black_box(noise2(black_box(Vec2::new(3.7, -1.2)), 1.0, 1.0)))
    });
    group.bench_function("noise3", |b| {
        b.iter(|| black_box(noise3(black_box(Vec3::new(3.7, -1.2, 8.4)), 1.0, 1.0)))
    });
    group.finish();
}

fn bench_shade(c: &mut Criterion) {
    let mut group = c.benchmark_group("aurora/shade");
    for steps in [32, 128] {
        let params = RenderParams {
            ray_march_steps: steps,
            ..RenderParams::default()
        };
        let shader = match FrameShader::new(FrameContext::new(160, 90, 1.5), params) {
            Ok(shader) => shader,
            Err(err) => panic!("invalid bench setup: {err}"),
        };
        group.bench_function(format!("pixel_steps_{steps}"), |b| {
            b.iter(|| black_box(shader.shade(black_box(Vec2::new(80.5, 45.5)))))
        });
    }
    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("aurora/frame");
    group.sample_size(10);
    for (width, height) in [(80, 45), (160, 90)] {
        let shader = match FrameShader::new(
            FrameContext::new(width, height, 2.0),
            RenderParams::default(),
        ) {
            Ok(shader) => shader,
            Err(err) => panic!("invalid bench setup: {err}"),
        };
        group.bench_function(format!("render_{width}x{height}"), |b| {
            b.iter(|| black_box(render_with(black_box(&shader))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_noise, bench_shade, bench_frame);
criterion_main!(benches);
