//! Benchmarks for the tessera pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::RgbaImage;

use tessera::render::{dominant, rasterize, Canvas, Compositor};
use tessera::triangulate::{triangulate, EdgeBounds, PointSampler};
use tessera::types::{Colour, Palette, Point, Triangle};

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Colour::rgb(
            ((x * 2) % 256) as u8,
            ((y * 2) % 256) as u8,
            (((x + y) * 3) % 256) as u8,
        )
        .into()
    })
}

// -- Rasterization benchmarks --

fn bench_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("raster");

    let source = gradient(256, 256);
    let small = Triangle::new(Point::new(10, 10), Point::new(30, 40), Point::new(5, 60)).sorted_by_y();
    let large =
        Triangle::new(Point::new(0, 0), Point::new(255, 120), Point::new(40, 255)).sorted_by_y();

    group.bench_function("rasterize_small", |b| {
        b.iter(|| rasterize(black_box(&small), &source))
    });

    group.bench_function("rasterize_large", |b| {
        b.iter(|| rasterize(black_box(&large), &source))
    });

    let samples = rasterize(&large, &source).colours;
    group.bench_function("dominant_large", |b| {
        b.iter(|| dominant(black_box(&samples)))
    });

    group.finish();
}

// -- Palette benchmarks --

fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");

    let spec = "0,0,0:29,43,83:126,37,83:0,135,81:171,82,54:95,87,79:194,195,199:255,241,232:\
                255,0,77:255,163,0:255,236,39:0,228,54:41,173,255:131,118,156:255,119,168:255,204,170";
    let palette = Palette::parse(spec);
    let source = gradient(128, 128);

    group.bench_function("parse", |b| b.iter(|| Palette::parse(black_box(spec))));

    group.bench_function("quantize_128", |b| {
        b.iter(|| Canvas::quantized(black_box(&source), &palette))
    });

    group.finish();
}

// -- Triangulation benchmarks --

fn bench_triangulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulation");

    let points: Vec<[i32; 2]> = (0..500)
        .map(|i| [(i * 7919) % 640, (i * 104_729) % 480])
        .collect();

    group.bench_function("delaunay_500", |b| {
        b.iter(|| triangulate(black_box(&points)))
    });

    group.bench_function("sample_random_640x480", |b| {
        b.iter(|| PointSampler::seeded(EdgeBounds::DEFAULT, 7).sample(640, 480))
    });

    group.finish();
}

// -- Compositing benchmarks --

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");
    group.sample_size(10);

    let source = gradient(320, 240);
    let palette = Palette::default();
    let triangles = PointSampler::seeded(EdgeBounds::DEFAULT, 7).sample(320, 240);

    for jobs in [1, 4] {
        group.bench_function(format!("random_320x240_jobs_{}", jobs), |b| {
            b.iter(|| {
                Compositor::new(&source, &palette)
                    .with_jobs(jobs)
                    .composite(Canvas::new(320, 240), black_box(&triangles))
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_raster, bench_palette, bench_triangulation, bench_composite);
criterion_main!(benches);
