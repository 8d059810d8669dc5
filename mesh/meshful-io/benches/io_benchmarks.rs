//! Benchmarks for meshful-io codecs.
//!
//! Run with: cargo bench -p meshful-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p meshful-io -- --save-baseline main
//! 2. After changes: cargo bench -p meshful-io -- --baseline main

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use meshful_io::{decode, encode, encode_ascii, write_obj};
use meshful_types::{Mesh, Triangle, Vec3};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Latitude/longitude sphere as a triangle soup.
fn create_sphere(rings: u32, segments: u32) -> Mesh {
    let point = |ring: u32, segment: u32| {
        let theta = std::f32::consts::PI * ring as f32 / rings as f32;
        let phi = std::f32::consts::TAU * segment as f32 / segments as f32;
        Vec3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos())
    };

    let mut triangles = Vec::new();
    for ring in 0..rings {
        for segment in 0..segments {
            let a = point(ring, segment);
            let b = point(ring + 1, segment);
            let c = point(ring + 1, segment + 1);
            let d = point(ring, segment + 1);
            for vertices in [[a, b, c], [a, c, d]] {
                let tri = Triangle::new(vertices, Vec3::zero());
                triangles.push(Triangle::new(vertices, tri.computed_normal().unwrap_or_default()));
            }
        }
    }
    Mesh::new(triangles)
}

// =============================================================================
// Codec Benchmarks
// =============================================================================

fn bench_stl(c: &mut Criterion) {
    let mut group = c.benchmark_group("STL");

    let sphere = create_sphere(64, 128); // ~16k triangles
    let mut binary = Vec::new();
    encode(&sphere, &mut binary).expect("failed to encode STL");

    group.throughput(Throughput::Elements(sphere.len() as u64));

    group.bench_function("decode_binary", |b| {
        b.iter(|| decode(black_box(binary.as_slice())));
    });

    group.bench_function("encode_binary", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(binary.len());
            encode(black_box(&sphere), &mut out)
        });
    });

    let mut ascii = Vec::new();
    encode_ascii(&sphere, &mut ascii, "sphere").expect("failed to encode ASCII STL");

    group.bench_function("decode_ascii", |b| {
        b.iter(|| decode(black_box(ascii.as_slice())));
    });

    group.finish();
}

fn bench_obj(c: &mut Criterion) {
    let mut group = c.benchmark_group("OBJ");

    let sphere = create_sphere(64, 128);
    group.throughput(Throughput::Elements(sphere.len() as u64));

    group.bench_function("write_obj", |b| {
        b.iter(|| {
            let mut obj = Vec::new();
            let mut mtl = Vec::new();
            write_obj(black_box(&sphere), &mut obj, &mut mtl, Some("sphere.mtl"))
        });
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_stl, bench_obj);
criterion_main!(benches);
