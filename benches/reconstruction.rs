//! Benchmarks for the reconstruction core
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nalgebra::DMatrix;
use tomovis_rs::engine::ellipse_phantom;
use tomovis_rs::recon::algorithm::project;
use tomovis_rs::{clim, ArtRecon, ProjectionWindow, ReconAlgorithm, ReconOptions};

fn bench_window_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_put");

    for size in [8usize, 32, 128].iter() {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("put_at_capacity", size), size, |b, &size| {
            let mut win = ProjectionWindow::new(size).unwrap();
            let proj = DMatrix::from_element(1, 94, 1.0);
            let mut seq = 0usize;
            // Pre-fill so every put wraps
            for _ in 0..size {
                win.put(seq, proj.clone(), 0.0).unwrap();
                seq += 1;
            }
            b.iter(|| {
                let view = win.put(seq, black_box(proj.clone()), 0.1).unwrap();
                seq += 1;
                black_box(view.len())
            });
        });
    }

    group.finish();
}

fn bench_clim(c: &mut Criterion) {
    let mut group = c.benchmark_group("clim");

    for side in [64usize, 256].iter() {
        let image = DMatrix::from_fn(*side, *side, |r, c| ((r * c) as f64).sin());
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::new("min_max", side), &image, |b, image| {
            b.iter(|| black_box(clim(image)));
        });
    }

    group.finish();
}

fn bench_forward_projection(c: &mut Criterion) {
    let phantom = ellipse_phantom(64);

    c.bench_function("project_64_to_94", |b| {
        b.iter(|| black_box(project(&phantom, black_box(0.7), 94)));
    });
}

fn bench_art_event(c: &mut Criterion) {
    let mut group = c.benchmark_group("art_event");
    group.sample_size(20);

    let phantom = ellipse_phantom(64);
    let options = ReconOptions::for_grid(64, 64);
    let art = ArtRecon;

    for window in [1usize, 8].iter() {
        let projections: Vec<DMatrix<f64>> = (0..*window)
            .map(|i| project(&phantom, i as f64 * 0.2, 94))
            .collect();
        let angles: Vec<f64> = (0..*window).map(|i| i as f64 * 0.2).collect();
        let init = DMatrix::from_element(64, 64, 1e-6);

        group.bench_with_input(
            BenchmarkId::new("reconstruct", window),
            &(projections, angles),
            |b, (projections, angles)| {
                b.iter(|| {
                    black_box(
                        art.reconstruct(projections, angles, &options, &init)
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_window_put,
    bench_clim,
    bench_forward_projection,
    bench_art_event,
);

criterion_main!(benches);
