use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::f32::consts::PI;

use range_segmentation::core::image::DepthImage;
use range_segmentation::projection::{ProjectionParams, SpanParams};
use range_segmentation::segmentation::{
    compute_labels, filter_clusters, repair_depth, DepthGroundRemover,
};

fn sweep_params() -> ProjectionParams {
    let h = SpanParams::new(-PI, PI, 870).unwrap();
    let v = SpanParams::new((-24.0f32).to_radians(), 2.0f32.to_radians(), 64).unwrap();
    ProjectionParams::new(h, v)
}

/// Deterministic sweep with a few depth discontinuities and holes.
fn synthetic_sweep(params: &ProjectionParams) -> DepthImage {
    let (rows, cols) = (params.rows(), params.cols());
    let mut depth = DepthImage::zeros(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            let object = ((c / 29) % 3) as f32;
            let value = 5.0 + object * 7.0 + (r % 7) as f32 * 0.05;
            if (r * 31 + c * 17) % 97 == 0 {
                continue; // missing return
            }
            depth.set(r, c, value);
        }
    }
    depth
}

fn bench_ground_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ground Removal");
    let params = sweep_params();
    let depth = synthetic_sweep(&params);

    group.bench_function("repair_depth", |b| {
        b.iter(|| repair_depth(black_box(&depth), 5, 1.0))
    });

    let remover = DepthGroundRemover::new(params, 5, 5.0f32.to_radians()).unwrap();
    group.bench_function("remove_ground_64x870", |b| {
        b.iter(|| remover.remove_ground(black_box(&depth)).unwrap())
    });

    group.finish();
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("Clustering");
    let params = sweep_params();
    let depth = synthetic_sweep(&params);
    let threshold = 10.0f32.to_radians();

    group.bench_function("compute_labels_64x870", |b| {
        b.iter(|| compute_labels(black_box(&depth), &params, threshold).unwrap())
    });

    let labels = compute_labels(&depth, &params, threshold).unwrap();
    group.bench_function("filter_clusters", |b| {
        b.iter(|| filter_clusters(black_box(&labels), 10, 3000))
    });

    group.finish();
}

criterion_group!(benches, bench_ground_removal, bench_clustering);
criterion_main!(benches);
