// Integration tests for the projection model, the β-angle metric and the
// flood-fill labeler.

use std::f32::consts::{FRAC_PI_2, PI};

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use range_segmentation::core::image::DepthImage;
use range_segmentation::core::types::PixelCoord;
use range_segmentation::error::Error;
use range_segmentation::projection::{ProjectionParams, SpanParams};
use range_segmentation::segmentation::{compute_labels, filter_clusters, AngleDiff};

fn quarter_turn_params() -> ProjectionParams {
    let h = SpanParams::new((-45.0f32).to_radians(), 45.0f32.to_radians(), 328).unwrap();
    let v = SpanParams::new((-30.0f32).to_radians(), 30.0f32.to_radians(), 64).unwrap();
    ProjectionParams::new(h, v)
}

fn full_turn_params(rows: usize, cols: usize) -> ProjectionParams {
    let h = SpanParams::new(-PI, PI, cols).unwrap();
    let v = SpanParams::new((-24.0f32).to_radians(), 2.0f32.to_radians(), rows).unwrap();
    ProjectionParams::new(h, v)
}

fn random_depth(rows: usize, cols: usize, seed: u64) -> DepthImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let arr = Array2::from_shape_fn((rows, cols), |_| rng.gen::<f32>());
    DepthImage::from_array2(arr)
}

/// Number of distinct non-zero labels in an image.
fn count_clusters(labels: &range_segmentation::core::image::LabelImage) -> usize {
    let mut seen: Vec<u16> = labels.data().iter().copied().filter(|&l| l > 0).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

#[test]
fn test_pixel_coord_addition() {
    let x = PixelCoord::new(1, 2);
    let y = PixelCoord::new(-1, 3);
    assert_eq!(x + y, PixelCoord::new(0, 5));
}

#[test]
fn test_projection_angle_lookups() {
    let params = quarter_turn_params();
    assert_eq!(params.rows(), 64);
    assert_eq!(params.cols(), 328);
    assert_eq!(params.size(), 64 * 328);

    let targets = [
        (params.angle_from_col(0), -0.785398),
        (params.angle_from_col(164), 0.0),
        (params.angle_from_col(327), 0.780607),
        (params.angle_from_row(0), -0.523597),
        (params.angle_from_row(63), 0.507236),
    ];
    for (actual, expected) in targets {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }
}

#[test]
fn test_alpha_wrap_entry() {
    // The wrap entry is the residual step closing the azimuth circle; for
    // a span covering a full turn it is (minus) one regular step, and it
    // never turns positive when the span over-covers 2π.
    let depth = DepthImage::filled(4, 360, 1.0);
    let exact = ProjectionParams::new(
        SpanParams::new(-PI, PI, 360).unwrap(),
        SpanParams::new((-10.0f32).to_radians(), 10.0f32.to_radians(), 4).unwrap(),
    );
    let diff = AngleDiff::new(&depth, &exact).unwrap();
    let step = 2.0 * PI / 360.0;
    let wrap = diff.col_alphas()[359];
    assert!(wrap <= 0.0);
    assert!((wrap + step).abs() < 1e-3);

    let over = ProjectionParams::new(
        SpanParams::new(-PI, PI + 0.05, 360).unwrap(),
        SpanParams::new((-10.0f32).to_radians(), 10.0f32.to_radians(), 4).unwrap(),
    );
    let diff = AngleDiff::new(&depth, &over).unwrap();
    assert!(diff.col_alphas()[359] <= 0.0);
}

#[test]
fn test_beta_tables_are_bounded() {
    let params = quarter_turn_params();
    let depth = random_depth(64, 328, 7);
    let diff = AngleDiff::new(&depth, &params).unwrap();

    for table in [diff.beta_rows(), diff.beta_cols()] {
        for &b in table.data() {
            assert!((0.0..=FRAC_PI_2 + 1e-5).contains(&b), "β out of range: {b}");
        }
    }
}

#[test]
fn test_constant_image_forms_one_cluster() {
    let params = quarter_turn_params();
    let depth = DepthImage::filled(64, 328, 10.0);
    let labels = compute_labels(&depth, &params, 10.0f32.to_radians()).unwrap();

    assert_eq!(labels.shape(), (64, 328));
    assert!(labels.data().iter().all(|&l| l == 1));
}

#[test]
fn test_zero_image_stays_unlabeled() {
    let params = quarter_turn_params();
    let depth = DepthImage::zeros(64, 328);
    let labels = compute_labels(&depth, &params, 10.0f32.to_radians()).unwrap();
    assert!(labels.data().iter().all(|&l| l == 0));

    let filtered = filter_clusters(&labels, 10, 3000);
    assert_eq!(filtered, labels);
}

#[test]
fn test_labeling_wraps_across_columns() {
    let params = full_turn_params(16, 870);
    let mut depth = DepthImage::zeros(16, 870);
    for r in 0..16 {
        depth.set(r, 0, 10.0);
        depth.set(r, 869, 10.0);
    }
    let labels = compute_labels(&depth, &params, 10.0f32.to_radians()).unwrap();

    for r in 0..16 {
        assert_eq!(labels.get(r, 0), 1);
        assert_eq!(
            labels.get(r, 869),
            labels.get(r, 0),
            "wrap neighbors must share a label"
        );
    }
    // Everything the fill never reached stays unlabeled.
    for r in 0..16 {
        for c in 1..869 {
            assert_eq!(labels.get(r, c), 0);
        }
    }
}

#[test]
fn test_filter_is_monotone_in_both_bounds() {
    let params = full_turn_params(16, 870);
    let depth = random_depth(16, 870, 21);
    let labels = compute_labels(&depth, &params, 20.0f32.to_radians()).unwrap();

    let mut previous = usize::MAX;
    for min_size in [1, 2, 5, 10, 50] {
        let retained = count_clusters(&filter_clusters(&labels, min_size, usize::MAX));
        assert!(retained <= previous, "raising min_size added clusters");
        previous = retained;
    }

    let mut previous = usize::MAX;
    for max_size in [10_000, 1000, 100, 10, 1] {
        let retained = count_clusters(&filter_clusters(&labels, 1, max_size));
        assert!(retained <= previous, "lowering max_size added clusters");
        previous = retained;
    }
}

#[test]
fn test_visualize_dimensions() {
    let params = quarter_turn_params();
    let depth = random_depth(64, 328, 3);
    let diff = AngleDiff::new(&depth, &params).unwrap();

    let mat = diff.visualize();
    assert_eq!(mat.width(), 328);
    assert_eq!(mat.height(), 64);
    assert!(mat.pixels().all(|p| p.0[2] == 0));
}

#[test]
fn test_mismatched_image_is_rejected() {
    let params = quarter_turn_params();
    let depth = DepthImage::zeros(64, 327);
    assert!(matches!(
        compute_labels(&depth, &params, 0.1),
        Err(Error::ShapeMismatch(_))
    ));
    assert!(matches!(
        AngleDiff::new(&depth, &params),
        Err(Error::ShapeMismatch(_))
    ));
}
