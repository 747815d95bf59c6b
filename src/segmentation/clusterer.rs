use std::collections::HashMap;

use crate::core::image::{DepthImage, LabelImage};
use crate::error::Result;
use crate::projection::ProjectionParams;
use crate::segmentation::diff::AngleDiff;
use crate::segmentation::labeler::ImageLabeler;

pub const MIN_CLUSTER_SIZE: usize = 10;
pub const MAX_CLUSTER_SIZE: usize = 3000;

/// Label connected object clusters in a (ground-free) depth image.
///
/// Two neighboring pixels join one cluster when their β angle exceeds
/// `angle_threshold`, i.e. when the surface between them is locally
/// coherent. Labels are assigned in row-major seed order and are stable
/// across runs.
pub fn compute_labels(
    depth_image: &DepthImage,
    params: &ProjectionParams,
    angle_threshold: f32,
) -> Result<LabelImage> {
    let angle_diff = AngleDiff::new(depth_image, params)?;
    let labeler = ImageLabeler::new(params.rows(), params.cols(), angle_threshold, angle_diff);
    labeler.compute_labels(depth_image)
}

/// Erase labels whose pixel count falls outside
/// `[min_cluster_size, max_cluster_size]`.
///
/// Label 0 is counted like any other, so the background survives only
/// when its pixel count happens to land inside the range; erasing it
/// writes 0 over 0 either way.
#[must_use]
pub fn filter_clusters(
    label_image: &LabelImage,
    min_cluster_size: usize,
    max_cluster_size: usize,
) -> LabelImage {
    let mut counts: HashMap<u16, usize> = HashMap::new();
    for &label in label_image.data() {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut result = label_image.clone();
    for label in result.data_mut() {
        let count = counts[label];
        if count < min_cluster_size || count > max_cluster_size {
            *label = 0;
        }
    }
    result
}

/// Cluster and size-filter in one call.
pub fn compute_labels_with_filtering(
    depth_image: &DepthImage,
    params: &ProjectionParams,
    angle_threshold: f32,
    min_cluster_size: usize,
    max_cluster_size: usize,
) -> Result<LabelImage> {
    let label_image = compute_labels(depth_image, params, angle_threshold)?;
    Ok(filter_clusters(
        &label_image,
        min_cluster_size,
        max_cluster_size,
    ))
}
