//! Ground removal and object clustering over the cyclic range-image grid.

pub mod cloud;
pub mod clusterer;
pub mod diff;
pub mod ground;
pub mod labeler;

pub use cloud::{segmented_point_clouds, spherical_to_cartesian};
pub use clusterer::{
    compute_labels, compute_labels_with_filtering, filter_clusters, MAX_CLUSTER_SIZE,
    MIN_CLUSTER_SIZE,
};
pub use diff::{AbsDelta, AngleDiff, DiffMetric};
pub use ground::{angle_image, repair_depth, DepthGroundRemover, GROUND_START_ANGLE};
pub use labeler::ImageLabeler;

/// Depth below this is treated as "no return".
pub const MIN_VALID_DEPTH: f32 = 0.001;

/// Depth below this is too unreliable to seed a new component.
pub const MIN_SEED_DEPTH: f32 = 0.005;
