//! # Range Segmentation
//!
//! Depth-image segmentation for rotating range sensors.
//!
//! A range image projects one sensor sweep onto a (beam row, azimuth
//! column) grid where every pixel stores the distance to the first return.
//! This library suppresses ground returns and groups the remaining pixels
//! into connected clusters, using two cooperating flood fills over the
//! same cyclic grid topology (columns wrap around the full turn, rows do
//! not):
//!
//! - **Ground removal**: grows regions from the bottom of every column
//!   through the smoothed row-to-row inclination-angle image, dilates the
//!   result and zeroes it out of the depth image.
//! - **Clustering**: grows 4-connected components wherever the β angle of
//!   the depth triangle between neighboring pixels exceeds a threshold.
//!
//! All angles are radians; labels are 16-bit with 0 meaning unlabeled.
//!
//! ## Example
//!
//! ```rust,no_run
//! use range_segmentation::prelude::*;
//! use range_segmentation::segmentation::{compute_labels, filter_clusters};
//!
//! # fn main() -> range_segmentation::error::Result<()> {
//! let h = SpanParams::new(-std::f32::consts::PI, std::f32::consts::PI, 870)?;
//! let v = SpanParams::new((-24.0f32).to_radians(), 2.0f32.to_radians(), 64)?;
//! let params = ProjectionParams::new(h, v);
//!
//! let depth = DepthImage::zeros(64, 870); // one sensor sweep
//! let remover = DepthGroundRemover::new(params.clone(), 5, 5.0f32.to_radians())?;
//! let no_ground = remover.remove_ground(&depth)?;
//!
//! let labels = compute_labels(&no_ground, &params, 10.0f32.to_radians())?;
//! let clusters = filter_clusters(&labels, 10, 3000);
//! # let _ = clusters;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;
pub mod imgproc;
pub mod projection;
pub mod segmentation;

pub mod prelude {
    //! Convenience module that re-exports commonly used items
    pub use crate::core::image::{AngleImage, DepthImage, Image, LabelImage, PointImage};
    pub use crate::core::types::{PixelCoord, Point3};
    pub use crate::error::{Error, Result};
    pub use crate::projection::{ProjectionParams, SpanParams};
    pub use crate::segmentation::{DepthGroundRemover, ImageLabeler};
}
