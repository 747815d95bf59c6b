use std::collections::HashMap;

use crate::core::image::{DepthImage, LabelImage, PointImage};
use crate::core::types::Point3;
use crate::error::Result;
use crate::projection::ProjectionParams;

/// Project a depth image back into sensor-frame Cartesian coordinates.
///
/// Invalid pixels project to the origin since their depth is 0.
pub fn spherical_to_cartesian(
    depth_image: &DepthImage,
    params: &ProjectionParams,
) -> Result<PointImage> {
    params.check_shape(depth_image.rows(), depth_image.cols())?;

    let mut points = PointImage::zeros(params.rows(), params.cols());
    for r in 0..params.rows() {
        let beta = -params.angle_from_row(r as isize);
        for c in 0..params.cols() {
            let alpha = params.angle_from_col(c as isize);
            let d = depth_image.get(r, c);
            points.set(
                r,
                c,
                Point3::new(
                    d * beta.cos() * alpha.sin(),
                    d * beta.sin(),
                    -d * beta.cos() * alpha.cos(),
                ),
            );
        }
    }
    Ok(points)
}

/// Collect the 3D points of every labeled cluster, keyed by label.
///
/// Label 0 is the background and is excluded; points appear in row-major
/// image order.
#[must_use]
pub fn segmented_point_clouds(
    label_image: &LabelImage,
    point_image: &PointImage,
) -> HashMap<u16, Vec<Point3>> {
    assert!(
        label_image.shape() == point_image.shape(),
        "label image is {:?} but point image is {:?}",
        label_image.shape(),
        point_image.shape()
    );

    let mut clusters: HashMap<u16, Vec<Point3>> = HashMap::new();
    for r in 0..label_image.rows() {
        for c in 0..label_image.cols() {
            let label = label_image.get(r, c);
            if label == 0 {
                continue;
            }
            clusters.entry(label).or_default().push(point_image.get(r, c));
        }
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::SpanParams;
    use std::f32::consts::PI;

    #[test]
    fn test_cartesian_projection() {
        let h = SpanParams::new(-PI, PI, 4).unwrap();
        let v = SpanParams::new((-10.0f32).to_radians(), 10.0f32.to_radians(), 2).unwrap();
        let params = ProjectionParams::new(h, v);
        let depth = DepthImage::filled(2, 4, 2.0);

        let points = spherical_to_cartesian(&depth, &params).unwrap();
        let p = points.get(0, 0);
        let alpha = params.angle_from_col(0);
        let beta = -params.angle_from_row(0);
        assert!((p.x - 2.0 * beta.cos() * alpha.sin()).abs() < 1e-6);
        assert!((p.y - 2.0 * beta.sin()).abs() < 1e-6);
        assert!((p.z + 2.0 * beta.cos() * alpha.cos()).abs() < 1e-6);
    }

    #[test]
    fn test_segmented_clouds_exclude_background() {
        let labels = LabelImage::from_vec(vec![0, 1, 1, 2], 2, 2).unwrap();
        let mut points = PointImage::zeros(2, 2);
        points.set(0, 1, Point3::new(1.0, 0.0, 0.0));
        points.set(1, 0, Point3::new(2.0, 0.0, 0.0));
        points.set(1, 1, Point3::new(3.0, 0.0, 0.0));

        let clusters = segmented_point_clouds(&labels, &points);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[&1].len(), 2);
        assert_eq!(clusters[&1][0].x, 1.0);
        assert_eq!(clusters[&1][1].x, 2.0);
        assert_eq!(clusters[&2].len(), 1);
        assert!(!clusters.contains_key(&0));
    }
}
