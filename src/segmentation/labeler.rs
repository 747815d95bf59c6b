use crate::core::image::{DepthImage, LabelImage};
use crate::core::types::PixelCoord;
use crate::error::{Error, Result};
use crate::segmentation::diff::DiffMetric;
use crate::segmentation::{MIN_SEED_DEPTH, MIN_VALID_DEPTH};

const STEPS: [PixelCoord; 4] = [
    PixelCoord { row: -1, col: 0 },
    PixelCoord { row: 1, col: 0 },
    PixelCoord { row: 0, col: -1 },
    PixelCoord { row: 0, col: 1 },
];

/// 4-connected flood fill over a range image.
///
/// Columns wrap around the azimuth circle; rows do not. Which neighbors
/// belong together is decided entirely by the [`DiffMetric`] the labeler
/// is constructed with, so the same traversal serves both the ground
/// remover and the object clusterer.
///
/// The frontier is a LIFO stack. Visit order does not affect the result:
/// labels are determined by connectivity alone, so the output is
/// byte-identical across runs on identical input.
pub struct ImageLabeler<D> {
    rows: usize,
    cols: usize,
    threshold: f32,
    diff: D,
}

impl<D: DiffMetric> ImageLabeler<D> {
    #[must_use]
    pub fn new(rows: usize, cols: usize, threshold: f32, diff: D) -> Self {
        Self {
            rows,
            cols,
            threshold,
            diff,
        }
    }

    /// Label every connected component, seeding in row-major order.
    ///
    /// Labels are dense starting from 1. Pixels below the seeding epsilon
    /// that no component reaches stay 0.
    pub fn compute_labels(&self, depth_image: &DepthImage) -> Result<LabelImage> {
        if depth_image.shape() != (self.rows, self.cols) {
            return Err(Error::ShapeMismatch(format!(
                "depth image is {}x{} but the labeler expects {}x{}",
                depth_image.rows(),
                depth_image.cols(),
                self.rows,
                self.cols
            )));
        }

        let mut label_image = LabelImage::zeros(self.rows, self.cols);
        let mut label = 1u16;
        for row in 0..self.rows {
            for col in 0..self.cols {
                if label_image.get(row, col) > 0 {
                    continue;
                }
                if depth_image.get(row, col) < MIN_SEED_DEPTH {
                    continue;
                }
                self.label_one_component(
                    &mut label_image,
                    depth_image,
                    label,
                    PixelCoord::new(row as i32, col as i32),
                );
                label += 1;
            }
        }

        Ok(label_image)
    }

    /// Flood-fill one component from `start`, writing `label` into
    /// `label_image`.
    ///
    /// Pixels below the validity epsilon still take the label when reached
    /// but never expand to their neighbors.
    pub fn label_one_component(
        &self,
        label_image: &mut LabelImage,
        depth_image: &DepthImage,
        label: u16,
        start: PixelCoord,
    ) {
        let mut frontier = vec![start];

        while let Some(current) = frontier.pop() {
            if label_image[current] > 0 {
                continue;
            }
            label_image[current] = label;

            if depth_image[current] < MIN_VALID_DEPTH {
                continue;
            }

            for step in STEPS {
                let mut neighbor = current + step;
                if neighbor.row < 0 || neighbor.row >= self.rows as i32 {
                    continue;
                }
                neighbor.col = neighbor.col.rem_euclid(self.cols as i32);

                if label_image[neighbor] > 0 {
                    continue;
                }
                let diff = self.diff.diff_at(current, neighbor);
                if self.diff.satisfies_threshold(diff, self.threshold) {
                    frontier.push(neighbor);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::diff::AbsDelta;

    #[test]
    fn test_components_split_on_large_delta() {
        // Two flat patches separated by a big jump; column 0 is invalid.
        let depth = DepthImage::from_vec(
            vec![
                0.0, 10.0, 10.5, 50.0, //
                0.0, 10.0, 10.5, 50.0,
            ],
            2,
            4,
        )
        .unwrap();
        let labeler = ImageLabeler::new(2, 4, 1.0, AbsDelta::new(&depth));
        let labels = labeler.compute_labels(&depth).unwrap();

        for r in 0..2 {
            assert_eq!(labels.get(r, 0), 0, "invalid pixel must stay unlabeled");
            assert_eq!(labels.get(r, 1), 1);
            assert_eq!(labels.get(r, 2), 1);
            assert_eq!(labels.get(r, 3), 2);
        }
    }

    #[test]
    fn test_column_wrap_joins_first_and_last() {
        let depth = DepthImage::from_vec(vec![5.0, 0.0, 0.0, 5.2], 1, 4).unwrap();
        let labeler = ImageLabeler::new(1, 4, 1.0, AbsDelta::new(&depth));
        let labels = labeler.compute_labels(&depth).unwrap();

        assert_eq!(labels.get(0, 0), 1);
        assert_eq!(labels.get(0, 3), 1);
        assert_eq!(labels.get(0, 1), 0);
        assert_eq!(labels.get(0, 2), 0);
    }

    #[test]
    fn test_shape_mismatch() {
        let depth = DepthImage::zeros(2, 4);
        let labeler = ImageLabeler::new(4, 4, 1.0, AbsDelta::new(&depth));
        assert!(matches!(
            labeler.compute_labels(&depth),
            Err(Error::ShapeMismatch(_))
        ));
    }
}
