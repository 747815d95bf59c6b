use std::f32::consts::PI;

use crate::core::image::{AngleImage, DepthImage, LabelImage};
use crate::core::types::PixelCoord;
use crate::error::Result;
use crate::imgproc::filter::{savitzky_golay_kernel, smooth_columns};
use crate::imgproc::morphology::dilate;
use crate::projection::ProjectionParams;
use crate::segmentation::diff::AbsDelta;
use crate::segmentation::labeler::ImageLabeler;
use crate::segmentation::MIN_VALID_DEPTH;

/// Columns whose bottom-most valid pixel is inclined more steeply than
/// this never seed a ground fill.
pub const GROUND_START_ANGLE: f32 = 30.0 * PI / 180.0;

const REPAIR_STEP: usize = 5;
const REPAIR_DEPTH_THRESHOLD: f32 = 1.0;
const DILATION_WINDOW: usize = 5;

/// Removes ground returns from depth images of one sensor.
///
/// The ground is grown from the bottom of every column through the
/// smoothed row-to-row inclination-angle image: neighboring pixels stay in
/// the ground patch while their inclination change is below
/// `ground_remove_angle`. The resulting mask is dilated and zeroed out of
/// the depth image.
pub struct DepthGroundRemover {
    params: ProjectionParams,
    window_size: usize,
    ground_remove_angle: f32,
    smoothing_kernel: Vec<f32>,
}

impl DepthGroundRemover {
    /// `window_size` must be one of the supported Savitzky-Golay windows
    /// (5, 7, 9 or 11); `ground_remove_angle` is radians.
    pub fn new(
        params: ProjectionParams,
        window_size: usize,
        ground_remove_angle: f32,
    ) -> Result<Self> {
        let smoothing_kernel = savitzky_golay_kernel(window_size)?;
        Ok(Self {
            params,
            window_size,
            ground_remove_angle,
            smoothing_kernel,
        })
    }

    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    #[must_use]
    pub fn ground_remove_angle(&self) -> f32 {
        self.ground_remove_angle
    }

    /// Produce a copy of `raw_depth_image` with ground returns zeroed.
    ///
    /// Small vertical holes are repaired first so that the inclination
    /// angles do not jump across missing returns.
    pub fn remove_ground(&self, raw_depth_image: &DepthImage) -> Result<DepthImage> {
        self.params
            .check_shape(raw_depth_image.rows(), raw_depth_image.cols())?;

        let depth_image = repair_depth(raw_depth_image, REPAIR_STEP, REPAIR_DEPTH_THRESHOLD);
        let angles = angle_image(&depth_image, &self.params)?;
        let smoothed = smooth_columns(&angles, &self.smoothing_kernel);
        Ok(self.zero_out_ground(&depth_image, &smoothed))
    }

    fn zero_out_ground(&self, depth_image: &DepthImage, angle_image: &AngleImage) -> DepthImage {
        let rows = self.params.rows();
        let cols = self.params.cols();

        let labeler = ImageLabeler::new(
            rows,
            cols,
            self.ground_remove_angle,
            AbsDelta::new(angle_image),
        );
        let mut label_image = LabelImage::zeros(rows, cols);

        for c in 0..cols {
            // One seed per column: the bottom-most valid pixel. A column
            // whose bottom is steeper than the start angle gets no removal.
            let mut r = rows - 1;
            while r > 0 && depth_image.get(r, c) < MIN_VALID_DEPTH {
                r -= 1;
            }
            if label_image.get(r, c) > 0 {
                continue;
            }
            if angle_image.get(r, c) > GROUND_START_ANGLE {
                continue;
            }
            labeler.label_one_component(
                &mut label_image,
                depth_image,
                1,
                PixelCoord::new(r as i32, c as i32),
            );
        }

        let dilated = dilate(&label_image, DILATION_WINDOW);

        let mut no_ground = DepthImage::zeros(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                if dilated.get(r, c) == 0 {
                    no_ground.set(r, c, depth_image.get(r, c));
                }
            }
        }
        no_ground
    }
}

/// Fill small vertical holes by averaging valid pixels above and below.
///
/// For every invalid pixel, all pairs of a valid pixel up to `step - 1`
/// rows above and one up to `step - 1` rows below are considered; a pair
/// contributes only when the two depths differ by less than
/// `depth_threshold`, so holes across depth discontinuities stay open.
/// Repaired values feed later repairs further down the same column.
#[must_use]
pub fn repair_depth(depth_image: &DepthImage, step: usize, depth_threshold: f32) -> DepthImage {
    let mut inpainted = depth_image.clone();
    let (rows, cols) = inpainted.shape();

    for c in 0..cols {
        for r in 0..rows {
            if inpainted.get(r, c) >= MIN_VALID_DEPTH {
                continue;
            }
            let mut counter = 0u32;
            let mut sum = 0.0f32;
            for i in 1..step {
                if i > r {
                    continue;
                }
                for j in 1..step {
                    if r + j > rows - 1 {
                        continue;
                    }
                    let prev = inpainted.get(r - i, c);
                    let next = inpainted.get(r + j, c);
                    if prev > MIN_VALID_DEPTH
                        && next > MIN_VALID_DEPTH
                        && (prev - next).abs() < depth_threshold
                    {
                        sum += prev + next;
                        counter += 2;
                    }
                }
            }
            if counter > 0 {
                inpainted.set(r, c, sum / counter as f32);
            }
        }
    }

    inpainted
}

/// Row-to-row inclination angles of a depth image.
///
/// Each pixel of row `r >= 1` holds `atan2(|Δy|, |Δx|)` where `x` and `y`
/// are the planar coordinates of the return in its beam's vertical plane.
/// The first row has no predecessor and is 0.
pub fn angle_image(depth_image: &DepthImage, params: &ProjectionParams) -> Result<AngleImage> {
    params.check_shape(depth_image.rows(), depth_image.cols())?;
    let (rows, cols) = depth_image.shape();
    let sines = params.row_sines();
    let cosines = params.row_cosines();

    let mut angles = AngleImage::zeros(rows, cols);
    for r in 1..rows {
        for c in 0..cols {
            let d_curr = depth_image.get(r, c);
            let d_prev = depth_image.get(r - 1, c);
            let dx = (d_curr * cosines[r] - d_prev * cosines[r - 1]).abs();
            let dy = (d_curr * sines[r] - d_prev * sines[r - 1]).abs();
            angles.set(r, c, dy.atan2(dx));
        }
    }
    Ok(angles)
}
