use image::{Rgb, RgbImage};

use crate::core::image::{DepthImage, Image};
use crate::core::types::PixelCoord;
use crate::error::Result;
use crate::projection::ProjectionParams;
use crate::segmentation::MIN_VALID_DEPTH;

/// Distance measure between two 4-adjacent pixels of a range image,
/// together with the predicate deciding whether that distance keeps the
/// pixels in the same component.
///
/// The predicate direction is part of the metric: a β-angle is "coherent"
/// when it is large, an inclination delta when it is small. Behavior is
/// only defined for distinct 4-neighbors, possibly across the column wrap.
pub trait DiffMetric {
    fn diff_at(&self, from: PixelCoord, to: PixelCoord) -> f32;

    fn satisfies_threshold(&self, diff: f32, threshold: f32) -> bool;
}

/// β-angle metric for object clustering.
///
/// For a pixel and its neighbor, β is the angle at the far vertex of the
/// triangle spanned by the two depth returns and the angular step α
/// between their beams. β approaches π/2 when the local surface is
/// perpendicular to the line of sight and 0 when it is tangential, so a
/// large β means the two returns belong to one coherent surface.
///
/// All β values are precomputed into two tables at construction, one for
/// vertical neighbors and one for horizontal neighbors including the
/// wrap-around pair of the first and last column.
pub struct AngleDiff<'a> {
    depth_image: &'a DepthImage,
    params: &'a ProjectionParams,
    row_alphas: Vec<f32>,
    col_alphas: Vec<f32>,
    beta_rows: Image<f32>,
    beta_cols: Image<f32>,
}

impl<'a> AngleDiff<'a> {
    pub fn new(depth_image: &'a DepthImage, params: &'a ProjectionParams) -> Result<Self> {
        params.check_shape(depth_image.rows(), depth_image.cols())?;
        let (row_alphas, col_alphas) = compute_alphas(params);
        let (beta_rows, beta_cols) = compute_betas(depth_image, &row_alphas, &col_alphas);
        Ok(Self {
            depth_image,
            params,
            row_alphas,
            col_alphas,
            beta_rows,
            beta_cols,
        })
    }

    /// Angular steps between adjacent beam rows; the last entry is 0.
    #[must_use]
    pub fn row_alphas(&self) -> &[f32] {
        &self.row_alphas
    }

    /// Angular steps between adjacent beam columns. The last entry is the
    /// residual step closing the circle and is negative when the
    /// horizontal span over-covers a full turn.
    #[must_use]
    pub fn col_alphas(&self) -> &[f32] {
        &self.col_alphas
    }

    /// β angles towards the next row; zero on the last row and for
    /// invalid pixels.
    #[must_use]
    pub fn beta_rows(&self) -> &Image<f32> {
        &self.beta_rows
    }

    /// β angles towards the next column (wrapping); zero for invalid
    /// pixels.
    #[must_use]
    pub fn beta_cols(&self) -> &Image<f32> {
        &self.beta_cols
    }

    /// Render both β tables as an RGB image: red encodes the row angle,
    /// green the column angle, with 90° mapping to black. Invalid pixels
    /// stay black.
    #[must_use]
    pub fn visualize(&self) -> RgbImage {
        const MAX_ANGLE_DEG: f32 = 90.0;
        let (rows, cols) = self.depth_image.shape();
        let mut mat = RgbImage::new(cols as u32, rows as u32);

        for r in 0..rows {
            for c in 0..cols {
                if self.depth_image.get(r, c) < MIN_VALID_DEPTH {
                    continue;
                }
                let row_color = (255.0 * self.beta_rows.get(r, c).to_degrees() / MAX_ANGLE_DEG) as u8;
                let col_color = (255.0 * self.beta_cols.get(r, c).to_degrees() / MAX_ANGLE_DEG) as u8;
                mat.put_pixel(c as u32, r as u32, Rgb([255 - row_color, 255 - col_color, 0]));
            }
        }

        mat
    }
}

impl DiffMetric for AngleDiff<'_> {
    fn diff_at(&self, from: PixelCoord, to: PixelCoord) -> f32 {
        debug_assert!(from != to);

        let last_row = self.params.rows() as i32 - 1;
        let row_crosses_border =
            (from.row == last_row && to.row == 0) || (from.row == 0 && to.row == last_row);
        let row = if row_crosses_border {
            last_row
        } else {
            from.row.min(to.row)
        };

        let last_col = self.params.cols() as i32 - 1;
        let col_crosses_border =
            (from.col == last_col && to.col == 0) || (from.col == 0 && to.col == last_col);
        let col = if col_crosses_border {
            last_col
        } else {
            from.col.min(to.col)
        };

        if from.row != to.row {
            self.beta_rows.get(row as usize, col as usize)
        } else {
            self.beta_cols.get(row as usize, col as usize)
        }
    }

    fn satisfies_threshold(&self, diff: f32, threshold: f32) -> bool {
        diff > threshold
    }
}

/// β angle of the depth triangle spanned by two returns an angle `alpha`
/// apart. Degenerate inputs (either depth zero) yield 0.
fn beta(alpha: f32, current_depth: f32, neighbor_depth: f32) -> f32 {
    let d1 = current_depth.max(neighbor_depth);
    let d2 = current_depth.min(neighbor_depth);
    (d2 * alpha.sin()).atan2(d1 - d2 * alpha.cos()).abs()
}

fn compute_alphas(params: &ProjectionParams) -> (Vec<f32>, Vec<f32>) {
    let rows = params.rows();
    let cols = params.cols();

    let mut row_alphas = vec![0.0f32; rows];
    for r in 0..rows - 1 {
        row_alphas[r] =
            (params.angle_from_row(r as isize + 1) - params.angle_from_row(r as isize)).abs();
    }

    let mut col_alphas = vec![0.0f32; cols];
    for c in 0..cols - 1 {
        col_alphas[c] =
            (params.angle_from_col(c as isize + 1) - params.angle_from_col(c as isize)).abs();
    }
    col_alphas[cols - 1] = (params.angle_from_col(0)
        - params.angle_from_col(cols as isize - 1))
    .abs()
        - params.h_span();

    (row_alphas, col_alphas)
}

fn compute_betas(
    depth_image: &DepthImage,
    row_alphas: &[f32],
    col_alphas: &[f32],
) -> (Image<f32>, Image<f32>) {
    let (rows, cols) = depth_image.shape();
    let mut beta_rows = Image::zeros(rows, cols);
    let mut beta_cols = Image::zeros(rows, cols);

    for r in 0..rows {
        let alpha_row = row_alphas[r];
        for c in 0..cols {
            let current = depth_image.get(r, c);
            if current < MIN_VALID_DEPTH {
                continue;
            }
            let alpha_col = col_alphas[c];

            let next_c = (c + 1) % cols;
            beta_cols.set(r, c, beta(alpha_col, current, depth_image.get(r, next_c)));

            if r + 1 < rows {
                beta_rows.set(r, c, beta(alpha_row, current, depth_image.get(r + 1, c)));
            }
        }
    }

    (beta_rows, beta_cols)
}

/// Absolute-difference metric over a precomputed scalar image.
///
/// The ground pipeline runs it over the smoothed inclination-angle image:
/// two pixels stay in one ground patch while their inclination change is
/// below the threshold.
pub struct AbsDelta<'a> {
    source_image: &'a Image<f32>,
}

impl<'a> AbsDelta<'a> {
    #[must_use]
    pub fn new(source_image: &'a Image<f32>) -> Self {
        Self { source_image }
    }
}

impl DiffMetric for AbsDelta<'_> {
    fn diff_at(&self, from: PixelCoord, to: PixelCoord) -> f32 {
        debug_assert!(from != to);
        (self.source_image[from] - self.source_image[to]).abs()
    }

    fn satisfies_threshold(&self, diff: f32, threshold: f32) -> bool {
        diff < threshold
    }
}
