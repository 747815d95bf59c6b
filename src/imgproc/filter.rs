use rayon::prelude::*;

use crate::core::image::Image;
use crate::error::{Error, Result};

/// Normalized 1D Savitzky-Golay smoothing kernel.
///
/// The coefficients are the classic quadratic-fit weights; only the four
/// window sizes used by the ground pipeline are supported.
pub fn savitzky_golay_kernel(window_size: usize) -> Result<Vec<f32>> {
    let coefficients: &[f32] = match window_size {
        5 => &[-3.0, 12.0, 17.0, 12.0, -3.0],
        7 => &[-2.0, 3.0, 6.0, 7.0, 6.0, 3.0, -2.0],
        9 => &[-21.0, 14.0, 39.0, 54.0, 59.0, 54.0, 39.0, 14.0, -21.0],
        11 => &[
            -36.0, 9.0, 44.0, 69.0, 84.0, 89.0, 84.0, 69.0, 44.0, 9.0, -36.0,
        ],
        _ => {
            return Err(Error::InvalidWindowSize(format!(
                "window size must be one of 5, 7, 9 or 11, got {window_size}"
            )))
        }
    };

    let norm: f32 = coefficients.iter().sum();
    Ok(coefficients.iter().map(|c| c / norm).collect())
}

/// Convolve every column with a 1D kernel.
///
/// Rows are reflected at the borders without repeating the border row
/// itself (reflect-101), so the output keeps the input shape.
#[must_use]
pub fn smooth_columns(src: &Image<f32>, kernel: &[f32]) -> Image<f32> {
    let (rows, cols) = src.shape();
    let half = kernel.len() / 2;
    let src_data = src.data();

    let mut dst = Image::zeros(rows, cols);
    dst.data_mut()
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, dst_row)| {
            for (col, out) in dst_row.iter_mut().enumerate() {
                let mut sum = 0.0f32;
                for (i, &k) in kernel.iter().enumerate() {
                    let r = reflect_101(row as isize + i as isize - half as isize, rows);
                    sum += src_data[r * cols + col] * k;
                }
                *out = sum;
            }
        });

    dst
}

#[inline]
fn reflect_101(i: isize, n: usize) -> usize {
    let n = n as isize;
    let reflected = if i < 0 {
        -i
    } else if i >= n {
        2 * n - 2 - i
    } else {
        i
    };
    reflected.clamp(0, n - 1) as usize
}
