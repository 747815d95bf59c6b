use rayon::prelude::*;

use crate::core::image::Image;

/// Morphological dilation with a square all-ones window.
///
/// Interior pixels take the maximum over their `window_size` x
/// `window_size` neighborhood; pixels closer than half a window to any
/// border are copied through unchanged.
#[must_use]
pub fn dilate<T>(image: &Image<T>, window_size: usize) -> Image<T>
where
    T: Copy + Ord + Send + Sync,
{
    let (rows, cols) = image.shape();
    let half = window_size / 2;
    let mut dilated = image.clone();
    if rows <= 2 * half || cols <= 2 * half {
        return dilated;
    }

    let src = image.data();
    dilated
        .data_mut()
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, dst_row)| {
            if row < half || row + half >= rows {
                return;
            }
            for col in half..cols - half {
                let mut max_val = src[(row - half) * cols + (col - half)];
                for y in row - half..=row + half {
                    for x in col - half..=col + half {
                        max_val = max_val.max(src[y * cols + x]);
                    }
                }
                dst_row[col] = max_val;
            }
        });

    dilated
}
