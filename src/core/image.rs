use std::ops::{Index, IndexMut};

use ndarray::Array2;
use num_traits::Zero;

use crate::core::types::{PixelCoord, Point3};
use crate::error::{Error, Result};

/// Single-channel matrix stored in contiguous row-major order.
///
/// All pipeline stages exchange these: depth images, inclination-angle
/// images and label images are the same container with different element
/// types.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

/// Depth image in sensor units. Values below the validity epsilon mean
/// "no return".
pub type DepthImage = Image<f32>;

/// Row-to-row inclination angles in radians; used by the ground pipeline.
pub type AngleImage = Image<f32>;

/// Component identifiers; `0` means unlabeled.
pub type LabelImage = Image<u16>;

/// Per-pixel Cartesian coordinates produced by the spherical projection.
pub type PointImage = Image<Point3>;

impl<T: Copy> Image<T> {
    /// Create an image with every pixel set to `value`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Get the pixel at (row, col). Panics if the index is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }

    /// Set the pixel at (row, col). Panics if the index is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self[(row, col)] = value;
    }
}

impl<T: Zero + Copy> Image<T> {
    /// Create a zero-filled image.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }
}

impl<T> Image<T> {
    /// Create an image from a row-major buffer.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::ShapeMismatch(format!(
                "buffer of {} elements cannot form a {}x{} image",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { data, rows, cols })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Raw row-major pixel buffer.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Clone> Image<T> {
    /// Convert to an ndarray matrix for easier manipulation.
    pub fn to_array2(&self) -> Result<Array2<T>> {
        Array2::from_shape_vec((self.rows, self.cols), self.data.clone())
            .map_err(|e| Error::ShapeMismatch(e.to_string()))
    }

    /// Create an image from an ndarray matrix.
    #[must_use]
    pub fn from_array2(arr: Array2<T>) -> Self {
        let (rows, cols) = arr.dim();
        let data = arr.iter().cloned().collect();
        Self { data, rows, cols }
    }
}

impl<T> Index<(usize, usize)> for Image<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "Index ({}, {}) out of range for {}x{} image",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Image<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "Index ({}, {}) out of range for {}x{} image",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl<T> Index<PixelCoord> for Image<T> {
    type Output = T;

    #[inline]
    fn index(&self, coord: PixelCoord) -> &T {
        &self[(coord.row as usize, coord.col as usize)]
    }
}

impl<T> IndexMut<PixelCoord> for Image<T> {
    #[inline]
    fn index_mut(&mut self, coord: PixelCoord) -> &mut T {
        &mut self[(coord.row as usize, coord.col as usize)]
    }
}
