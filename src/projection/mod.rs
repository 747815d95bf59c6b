//! Beam layout of a rotating range sensor and the mapping between
//! (row, column) grid indices and beam angles.

use crate::error::{Error, Result};

/// Angular extent of one sensor axis, divided into equally spaced beams.
///
/// Angles are radians; the sign of `step` follows the direction from
/// `start_angle` to `end_angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanParams {
    start_angle: f32,
    end_angle: f32,
    num_beams: usize,
    step: f32,
    span: f32,
}

impl SpanParams {
    pub fn new(start_angle: f32, end_angle: f32, num_beams: usize) -> Result<Self> {
        if num_beams < 1 {
            return Err(Error::DegenerateSpan(format!(
                "a span must have at least one beam, got {num_beams}"
            )));
        }
        Ok(Self {
            start_angle,
            end_angle,
            num_beams,
            step: (end_angle - start_angle) / num_beams as f32,
            span: (end_angle - start_angle).abs(),
        })
    }

    #[must_use]
    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    #[must_use]
    pub fn end_angle(&self) -> f32 {
        self.end_angle
    }

    #[must_use]
    pub fn num_beams(&self) -> usize {
        self.num_beams
    }

    /// Angular distance between two adjacent beams.
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    #[must_use]
    pub fn span(&self) -> f32 {
        self.span
    }
}

/// Full beam layout of a sensor: a horizontal span for the azimuth columns
/// (typically covering 2π) and a vertical span for the elevation rows.
///
/// Sines and cosines of the row angles are precomputed once since the
/// ground pipeline evaluates them for every pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionParams {
    h_span_params: SpanParams,
    v_span_params: SpanParams,
    col_angles: Vec<f32>,
    row_angles: Vec<f32>,
    row_sines: Vec<f32>,
    row_cosines: Vec<f32>,
}

impl ProjectionParams {
    #[must_use]
    pub fn new(h_span_params: SpanParams, v_span_params: SpanParams) -> Self {
        let col_angles = fill_angles(&h_span_params);
        let row_angles = fill_angles(&v_span_params);
        let row_sines = row_angles.iter().map(|a| a.sin()).collect();
        let row_cosines = row_angles.iter().map(|a| a.cos()).collect();
        Self {
            h_span_params,
            v_span_params,
            col_angles,
            row_angles,
            row_sines,
            row_cosines,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_angles.len()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.col_angles.len()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.rows() * self.cols()
    }

    #[must_use]
    pub fn h_span(&self) -> f32 {
        self.h_span_params.span()
    }

    #[must_use]
    pub fn v_span(&self) -> f32 {
        self.v_span_params.span()
    }

    #[must_use]
    pub fn row_angles(&self) -> &[f32] {
        &self.row_angles
    }

    #[must_use]
    pub fn col_angles(&self) -> &[f32] {
        &self.col_angles
    }

    #[must_use]
    pub fn row_sines(&self) -> &[f32] {
        &self.row_sines
    }

    #[must_use]
    pub fn row_cosines(&self) -> &[f32] {
        &self.row_cosines
    }

    /// Elevation angle of beam row `r`.
    ///
    /// The index may be off by at most one full period in either direction;
    /// it is wrapped once.
    #[must_use]
    pub fn angle_from_row(&self, r: isize) -> f32 {
        self.row_angles[wrap_once(r, self.row_angles.len())]
    }

    /// Azimuth angle of beam column `c`, wrapped once like
    /// [`angle_from_row`](Self::angle_from_row).
    #[must_use]
    pub fn angle_from_col(&self, c: isize) -> f32 {
        self.col_angles[wrap_once(c, self.col_angles.len())]
    }

    /// Verify that an image of `rows` x `cols` matches this beam layout.
    pub fn check_shape(&self, rows: usize, cols: usize) -> Result<()> {
        if rows != self.rows() || cols != self.cols() {
            return Err(Error::ShapeMismatch(format!(
                "image is {rows}x{cols} but the projection expects {}x{}",
                self.rows(),
                self.cols()
            )));
        }
        Ok(())
    }
}

fn fill_angles(span: &SpanParams) -> Vec<f32> {
    let mut angles = Vec::with_capacity(span.num_beams());
    let mut rad = span.start_angle();
    for _ in 0..span.num_beams() {
        angles.push(rad);
        rad += span.step();
    }
    angles
}

#[inline]
fn wrap_once(i: isize, n: usize) -> usize {
    let n = n as isize;
    let wrapped = if i < 0 {
        i + n
    } else if i >= n {
        i - n
    } else {
        i
    };
    debug_assert!(
        (0..n).contains(&wrapped),
        "index {i} is more than one period outside [0, {n})"
    );
    wrapped as usize
}
