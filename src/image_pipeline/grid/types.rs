//! Intensity grid types

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Converts a decoded f64 sample to the grid's f32 storage.
///
/// Finite values never turn into gaps or infinities: magnitudes beyond f32
/// saturate at `f32::MAX`, and nonzero values below f32's range keep their
/// sign at `f32::MIN_POSITIVE`. Non-finite values pass through unchanged.
pub(crate) fn sample_from_f64(value: f64) -> f32 {
    if !value.is_finite() {
        return value as f32;
    }
    let narrowed = value.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32;
    if narrowed == 0.0 && value != 0.0 {
        f32::MIN_POSITIVE.copysign(value as f32)
    } else {
        narrowed
    }
}

/// A single imaging band as a rectangular grid of f32 samples.
///
/// Samples are stored row-major. Row 0 is the bottom of the image
/// (display origin "lower"), column 0 is the left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityGrid {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl IntensityGrid {
    /// Builds a grid from row-major samples.
    ///
    /// Fails with `InvalidDimensions` when `data` does not hold exactly
    /// `width * height` samples.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A grid with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Builds a grid from a slice of equally sized rows, bottom row first.
    ///
    /// Ragged rows are rejected with `InvalidDimensions`.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(PipelineError::InvalidDimensions(row.len(), height));
            }
            data.extend_from_slice(row);
        }
        Self::new(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.width + col] = value;
    }

    /// Applies `f` to every sample, keeping the shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// A grid with this grid's shape holding `data` instead.
    pub(crate) fn with_data(&self, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Copy of the grid with every non-finite sample replaced by 0.
    pub fn sanitized(&self) -> Self {
        self.map(|v| if v.is_finite() { v } else { 0.0 })
    }

    pub fn same_shape(&self, other: &IntensityGrid) -> bool {
        self.dimensions() == other.dimensions()
    }
}
