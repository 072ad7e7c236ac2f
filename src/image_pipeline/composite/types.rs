//! Compositing types

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::IntensityGrid;

/// Ordered red, green and blue source bands of identical shape.
///
/// Built once after loading and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSet {
    red: IntensityGrid,
    green: IntensityGrid,
    blue: IntensityGrid,
}

impl BandSet {
    /// Groups three bands, failing fast with `ShapeMismatch` when the green
    /// or blue band does not match the red band's dimensions.
    pub fn new(red: IntensityGrid, green: IntensityGrid, blue: IntensityGrid) -> Result<Self> {
        check_shape("green", &red, &green)?;
        check_shape("blue", &red, &blue)?;
        Ok(Self { red, green, blue })
    }

    pub fn red(&self) -> &IntensityGrid {
        &self.red
    }

    pub fn green(&self) -> &IntensityGrid {
        &self.green
    }

    pub fn blue(&self) -> &IntensityGrid {
        &self.blue
    }

    /// `(width, height)` shared by all three bands.
    pub fn dimensions(&self) -> (usize, usize) {
        self.red.dimensions()
    }
}

pub(crate) fn check_shape(
    band: &'static str,
    reference: &IntensityGrid,
    candidate: &IntensityGrid,
) -> Result<()> {
    if reference.same_shape(candidate) {
        return Ok(());
    }
    let (expected_width, expected_height) = reference.dimensions();
    let (found_width, found_height) = candidate.dimensions();
    Err(PipelineError::ShapeMismatch {
        band,
        expected_width,
        expected_height,
        found_width,
        found_height,
    })
}

/// Per-channel gains and the intensity ceiling used for one composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayParameters {
    /// Multiplicative weight on the normalized red band
    pub red_gain: f32,
    /// Multiplicative weight on the normalized green band
    pub green_gain: f32,
    /// Multiplicative weight on the normalized blue band
    pub blue_gain: f32,
    /// Highest displayable value; every channel is clipped to [0, ceiling]
    pub ceiling: f32,
}

impl Default for DisplayParameters {
    fn default() -> Self {
        Self {
            red_gain: 1.0,
            green_gain: 1.0,
            blue_gain: 1.0,
            ceiling: 1.0,
        }
    }
}

impl DisplayParameters {
    pub fn builder() -> DisplayParametersBuilder {
        DisplayParametersBuilder::default()
    }

    pub fn gains(&self) -> [f32; 3] {
        [self.red_gain, self.green_gain, self.blue_gain]
    }

    /// Rejects values the engine cannot clip against: any non-finite value,
    /// or a negative ceiling. A zero ceiling or a negative gain is allowed and
    /// clips the affected channels to 0.
    pub fn validate(&self) -> Result<()> {
        for (name, gain) in [
            ("red gain", self.red_gain),
            ("green gain", self.green_gain),
            ("blue gain", self.blue_gain),
        ] {
            if !gain.is_finite() {
                return Err(PipelineError::InvalidParameter(format!(
                    "{name} must be finite, got {gain}"
                )));
            }
        }
        if !self.ceiling.is_finite() || self.ceiling < 0.0 {
            return Err(PipelineError::InvalidParameter(format!(
                "ceiling must be a finite value >= 0, got {}",
                self.ceiling
            )));
        }
        Ok(())
    }
}

/// Builder for DisplayParameters
#[derive(Default)]
pub struct DisplayParametersBuilder {
    red_gain: Option<f32>,
    green_gain: Option<f32>,
    blue_gain: Option<f32>,
    ceiling: Option<f32>,
}

impl DisplayParametersBuilder {
    pub fn red_gain(mut self, gain: f32) -> Self {
        self.red_gain = Some(gain);
        self
    }

    pub fn green_gain(mut self, gain: f32) -> Self {
        self.green_gain = Some(gain);
        self
    }

    pub fn blue_gain(mut self, gain: f32) -> Self {
        self.blue_gain = Some(gain);
        self
    }

    pub fn ceiling(mut self, ceiling: f32) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    pub fn build(self) -> DisplayParameters {
        let default = DisplayParameters::default();
        DisplayParameters {
            red_gain: self.red_gain.unwrap_or(default.red_gain),
            green_gain: self.green_gain.unwrap_or(default.green_gain),
            blue_gain: self.blue_gain.unwrap_or(default.blue_gain),
            ceiling: self.ceiling.unwrap_or(default.ceiling),
        }
    }
}

/// Displayable RGB composite, row-major with row 0 at the bottom.
///
/// Every component lies in [0, ceiling] of the parameters it was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// One [r, g, b] triple per pixel
    pub pixels: Vec<[f32; 3]>,
}

impl CompositeImage {
    pub fn pixel(&self, row: usize, col: usize) -> [f32; 3] {
        self.pixels[row * self.width + col]
    }

    /// Mean of each channel over the whole image.
    pub fn channel_means(&self) -> [f32; 3] {
        if self.pixels.is_empty() {
            return [0.0; 3];
        }
        let mut sums = [0.0f64; 3];
        for px in &self.pixels {
            for (sum, &v) in sums.iter_mut().zip(px) {
                *sum += f64::from(v);
            }
        }
        let n = self.pixels.len() as f64;
        sums.map(|s| (s / n) as f32)
    }

    /// Fraction of components sitting exactly at `ceiling`.
    pub fn clipped_fraction(&self, ceiling: f32) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let clipped = self
            .pixels
            .iter()
            .flatten()
            .filter(|&&v| v >= ceiling)
            .count();
        clipped as f32 / (self.pixels.len() * 3) as f32
    }
}
