//! Composite engine: gain weighting and ceiling clip of three bands.

use rayon::prelude::*;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::composite::types::{BandSet, CompositeImage, DisplayParameters};

/// Builds the RGB composite of `bands` under `params`.
///
/// Each channel is its band scaled by the matching gain, then clipped to
/// `[0, params.ceiling]`. The bands are expected to be normalized already;
/// nothing is rescaled here. Always recomputes from scratch, so identical
/// inputs give bit-identical output.
///
/// # Errors
///
/// * `InvalidParameter` - `params` fails [`DisplayParameters::validate`]
pub fn compose(bands: &BandSet, params: DisplayParameters) -> Result<CompositeImage> {
    params.validate()?;

    let (width, height) = bands.dimensions();
    let gains = params.gains();
    let ceiling = params.ceiling;

    let pixels: Vec<[f32; 3]> = bands
        .red()
        .data()
        .par_iter()
        .zip(bands.green().data().par_iter())
        .zip(bands.blue().data().par_iter())
        .map(|((&r, &g), &b)| {
            [
                clip(r * gains[0], ceiling),
                clip(g * gains[1], ceiling),
                clip(b * gains[2], ceiling),
            ]
        })
        .collect();

    Ok(CompositeImage {
        width,
        height,
        pixels,
    })
}

/// Clamps into [0, ceiling]; NaN maps to 0.
#[inline]
fn clip(value: f32, ceiling: f32) -> f32 {
    if value > 0.0 { value.min(ceiling) } else { 0.0 }
}
