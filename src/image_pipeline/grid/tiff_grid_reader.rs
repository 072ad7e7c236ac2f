//! Single-band grid reader backed by the tiff crate.
//!
//! Survey cut-outs are exported as one grayscale TIFF per band. This reader
//! decodes integer or floating point samples into an `IntensityGrid` without
//! touching their values: NaN and infinities survive decoding and are left to
//! the repair and normalization stages.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::reader::GridReader;
use crate::image_pipeline::grid::types::{IntensityGrid, sample_from_f64};

/// Grid reader for single-channel TIFF files.
///
/// TIFF stores the top row first while grids keep the bottom row at index 0,
/// so rows are flipped on the way in.
pub struct TiffGridReader;

impl GridReader for TiffGridReader {
    /// Decodes a grayscale TIFF into an intensity grid.
    ///
    /// # Errors
    ///
    /// * `DecodeError` - the bytes are not a readable TIFF
    /// * `UnsupportedFormat` - the image has more than one channel or an
    ///   unsupported sample type
    fn read_grid(&self, data: &[u8]) -> Result<IntensityGrid> {
        debug!("Decoding TIFF band, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
        let (width, height) = (width as usize, height as usize);

        let colortype = decoder
            .colortype()
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
        if !matches!(colortype, ColorType::Gray(_)) {
            return Err(PipelineError::UnsupportedFormat(format!(
                "expected a single-band grayscale TIFF, got {:?}",
                colortype
            )));
        }

        let samples: Vec<f32> = match decoder
            .read_image()
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?
        {
            DecodingResult::U8(v) => v.into_iter().map(f32::from).collect(),
            DecodingResult::U16(v) => v.into_iter().map(f32::from).collect(),
            DecodingResult::U32(v) => v.into_iter().map(|s| s as f32).collect(),
            // u64/i64 fit in f32's range; only precision is lost
            DecodingResult::U64(v) => v.into_iter().map(|s| s as f32).collect(),
            DecodingResult::I8(v) => v.into_iter().map(f32::from).collect(),
            DecodingResult::I16(v) => v.into_iter().map(f32::from).collect(),
            DecodingResult::I32(v) => v.into_iter().map(|s| s as f32).collect(),
            DecodingResult::I64(v) => v.into_iter().map(|s| s as f32).collect(),
            DecodingResult::F32(v) => v,
            DecodingResult::F64(v) => v.into_iter().map(sample_from_f64).collect(),
            #[allow(unreachable_patterns)]
            _ => {
                return Err(PipelineError::UnsupportedFormat(
                    "unsupported TIFF sample type".to_string(),
                ));
            }
        };

        debug!("Decoded band: {}x{}", width, height);

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        if samples.len() != width * height {
            return Err(PipelineError::DecodeError(format!(
                "expected {} samples, decoded {}",
                width * height,
                samples.len()
            )));
        }

        // Top-down file order to bottom-up grid order.
        let flipped: Vec<f32> = samples
            .chunks_exact(width)
            .rev()
            .flatten()
            .copied()
            .collect();

        IntensityGrid::new(width, height, flipped)
    }
}
