use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::fits_grid_reader::FitsGridReader;
use crate::image_pipeline::grid::reader::GridReader;
use crate::image_pipeline::grid::tiff_grid_reader::TiffGridReader;
use crate::image_pipeline::grid::types::IntensityGrid;

/// Picks the FITS or TIFF reader from the leading bytes of the file.
pub struct AutoGridReader;

fn is_tiff(data: &[u8]) -> bool {
    [b"II*\0", b"MM\0*", b"II+\0", b"MM\0+"]
        .iter()
        .any(|magic| data.starts_with(*magic))
}

impl GridReader for AutoGridReader {
    fn read_grid(&self, data: &[u8]) -> Result<IntensityGrid> {
        if FitsGridReader::sniff(data) {
            debug!("Band looks like FITS");
            FitsGridReader.read_grid(data)
        } else if is_tiff(data) {
            debug!("Band looks like TIFF");
            TiffGridReader.read_grid(data)
        } else {
            Err(PipelineError::UnsupportedFormat(
                "band is neither FITS nor TIFF".to_string(),
            ))
        }
    }
}
