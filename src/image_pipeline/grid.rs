//! Intensity grid module
//!
//! This module provides the single-band grid type and format-agnostic
//! grid reading.

mod auto_grid_reader;
mod fits_grid_reader;
mod reader;
mod tiff_grid_reader;
pub mod types;

#[cfg(test)]
mod tests;

pub use auto_grid_reader::AutoGridReader;
pub use fits_grid_reader::FitsGridReader;
pub use reader::GridReader;
pub use tiff_grid_reader::TiffGridReader;
pub use types::IntensityGrid;
