//! Image processing pipeline module
//!
//! This module turns three single-band sky images into an adjustable false-color
//! composite, with separate modules for grid reading, gap repair, band
//! normalization, compositing, and orchestration.

pub mod common;
pub mod composite;
pub mod conversions;
pub mod grid;
pub mod normalize;
pub mod repair;
pub mod survey;
pub mod timing;

#[cfg(test)]
mod test_support;

pub use common::{PipelineError, Result};

pub use grid::{AutoGridReader, FitsGridReader, GridReader, IntensityGrid, TiffGridReader};

pub use repair::repair;

pub use normalize::{clip_to_percentile, normalize, normalize_with_percentile, rescale_unit};

pub use composite::{
    BandSet, CompositeImage, CompositeSession, ControlPanel, DisplayParameters,
    DisplayParametersBuilder, ParameterControl, SliderBounds, compose,
};

pub use conversions::{BandsToCompositePipeline, PipelineConfig, PipelineConfigBuilder, PreparedBands};

pub use survey::{Survey, discover_band_files};

pub use timing::{PipelineTimings, StepTiming, Timer};
