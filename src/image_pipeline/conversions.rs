//! Pipeline conversions module
//!
//! This module contains orchestration logic that turns band images into a
//! composite-ready band set.

mod bands_to_composite;
pub mod types;


pub use bands_to_composite::BandsToCompositePipeline;
pub use types::{PipelineConfig, PipelineConfigBuilder, PreparedBands};
