//! Band preparation configuration types

use crate::image_pipeline::composite::BandSet;
use crate::image_pipeline::normalize::DEFAULT_CLIP_PERCENTILE;
use crate::image_pipeline::timing::PipelineTimings;

/// Configuration for turning three band images into a composite-ready band set
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Whether to fill zero-valued gaps before normalizing
    pub repair_gaps: bool,
    /// Percentile each band is clipped at before rescaling to [0, 1]
    pub clip_percentile: f32,
    /// Whether to reject zero-sized bands
    pub validate_dimensions: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            repair_gaps: true,
            clip_percentile: DEFAULT_CLIP_PERCENTILE,
            validate_dimensions: true,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    repair_gaps: Option<bool>,
    clip_percentile: Option<f32>,
    validate_dimensions: Option<bool>,
}

impl PipelineConfigBuilder {
    pub fn repair_gaps(mut self, enable: bool) -> Self {
        self.repair_gaps = Some(enable);
        self
    }

    pub fn clip_percentile(mut self, percentile: f32) -> Self {
        self.clip_percentile = Some(percentile);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            repair_gaps: self.repair_gaps.unwrap_or(default.repair_gaps),
            clip_percentile: self.clip_percentile.unwrap_or(default.clip_percentile),
            validate_dimensions: self
                .validate_dimensions
                .unwrap_or(default.validate_dimensions),
        }
    }
}

/// Normalized band set plus the time spent producing it
#[derive(Debug, Clone)]
pub struct PreparedBands {
    pub bands: BandSet,
    pub timings: PipelineTimings,
}
