use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    common::error::{PipelineError, Result},
    composite::{BandSet, types::check_shape},
    conversions::types::{PipelineConfig, PreparedBands},
    grid::{AutoGridReader, GridReader, IntensityGrid},
    normalize::normalize_with_percentile,
    repair::repair,
    survey::discover_band_files,
    timing::PipelineTimings,
};

pub struct BandsToCompositePipeline<R: GridReader> {
    reader: R,
    config: PipelineConfig,
}

impl BandsToCompositePipeline<AutoGridReader> {
    /// Pipeline reading FITS or TIFF bands, chosen per file.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            reader: AutoGridReader,
            config,
        }
    }
}

impl<R: GridReader> BandsToCompositePipeline<R> {
    pub fn with_custom(reader: R, config: PipelineConfig) -> Self {
        Self { reader, config }
    }

    fn validate_dimensions(&self, grid: &IntensityGrid) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        let (width, height) = grid.dimensions();
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    fn decode_band(
        &self,
        band: &str,
        data: &[u8],
        timings: &mut PipelineTimings,
    ) -> Result<IntensityGrid> {
        let grid = {
            let _span = tracing::info_span!("decode_band", band).entered();
            timings.time("decode", || self.reader.read_grid(data))?
        };
        self.validate_dimensions(&grid)?;
        Ok(grid)
    }

    fn prepare_band(
        &self,
        band: &str,
        grid: IntensityGrid,
        timings: &mut PipelineTimings,
    ) -> IntensityGrid {
        let grid = if self.config.repair_gaps {
            let _span = tracing::info_span!("repair_band", band).entered();
            timings.time("repair", || repair(&grid))
        } else {
            grid
        };

        let _span = tracing::info_span!("normalize_band", band).entered();
        timings.time("normalize", || {
            normalize_with_percentile(&grid, self.config.clip_percentile)
        })
    }

    /// Decodes the red, green and blue band images and prepares them for
    /// compositing: optional gap repair, then percentile clip and rescale.
    ///
    /// Shapes are checked right after decoding, before any band is processed.
    #[instrument(skip_all, fields(
        red_size = red.len(),
        green_size = green.len(),
        blue_size = blue.len()
    ))]
    pub fn prepare(&self, red: &[u8], green: &[u8], blue: &[u8]) -> Result<PreparedBands> {
        info!("Preparing band set");
        let mut timings = PipelineTimings::new();

        let red = self.decode_band("red", red, &mut timings)?;
        let green = self.decode_band("green", green, &mut timings)?;
        let blue = self.decode_band("blue", blue, &mut timings)?;

        {
            let _span = tracing::info_span!("check_shapes").entered();
            check_shape("green", &red, &green)?;
            check_shape("blue", &red, &blue)?;
        }

        let red = self.prepare_band("red", red, &mut timings);
        let green = self.prepare_band("green", green, &mut timings);
        let blue = self.prepare_band("blue", blue, &mut timings);
        let bands = BandSet::new(red, green, blue)?;

        let (width, height) = bands.dimensions();
        info!(width, height, "Band set ready");
        Ok(PreparedBands { bands, timings })
    }

    /// Reads the three band files, in red, green, blue order, and prepares them.
    #[instrument(skip_all)]
    pub fn prepare_files<P: AsRef<Path>>(&self, paths: &[P; 3]) -> Result<PreparedBands> {
        let mut timings = PipelineTimings::new();
        let mut contents = Vec::with_capacity(3);
        for path in paths {
            let path = path.as_ref();
            info!(input = %path.display(), "Reading band file");
            let data = timings.time("read_input_file", || {
                std::fs::read(path).map_err(|e| {
                    PipelineError::InputReadError(format!("{}: {}", path.display(), e))
                })
            })?;
            contents.push(data);
        }

        let mut prepared = self.prepare(&contents[0], &contents[1], &contents[2])?;
        for step in prepared.timings.steps() {
            timings.add_step(step.name.clone(), step.duration);
        }
        prepared.timings = timings;
        Ok(prepared)
    }

    /// Locates the band files of an object folder and prepares them.
    pub fn prepare_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PreparedBands> {
        let dir = dir.as_ref();
        info!(dir = %dir.display(), "Loading object folder");
        let files = discover_band_files(dir)?;
        self.prepare_files(&files)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
