use tracing::{debug, instrument};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::composite::engine::compose;
use crate::image_pipeline::composite::types::{BandSet, CompositeImage, DisplayParameters};

/// A band set that is ready to be composited on demand.
///
/// The session keeps the bands and the last parameters that rendered
/// successfully. It never caches an image: every call recomposes.
pub struct CompositeSession {
    bands: BandSet,
    params: DisplayParameters,
}

impl CompositeSession {
    pub fn new(bands: BandSet) -> Self {
        Self {
            bands,
            params: DisplayParameters::default(),
        }
    }

    /// Render shown before any interaction, using default parameters.
    pub fn initial_render(&self) -> Result<CompositeImage> {
        compose(&self.bands, DisplayParameters::default())
    }

    /// Recomposes for a complete new parameter set.
    ///
    /// On failure the previously applied parameters stay current.
    #[instrument(skip(self), level = "debug")]
    pub fn on_parameter_change(&mut self, params: DisplayParameters) -> Result<CompositeImage> {
        let image = compose(&self.bands, params)?;
        self.params = params;
        debug!(
            width = image.width,
            height = image.height,
            "Composite refreshed"
        );
        Ok(image)
    }

    /// Parameters of the last successful render.
    pub fn params(&self) -> DisplayParameters {
        self.params
    }

    pub fn bands(&self) -> &BandSet {
        &self.bands
    }
}
