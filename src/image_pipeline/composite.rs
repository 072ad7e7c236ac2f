//! Three-band compositing module
//!
//! This module combines a normalized band set into a displayable RGB image
//! under live display parameters, and holds the interaction state that
//! drives recomposition.

mod controls;
mod engine;
mod session;
pub mod types;


pub use controls::{ControlPanel, ParameterControl, SliderBounds};
pub use engine::compose;
pub use session::CompositeSession;
pub use types::{BandSet, CompositeImage, DisplayParameters, DisplayParametersBuilder};
