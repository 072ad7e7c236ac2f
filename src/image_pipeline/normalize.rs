//! Band normalization module

mod band_normalizer;


pub use band_normalizer::{
    DEFAULT_CLIP_PERCENTILE, clip_to_percentile, normalize, normalize_with_percentile, percentile,
    rescale_unit,
};
