//! Survey band module
//!
//! Maps survey plates to composite channels and locates band files on disk.

mod bands;


pub use bands::{Channel, Survey, discover_band_files};
