//! Gap repair module

mod gap_filler;


pub use gap_filler::repair;
