//! Fixtures shared by the unit tests.

use std::io::Cursor;

use tiff::encoder::{TiffEncoder, colortype};

use crate::image_pipeline::grid::IntensityGrid;

/// Encodes samples (top row first, as TIFF stores them) as a Gray32Float TIFF.
pub fn encode_gray_f32(width: u32, height: u32, samples: &[f32]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
    encoder
        .write_image::<colortype::Gray32Float>(width, height, samples)
        .unwrap();
    buffer
}

pub fn encode_gray_f64(width: u32, height: u32, samples: &[f64]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
    encoder
        .write_image::<colortype::Gray64Float>(width, height, samples)
        .unwrap();
    buffer
}

pub fn encode_gray_u16(width: u32, height: u32, samples: &[u16]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
    encoder
        .write_image::<colortype::Gray16>(width, height, samples)
        .unwrap();
    buffer
}

pub fn encode_rgb_u8(width: u32, height: u32, samples: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
    encoder
        .write_image::<colortype::RGB8>(width, height, samples)
        .unwrap();
    buffer
}

/// Builds a FITS file from header cards (without END) and a big-endian data
/// unit, padding both to whole 2880-byte blocks.
pub fn fits_file(cards: &[&str], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for card in cards.iter().copied().chain(["END"]) {
        out.extend_from_slice(format!("{card:<80}").as_bytes());
    }
    out.resize(out.len().div_ceil(2880) * 2880, b' ');
    out.extend_from_slice(data);
    out.resize(out.len().div_ceil(2880) * 2880, 0);
    out
}

/// A BITPIX = -32 FITS image; samples are bottom row first, as FITS stores them.
pub fn encode_fits_f32(width: usize, height: usize, samples: &[f32]) -> Vec<u8> {
    let naxis1 = format!("NAXIS1  = {width:>20}");
    let naxis2 = format!("NAXIS2  = {height:>20}");
    let cards = [
        "SIMPLE  =                    T",
        "BITPIX  =                  -32",
        "NAXIS   =                    2",
        naxis1.as_str(),
        naxis2.as_str(),
    ];
    let data: Vec<u8> = samples.iter().flat_map(|v| v.to_be_bytes()).collect();
    fits_file(&cards, &data)
}

/// A `width` x `height` grid whose sample at (row, col) is `f(row, col)`.
pub fn grid_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f32) -> IntensityGrid {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(f(row, col));
        }
    }
    IntensityGrid::new(width, height, data).unwrap()
}
