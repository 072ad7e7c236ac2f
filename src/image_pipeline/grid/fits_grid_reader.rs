//! Single-band grid reader for FITS primary images.
//!
//! Survey services deliver each plate as a FITS file whose primary HDU holds a
//! 2D image. Only that primary HDU is read. Integer samples are scaled with
//! BSCALE/BZERO and BLANK samples become NaN; float samples are kept as
//! stored, NaN included. FITS stores the bottom row first, which already
//! matches grid row order.

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::grid::reader::GridReader;
use crate::image_pipeline::grid::types::{IntensityGrid, sample_from_f64};

/// FITS files are made of 2880-byte blocks.
const BLOCK_LEN: usize = 2880;

/// Header cards are fixed 80-character records.
const CARD_LEN: usize = 80;

/// Grid reader for FITS files with a 2D primary image.
pub struct FitsGridReader;

/// Primary header keywords needed to decode the image.
#[derive(Debug)]
struct PrimaryHeader {
    bitpix: i64,
    width: usize,
    height: usize,
    bscale: f64,
    bzero: f64,
    blank: Option<i64>,
    /// Offset of the data unit from the start of the file
    data_offset: usize,
}

fn decode_error(msg: impl Into<String>) -> PipelineError {
    PipelineError::DecodeError(msg.into())
}

/// Splits a card into keyword and value text, dropping any inline comment.
fn split_card(card: &str) -> (&str, Option<&str>) {
    let keyword = card.get(..8).unwrap_or(card).trim_end();
    if card.get(8..10) != Some("= ") {
        return (keyword, None);
    }
    let value = &card[10..];
    let value = if value.trim_start().starts_with('\'') {
        value
    } else {
        value.split('/').next().unwrap_or(value)
    };
    (keyword, Some(value.trim()))
}

fn parse_int(keyword: &str, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|_| decode_error(format!("{keyword} is not an integer: '{value}'")))
}

fn parse_real(keyword: &str, value: &str) -> Result<f64> {
    // Fortran-style exponents are legal in headers
    value
        .replace(['D', 'd'], "E")
        .parse::<f64>()
        .map_err(|_| decode_error(format!("{keyword} is not a number: '{value}'")))
}

fn parse_header(data: &[u8]) -> Result<PrimaryHeader> {
    let mut bitpix = None;
    let mut naxis = None;
    let mut axes: Vec<(usize, usize)> = Vec::new();
    let mut bscale = 1.0;
    let mut bzero = 0.0;
    let mut blank = None;

    for (index, raw) in data.chunks(CARD_LEN).enumerate() {
        if raw.len() < CARD_LEN {
            break;
        }
        let card = std::str::from_utf8(raw).map_err(|_| decode_error("header is not ASCII"))?;
        let (keyword, value) = split_card(card);

        if index == 0 && (keyword != "SIMPLE" || value != Some("T")) {
            return Err(decode_error("missing SIMPLE = T card"));
        }

        if keyword == "END" {
            let header_len = (index + 1) * CARD_LEN;
            let data_offset = header_len.div_ceil(BLOCK_LEN) * BLOCK_LEN;
            let bitpix = bitpix.ok_or_else(|| decode_error("missing BITPIX"))?;
            let naxis: usize = naxis.ok_or_else(|| decode_error("missing NAXIS"))?;
            let axis = |n: usize| -> Result<usize> {
                axes.iter()
                    .find(|(i, _)| *i == n)
                    .map(|(_, len)| *len)
                    .ok_or_else(|| decode_error(format!("missing NAXIS{n}")))
            };

            if naxis < 2 {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "expected a 2D FITS image, NAXIS = {naxis}"
                )));
            }
            for n in 3..=naxis {
                if axis(n)? != 1 {
                    return Err(PipelineError::UnsupportedFormat(format!(
                        "expected a single-band FITS image, NAXIS{n} = {}",
                        axis(n)?
                    )));
                }
            }

            return Ok(PrimaryHeader {
                bitpix,
                width: axis(1)?,
                height: axis(2)?,
                bscale,
                bzero,
                blank,
                data_offset,
            });
        }

        let Some(value) = value else { continue };
        match keyword {
            "BITPIX" => bitpix = Some(parse_int(keyword, value)?),
            "NAXIS" => {
                let n = parse_int(keyword, value)?;
                naxis = Some(usize::try_from(n).map_err(|_| decode_error("negative NAXIS"))?);
            }
            "BSCALE" => bscale = parse_real(keyword, value)?,
            "BZERO" => bzero = parse_real(keyword, value)?,
            "BLANK" => blank = Some(parse_int(keyword, value)?),
            _ => {
                if let Some(n) = keyword.strip_prefix("NAXIS").and_then(|n| n.parse::<usize>().ok()) {
                    let len = parse_int(keyword, value)?;
                    let len = usize::try_from(len)
                        .map_err(|_| decode_error(format!("negative {keyword}")))?;
                    axes.push((n, len));
                }
            }
        }
    }

    Err(decode_error("header has no END card"))
}

impl FitsGridReader {
    /// True when `data` starts like a FITS primary header.
    pub fn sniff(data: &[u8]) -> bool {
        data.starts_with(b"SIMPLE  =")
    }
}

impl GridReader for FitsGridReader {
    /// Decodes the primary image of a FITS file.
    ///
    /// # Errors
    ///
    /// * `DecodeError` - malformed header or truncated data unit
    /// * `UnsupportedFormat` - not a 2D image, or an invalid BITPIX
    fn read_grid(&self, data: &[u8]) -> Result<IntensityGrid> {
        debug!("Decoding FITS band, {} bytes", data.len());

        let header = parse_header(data)?;
        debug!(?header, "Parsed FITS primary header");

        let (width, height) = (header.width, header.height);
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        let sample_len = match header.bitpix {
            8 => 1,
            16 => 2,
            32 | -32 => 4,
            64 | -64 => 8,
            other => {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "invalid BITPIX {other}"
                )));
            }
        };

        let count = width * height;
        let end = header.data_offset + count * sample_len;
        let body = data.get(header.data_offset..end).ok_or_else(|| {
            decode_error(format!(
                "data unit truncated: need {} bytes, file has {}",
                end,
                data.len()
            ))
        })?;

        let scale = |raw: i64| -> f32 {
            if header.blank == Some(raw) {
                f32::NAN
            } else {
                sample_from_f64(header.bzero + header.bscale * raw as f64)
            }
        };

        let samples: Vec<f32> = match header.bitpix {
            8 => body.iter().map(|&b| scale(i64::from(b))).collect(),
            16 => body
                .chunks_exact(2)
                .map(|c| scale(i64::from(i16::from_be_bytes([c[0], c[1]]))))
                .collect(),
            32 => body
                .chunks_exact(4)
                .map(|c| scale(i64::from(i32::from_be_bytes([c[0], c[1], c[2], c[3]]))))
                .collect(),
            64 => body
                .chunks_exact(8)
                .map(|c| {
                    let mut b = [0u8; 8];
                    b.copy_from_slice(c);
                    scale(i64::from_be_bytes(b))
                })
                .collect(),
            -32 => body
                .chunks_exact(4)
                .map(|c| {
                    let v = f32::from_be_bytes([c[0], c[1], c[2], c[3]]);
                    sample_from_f64(header.bzero + header.bscale * f64::from(v))
                })
                .collect(),
            _ => body
                .chunks_exact(8)
                .map(|c| {
                    let mut b = [0u8; 8];
                    b.copy_from_slice(c);
                    sample_from_f64(header.bzero + header.bscale * f64::from_be_bytes(b))
                })
                .collect(),
        };

        debug!("Decoded band: {}x{}", width, height);
        IntensityGrid::new(width, height, samples)
    }
}
