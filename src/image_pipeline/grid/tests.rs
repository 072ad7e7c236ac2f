use crate::image_pipeline::common::error::PipelineError;
use crate::image_pipeline::grid::{
    AutoGridReader, FitsGridReader, GridReader, IntensityGrid, TiffGridReader,
};
use crate::image_pipeline::repair::repair;
use crate::image_pipeline::test_support::{
    encode_fits_f32, encode_gray_f32, encode_gray_f64, encode_gray_u16, encode_rgb_u8, fits_file,
};

#[test]
fn test_new_rejects_wrong_sample_count() {
    let result = IntensityGrid::new(3, 3, vec![0.0; 8]);
    assert!(matches!(result, Err(PipelineError::InvalidDimensions(3, 3))));
}

#[test]
fn test_from_rows_rejects_ragged_rows() {
    let rows: Vec<Vec<f32>> = vec![vec![1.0, 2.0], vec![3.0]];
    assert!(IntensityGrid::from_rows(&rows).is_err());
}

#[test]
fn test_from_rows_keeps_bottom_row_first() {
    let grid = IntensityGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    assert_eq!(grid.dimensions(), (2, 2));
    assert_eq!(grid.get(0, 1), 2.0);
    assert_eq!(grid.row(1), &[3.0, 4.0]);
}

#[test]
fn test_sanitized_zeroes_non_finite() {
    let grid = IntensityGrid::from_rows(&[[f32::NAN, 1.5, f32::INFINITY, f32::NEG_INFINITY]]).unwrap();
    let clean = grid.sanitized();
    assert_eq!(clean.data(), &[0.0, 1.5, 0.0, 0.0]);
    // Input untouched
    assert!(grid.get(0, 0).is_nan());
}

#[test]
fn test_tiff_reader_float_samples_flipped_bottom_up() {
    // File order: top row [1, 2, 3], bottom row [4, 5, 6]
    let bytes = encode_gray_f32(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let grid = TiffGridReader.read_grid(&bytes).unwrap();

    assert_eq!(grid.dimensions(), (3, 2));
    assert_eq!(grid.row(0), &[4.0, 5.0, 6.0]);
    assert_eq!(grid.row(1), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_tiff_reader_preserves_nan() {
    let bytes = encode_gray_f32(2, 1, &[f32::NAN, 7.0]);
    let grid = TiffGridReader.read_grid(&bytes).unwrap();
    assert!(grid.get(0, 0).is_nan());
    assert_eq!(grid.get(0, 1), 7.0);
}

#[test]
fn test_tiff_reader_integer_samples() {
    let bytes = encode_gray_u16(2, 1, &[0, 65535]);
    let grid = TiffGridReader.read_grid(&bytes).unwrap();
    assert_eq!(grid.data(), &[0.0, 65535.0]);
}

#[test]
fn test_tiff_reader_rejects_rgb() {
    let bytes = encode_rgb_u8(1, 1, &[10, 20, 30]);
    let result = TiffGridReader.read_grid(&bytes);
    assert!(matches!(result, Err(PipelineError::UnsupportedFormat(_))));
}

#[test]
fn test_tiff_reader_rejects_garbage() {
    let result = TiffGridReader.read_grid(b"definitely not a tiff");
    assert!(matches!(result, Err(PipelineError::DecodeError(_))));
}

#[test]
fn test_tiff_reader_saturates_out_of_range_doubles() {
    let mut samples = [5.0f64; 9];
    samples[4] = 1e300;
    let bytes = encode_gray_f64(3, 3, &samples);
    let grid = TiffGridReader.read_grid(&bytes).unwrap();

    assert_eq!(grid.get(1, 1), f32::MAX);
    // A huge but finite sample is signal, not a gap
    assert_eq!(repair(&grid).get(1, 1), f32::MAX);
}

#[test]
fn test_tiff_reader_keeps_tiny_doubles_nonzero() {
    let mut samples = [5.0f64; 9];
    samples[4] = 1e-300;
    samples[0] = -1e-300;
    let bytes = encode_gray_f64(3, 3, &samples);
    let grid = TiffGridReader.read_grid(&bytes).unwrap();

    assert_eq!(grid.get(1, 1), f32::MIN_POSITIVE);
    // Top-left in the file is the last grid row
    assert_eq!(grid.get(2, 0), -f32::MIN_POSITIVE);
    assert_eq!(repair(&grid).get(1, 1), f32::MIN_POSITIVE);
}

#[test]
fn test_tiff_reader_keeps_special_doubles() {
    let bytes = encode_gray_f64(3, 1, &[f64::NAN, f64::INFINITY, 0.0]);
    let grid = TiffGridReader.read_grid(&bytes).unwrap();
    assert!(grid.get(0, 0).is_nan());
    assert_eq!(grid.get(0, 1), f32::INFINITY);
    assert_eq!(grid.get(0, 2), 0.0);
}

#[test]
fn test_fits_reader_float_samples_keep_bottom_row_first() {
    let bytes = encode_fits_f32(3, 2, &[1.0, 2.0, f32::NAN, 4.0, 5.0, 6.0]);
    let grid = FitsGridReader.read_grid(&bytes).unwrap();

    assert_eq!(grid.dimensions(), (3, 2));
    assert_eq!(grid.get(0, 0), 1.0);
    assert!(grid.get(0, 2).is_nan());
    assert_eq!(grid.row(1), &[4.0, 5.0, 6.0]);
}

#[test]
fn test_fits_reader_scales_integers_and_blanks() {
    let data: Vec<u8> = [-32768i16, 100, -1, 0]
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect();
    let bytes = fits_file(
        &[
            "SIMPLE  =                    T / conforms to FITS",
            "BITPIX  =                   16",
            "NAXIS   =                    2",
            "NAXIS1  =                    2",
            "NAXIS2  =                    2",
            "OBJECT  = 'M31 / Andromeda'",
            "BSCALE  =                1.0D0 / unit scale",
            "BZERO   =              32768.0",
            "BLANK   =                   -1",
            "COMMENT plate scanned at STScI",
        ],
        &data,
    );
    let grid = FitsGridReader.read_grid(&bytes).unwrap();

    assert_eq!(grid.row(0), &[0.0, 32868.0]);
    assert!(grid.get(1, 0).is_nan());
    assert_eq!(grid.get(1, 1), 32768.0);
}

#[test]
fn test_fits_reader_accepts_degenerate_third_axis() {
    let data: Vec<u8> = [7u8, 8].to_vec();
    let bytes = fits_file(
        &[
            "SIMPLE  =                    T",
            "BITPIX  =                    8",
            "NAXIS   =                    3",
            "NAXIS1  =                    2",
            "NAXIS2  =                    1",
            "NAXIS3  =                    1",
        ],
        &data,
    );
    let grid = FitsGridReader.read_grid(&bytes).unwrap();
    assert_eq!(grid.data(), &[7.0, 8.0]);
}

#[test]
fn test_fits_reader_rejects_cubes_and_bad_headers() {
    let cube = fits_file(
        &[
            "SIMPLE  =                    T",
            "BITPIX  =                    8",
            "NAXIS   =                    3",
            "NAXIS1  =                    2",
            "NAXIS2  =                    2",
            "NAXIS3  =                    3",
        ],
        &[0; 12],
    );
    assert!(matches!(
        FitsGridReader.read_grid(&cube),
        Err(PipelineError::UnsupportedFormat(_))
    ));

    let bad_bitpix = fits_file(
        &[
            "SIMPLE  =                    T",
            "BITPIX  =                   12",
            "NAXIS   =                    2",
            "NAXIS1  =                    1",
            "NAXIS2  =                    1",
        ],
        &[0; 2],
    );
    assert!(matches!(
        FitsGridReader.read_grid(&bad_bitpix),
        Err(PipelineError::UnsupportedFormat(_))
    ));

    let no_end = fits_file(&["SIMPLE  =                    T"], &[])
        .into_iter()
        .take(80)
        .collect::<Vec<u8>>();
    assert!(matches!(
        FitsGridReader.read_grid(&no_end),
        Err(PipelineError::DecodeError(_))
    ));
}

#[test]
fn test_fits_reader_rejects_truncated_data() {
    let mut bytes = encode_fits_f32(100, 100, &[1.0; 10]);
    bytes.truncate(2880 * 2);
    let result = FitsGridReader.read_grid(&bytes);
    assert!(matches!(result, Err(PipelineError::DecodeError(_))));
}

#[test]
fn test_auto_reader_dispatches_on_signature() {
    let fits = encode_fits_f32(2, 1, &[1.0, 2.0]);
    let tiff = encode_gray_f32(2, 1, &[1.0, 2.0]);

    assert_eq!(AutoGridReader.read_grid(&fits).unwrap().data(), &[1.0, 2.0]);
    assert_eq!(AutoGridReader.read_grid(&tiff).unwrap().data(), &[1.0, 2.0]);
    assert!(matches!(
        AutoGridReader.read_grid(b"P5 2 1 255"),
        Err(PipelineError::UnsupportedFormat(_))
    ));
}
