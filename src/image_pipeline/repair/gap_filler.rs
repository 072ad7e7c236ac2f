//! Gap repair for single-band intensity grids.
//!
//! A gap is any sample that is exactly zero after non-finite values have been
//! sanitized to zero. Survey cut-outs mark missing plate coverage this way, but
//! so would genuine zero-signal sky background: both are treated as gaps. This
//! is a known limitation of the zero-as-missing convention and is kept as is.
//!
//! Each interior gap is replaced by the mean of its 8-connected neighbors that
//! are strictly positive. The outermost ring of samples is never repaired.

use rayon::prelude::*;

use crate::image_pipeline::grid::IntensityGrid;

/// Neighbor offsets (row, col) of the 8-connected neighborhood.
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Repairs gaps in `grid`, returning a new grid of the same shape.
///
/// Neighbor lookups always read the sanitized input, never a partially
/// repaired grid, so the result does not depend on visiting order and rows can
/// be filled in parallel. Grids narrower or shorter than 3 samples have no
/// interior and come back sanitized only.
///
/// # Examples
///
/// ```
/// use astro_composite_rs::image_pipeline::{IntensityGrid, repair};
///
/// let mut grid = IntensityGrid::filled(5, 5, 10.0);
/// grid.set(2, 2, 0.0);
/// assert_eq!(repair(&grid).get(2, 2), 10.0);
/// ```
pub fn repair(grid: &IntensityGrid) -> IntensityGrid {
    let source = grid.sanitized();
    let (width, height) = source.dimensions();
    if width < 3 || height < 3 {
        return source;
    }

    let mut out = source.data().to_vec();
    out.par_chunks_mut(width)
        .enumerate()
        .skip(1)
        .take(height - 2)
        .for_each(|(row, samples)| {
            for col in 1..width - 1 {
                if samples[col] == 0.0 {
                    if let Some(estimate) = neighbor_mean(&source, row, col) {
                        samples[col] = estimate;
                    }
                }
            }
        });

    source.with_data(out)
}

/// Mean of the strictly positive 8-neighbors of an interior cell.
fn neighbor_mean(source: &IntensityGrid, row: usize, col: usize) -> Option<f32> {
    let mut sum = 0.0f64;
    let mut count = 0u32;
    for (dr, dc) in NEIGHBORS {
        let value = source.get(
            (row as isize + dr) as usize,
            (col as isize + dc) as usize,
        );
        if value > 0.0 {
            sum += f64::from(value);
            count += 1;
        }
    }
    (count > 0).then(|| (sum / f64::from(count)) as f32)
}
