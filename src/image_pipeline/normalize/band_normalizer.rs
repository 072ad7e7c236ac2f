//! Display-range normalization for a single band.
//!
//! Normalization runs as two separate stages so each can be checked on its
//! own: [`clip_to_percentile`] pulls bright outliers down to a percentile of
//! the band, then [`rescale_unit`] min-max stretches the result onto [0, 1].

use crate::image_pipeline::grid::IntensityGrid;

/// Percentile used for the upper clip when none is configured.
pub const DEFAULT_CLIP_PERCENTILE: f32 = 99.0;

/// Percentile of `values` using linear interpolation between closest ranks.
///
/// `percentile` is in [0, 100] and is clamped into that range. Returns 0 for
/// an empty slice. Values are expected to be finite.
pub fn percentile(values: &[f32], percentile: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);

    let rank = f64::from(percentile.clamp(0.0, 100.0)) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }

    let fraction = rank - lower as f64;
    let (lo, hi) = (f64::from(sorted[lower]), f64::from(sorted[upper]));
    (lo + (hi - lo) * fraction) as f32
}

/// Clips every sample to `[0, p]` where `p` is the given percentile of the
/// sanitized band.
///
/// Outliers above `p` are pulled down to `p`, never dropped. When `p` is
/// negative every sample ends up at `p`.
pub fn clip_to_percentile(grid: &IntensityGrid, pct: f32) -> IntensityGrid {
    let clean = grid.sanitized();
    let upper = percentile(clean.data(), pct);
    clean.map(|v| v.max(0.0).min(upper))
}

/// Min-max rescales the band onto [0, 1].
///
/// A constant band (max equal to min) has no range to stretch and maps to an
/// all-zero grid.
pub fn rescale_unit(grid: &IntensityGrid) -> IntensityGrid {
    let clean = grid.sanitized();
    let (min, max) = clean
        .data()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if clean.is_empty() || max <= min {
        return clean.map(|_| 0.0);
    }

    let range = max - min;
    clean.map(|v| (v - min) / range)
}

/// Clips at the 99th percentile, then rescales onto [0, 1].
pub fn normalize(grid: &IntensityGrid) -> IntensityGrid {
    normalize_with_percentile(grid, DEFAULT_CLIP_PERCENTILE)
}

pub fn normalize_with_percentile(grid: &IntensityGrid, pct: f32) -> IntensityGrid {
    rescale_unit(&clip_to_percentile(grid, pct))
}
