//! Depth aggregation over a materialized [`DepthSeries`].
//!
//! All functions are pure: they read the series and never modify it.

mod depth_series;

pub use depth_series::DepthSeries;

use crate::utils::safe_math::safe_median;

/// Covered positions inside an amplicon region, with the region length used as the
/// percentage denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionCoverage {
    pub covered: u64,
    pub length: u64,
}

/// Number of positions with depth of at least `min_depth`.
pub fn covered_count(series: &DepthSeries, min_depth: u32) -> u64 {
    series.depths().iter().filter(|&&d| d >= min_depth).count() as u64
}

/// Covered positions within the 1-based inclusive region `start..=end`.
///
/// The reported length is `end - start`, which is what percentages are taken against.
pub fn region_covered_count(series: &DepthSeries, min_depth: u32, start: u64, end: u64) -> RegionCoverage {
    let covered = series
        .range(start, end)
        .iter()
        .filter(|&&d| d >= min_depth)
        .count() as u64;
    RegionCoverage {
        covered,
        length: end.saturating_sub(start),
    }
}

/// Median depth over the whole series; 0 when empty.
pub fn median_depth(series: &DepthSeries) -> f64 {
    safe_median(&mut series.depths().to_vec())
}

/// Median depth over 1-based positions `start..=end`; 0 when no position falls inside.
pub fn amplicon_median_depth(series: &DepthSeries, start: u64, end: u64) -> f64 {
    safe_median(&mut series.range(start, end).to_vec())
}
