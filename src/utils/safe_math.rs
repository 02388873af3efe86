//! Zero-fallback arithmetic shared by every metric.
//!
//! Degenerate inputs (an empty consensus, a genome without depth, a missing amplicon
//! region) all resolve through these helpers so that each metric reports 0 the same way.

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// `count / total * 100`, or 0 when `total` is zero.
pub fn safe_percent(count: u64, total: u64) -> f64 {
    safe_divide(count as f64, total as f64) * 100.0
}

/// Median of `values`, or 0 for an empty slice.
///
/// An even number of values yields the mean of the two middle values. The slice is
/// reordered in place.
pub fn safe_median(values: &mut [u32]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }

    let mid = n / 2;
    let (lower, upper, _) = values.select_nth_unstable(mid);
    let upper = *upper as f64;
    if n % 2 == 1 {
        upper
    } else {
        let below = lower.iter().copied().max().unwrap_or(0) as f64;
        (below + upper) / 2.0
    }
}
