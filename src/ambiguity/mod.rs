//! Unresolved-base ("N") analysis of a consensus sequence.

use crate::utils::safe_math::{safe_divide, safe_percent};
use serde::{Deserialize, Serialize};

pub const AMBIGUITY_MARKER: u8 = b'N';

fn is_ambiguous(base: u8) -> bool {
    base.to_ascii_uppercase() == AMBIGUITY_MARKER
}

/// 0-based indices of every `N`/`n`, in sequence order.
pub fn ambiguous_positions(sequence: &[u8]) -> Vec<usize> {
    sequence
        .iter()
        .enumerate()
        .filter(|(_, &b)| is_ambiguous(b))
        .map(|(i, _)| i)
        .collect()
}

/// Percentage of ambiguous bases; 0 for an empty sequence.
pub fn pct_ambiguous(sequence: &[u8]) -> f64 {
    let count = sequence.iter().filter(|&&b| is_ambiguous(b)).count();
    safe_percent(count as u64, sequence.len() as u64)
}

/// Length of the longest stretch without ambiguous bases.
///
/// An N-free sequence yields its full length; an all-N or empty sequence yields 0.
pub fn longest_clean_run(sequence: &[u8]) -> usize {
    sequence
        .split(|&b| is_ambiguous(b))
        .map(<[u8]>::len)
        .max()
        .unwrap_or(0)
}

/// Divisor applied to windows cut short by the end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityNormalization {
    /// Always divide by the configured window size, so density tapers off toward the
    /// right edge.
    #[default]
    Nominal,
    /// Divide by the number of bases actually in the window.
    Truncated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub midpoint: f64,
    pub density: f64,
}

/// Fraction of ambiguous bases in the window starting at every offset.
///
/// Produces one point per base, positioned at `offset + window / 2`. Returns nothing for
/// a zero window.
pub fn sliding_density(sequence: &[u8], window: usize, normalization: DensityNormalization) -> Vec<DensityPoint> {
    if window == 0 {
        return Vec::new();
    }

    let len = sequence.len();
    let half = window as f64 / 2.0;
    let mut points = Vec::with_capacity(len);

    // Running count over sequence[i .. min(i + window, len)]
    let mut count = sequence[..window.min(len)]
        .iter()
        .filter(|&&b| is_ambiguous(b))
        .count();

    for i in 0..len {
        let actual = window.min(len - i);
        let divisor = match normalization {
            DensityNormalization::Nominal => window,
            DensityNormalization::Truncated => actual,
        };
        points.push(DensityPoint {
            midpoint: i as f64 + half,
            density: safe_divide(count as f64, divisor as f64),
        });

        if is_ambiguous(sequence[i]) {
            count -= 1;
        }
        if let Some(&entering) = sequence.get(i + window) {
            if is_ambiguous(entering) {
                count += 1;
            }
        }
    }

    points
}

/// The ambiguity figures that go into the QC record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmbiguitySummary {
    pub n_count: usize,
    pub pct_n_bases: f64,
    pub longest_clean_run: usize,
}

impl AmbiguitySummary {
    pub fn from_sequence(sequence: &[u8]) -> Self {
        if sequence.is_empty() {
            return Self::default();
        }

        Self {
            n_count: ambiguous_positions(sequence).len(),
            pct_n_bases: pct_ambiguous(sequence),
            longest_clean_run: longest_clean_run(sequence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_case_insensitive() {
        assert_eq!(ambiguous_positions(b"ANnTGn"), vec![1, 2, 5]);
        assert!(ambiguous_positions(b"ACGT").is_empty());
    }

    #[test]
    fn test_pct_ambiguous() {
        assert_eq!(pct_ambiguous(b""), 0.0);
        assert_eq!(pct_ambiguous(b"NNAA"), 50.0);
        assert_eq!(pct_ambiguous(&[b'N'; 600]), 100.0);
    }

    #[test]
    fn test_longest_clean_run() {
        assert_eq!(longest_clean_run(&[b'A'; 600]), 600);
        assert_eq!(longest_clean_run(&[b'N'; 600]), 0);
        assert_eq!(longest_clean_run(b""), 0);
        assert_eq!(longest_clean_run(b"ACNGTTANNA"), 4);
        assert_eq!(longest_clean_run(b"NNACGTN"), 4);
        assert_eq!(longest_clean_run(b"nACn"), 2);
    }

    #[test]
    fn test_sliding_density_nominal_taper() {
        let points = sliding_density(b"NNNN", 2, DensityNormalization::Nominal);
        let densities: Vec<f64> = points.iter().map(|p| p.density).collect();
        assert_eq!(densities, vec![1.0, 1.0, 1.0, 0.5]);
        let midpoints: Vec<f64> = points.iter().map(|p| p.midpoint).collect();
        assert_eq!(midpoints, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sliding_density_truncated() {
        let points = sliding_density(b"NNNN", 2, DensityNormalization::Truncated);
        assert!(points.iter().all(|p| p.density == 1.0));
    }

    #[test]
    fn test_sliding_density_matches_direct_count() {
        let seq = b"ANNTGCANNNNACGTNACGTAAAAN";
        let window = 5;
        let points = sliding_density(seq, window, DensityNormalization::Nominal);
        assert_eq!(points.len(), seq.len());
        for (i, point) in points.iter().enumerate() {
            let end = (i + window).min(seq.len());
            let expected = seq[i..end].iter().filter(|&&b| b == b'N').count() as f64 / window as f64;
            assert_eq!(point.density, expected, "offset {}", i);
        }
    }

    #[test]
    fn test_sliding_density_window_longer_than_sequence() {
        let points = sliding_density(b"NA", 10, DensityNormalization::Nominal);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].density, 0.1);
        assert_eq!(points[1].density, 0.0);
        assert_eq!(points[0].midpoint, 5.0);
    }

    #[test]
    fn test_sliding_density_degenerate() {
        assert!(sliding_density(b"", 10, DensityNormalization::Nominal).is_empty());
        assert!(sliding_density(b"NNN", 0, DensityNormalization::Nominal).is_empty());
    }

    #[test]
    fn test_summary_of_empty_sequence() {
        assert_eq!(AmbiguitySummary::from_sequence(b""), AmbiguitySummary::default());
    }

    #[test]
    fn test_summary_all_n() {
        let summary = AmbiguitySummary::from_sequence(&[b'N'; 600]);
        assert_eq!(summary.n_count, 600);
        assert_eq!(summary.pct_n_bases, 100.0);
        assert_eq!(summary.longest_clean_run, 0);
    }
}
