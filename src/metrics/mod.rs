//! Combines coverage, ambiguity and amplicon figures into the per-sample QC record.

mod policy;
mod record;

pub use policy::{CoverageThresholdPolicy, PredicatePolicy, QcPolicy};
pub use record::{AmpliconDepths, QcMeasurements, QcRecord};

use crate::ambiguity::AmbiguitySummary;
use crate::coverage::{amplicon_median_depth, covered_count, median_depth, region_covered_count, DepthSeries};
use crate::error::{QcError, Result};
use crate::primers::AmpliconSet;
use crate::utils::safe_math::safe_percent;
use log::{debug, info};
use std::path::PathBuf;

/// Per-sample inputs to [`compose`]. Everything is borrowed read-only.
pub struct SampleInputs<'a> {
    pub sample_name: &'a str,
    pub fasta_label: &'a str,
    pub bam_label: &'a str,
    pub reference_path: PathBuf,
    pub reference_length: u64,
    pub num_aligned_reads: u64,
    pub min_depth: u32,
    pub depth: &'a DepthSeries,
    pub consensus: &'a [u8],
    pub amplicons: &'a AmpliconSet,
}

/// Measures a sample and judges it with `policy`.
///
/// A zero-length reference is an error. An empty consensus, zero depth or an empty
/// amplicon set all produce zero-valued metrics instead.
pub fn compose(inputs: &SampleInputs<'_>, policy: &dyn QcPolicy) -> Result<QcRecord> {
    if inputs.reference_length == 0 {
        return Err(QcError::EmptyReference(inputs.reference_path.clone()));
    }

    let covered = covered_count(inputs.depth, inputs.min_depth);
    let pct_covered_bases = safe_percent(covered, inputs.reference_length);

    let pct_amplicon_covered_bases = match inputs.amplicons.region() {
        Some((start, end)) => {
            let region = region_covered_count(inputs.depth, inputs.min_depth, start, end);
            debug!(
                "Amplicon region {}-{}: {} of {} positions at depth >= {}",
                start, end, region.covered, region.length, inputs.min_depth
            );
            safe_percent(region.covered, region.length)
        }
        None => 0.0,
    };

    let ambiguity = AmbiguitySummary::from_sequence(inputs.consensus);

    let mut amplicon_median_depths = AmpliconDepths::default();
    for amplicon in inputs.amplicons {
        amplicon_median_depths.push(
            amplicon.number.clone(),
            amplicon_median_depth(inputs.depth, amplicon.start, amplicon.end),
        );
    }

    let measurements = QcMeasurements {
        sample_name: inputs.sample_name.to_string(),
        pct_n_bases: ambiguity.pct_n_bases,
        pct_covered_bases,
        pct_amplicon_covered_bases,
        longest_no_n_run: ambiguity.longest_clean_run as u64,
        num_aligned_reads: inputs.num_aligned_reads,
        median_depth_coverage: median_depth(inputs.depth),
        fasta: inputs.fasta_label.to_string(),
        bam: inputs.bam_label.to_string(),
        amplicon_median_depths,
    };

    let qc_pass = policy.passes(&measurements);
    info!(
        "{}: {:.2}% covered, {:.2}% N, qc_pass={} ({})",
        measurements.sample_name,
        measurements.pct_covered_bases,
        measurements.pct_n_bases,
        qc_pass,
        policy.name()
    );

    Ok(QcRecord::new(measurements, qc_pass, policy.name()))
}
