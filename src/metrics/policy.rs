use crate::metrics::record::QcMeasurements;
use serde::{Deserialize, Serialize};

/// Acceptance rule deciding `qc_pass` from measured values.
pub trait QcPolicy {
    fn name(&self) -> &str;

    fn passes(&self, measurements: &QcMeasurements) -> bool;
}

/// Threshold policy over genome coverage, N content and median depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageThresholdPolicy {
    pub min_pct_covered_bases: f64,
    pub max_pct_n_bases: Option<f64>,
    pub min_median_depth: Option<f64>,
}

impl Default for CoverageThresholdPolicy {
    fn default() -> Self {
        Self {
            min_pct_covered_bases: 90.0,
            max_pct_n_bases: None,
            min_median_depth: None,
        }
    }
}

impl QcPolicy for CoverageThresholdPolicy {
    fn name(&self) -> &str {
        "coverage-threshold"
    }

    fn passes(&self, m: &QcMeasurements) -> bool {
        m.pct_covered_bases >= self.min_pct_covered_bases
            && self.max_pct_n_bases.map_or(true, |max| m.pct_n_bases <= max)
            && self
                .min_median_depth
                .map_or(true, |min| m.median_depth_coverage >= min)
    }
}

/// Wraps an arbitrary predicate as a named policy.
pub struct PredicatePolicy<F> {
    name: String,
    predicate: F,
}

impl<F> PredicatePolicy<F>
where
    F: Fn(&QcMeasurements) -> bool,
{
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> QcPolicy for PredicatePolicy<F>
where
    F: Fn(&QcMeasurements) -> bool,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn passes(&self, measurements: &QcMeasurements) -> bool {
        (self.predicate)(measurements)
    }
}
