use serde::Serialize;

/// Median depth per amplicon, in natural amplicon-number order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AmpliconDepths(Vec<(String, f64)>);

impl AmpliconDepths {
    pub(crate) fn push(&mut self, number: String, median_depth: f64) {
        self.0.push((number, median_depth));
    }

    pub fn get(&self, number: &str) -> Option<f64> {
        self.0.iter().find(|(n, _)| n == number).map(|(_, d)| *d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(n, d)| (n.as_str(), *d))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything measured for a sample, before any pass/fail judgement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QcMeasurements {
    pub sample_name: String,
    pub pct_n_bases: f64,
    pub pct_covered_bases: f64,
    pub pct_amplicon_covered_bases: f64,
    pub longest_no_n_run: u64,
    pub num_aligned_reads: u64,
    pub median_depth_coverage: f64,
    pub fasta: String,
    pub bam: String,
    pub amplicon_median_depths: AmpliconDepths,
}

/// The final QC row for one sample. Built once by the composer; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QcRecord {
    #[serde(flatten)]
    measurements: QcMeasurements,
    qc_pass: bool,
    policy: String,
}

impl QcRecord {
    pub(crate) fn new(measurements: QcMeasurements, qc_pass: bool, policy: impl Into<String>) -> Self {
        Self {
            measurements,
            qc_pass,
            policy: policy.into(),
        }
    }

    pub fn measurements(&self) -> &QcMeasurements {
        &self.measurements
    }

    pub fn qc_pass(&self) -> bool {
        self.qc_pass
    }

    /// Name of the policy that produced `qc_pass`.
    pub fn policy(&self) -> &str {
        &self.policy
    }

    /// Column names, one per amplicon between the fixed columns and `qc_pass`.
    pub fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = [
            "sample_name",
            "pct_N_bases",
            "pct_covered_bases",
            "pct_amplicon_covered_bases",
            "longest_no_N_run",
            "num_aligned_reads",
            "median_depth_coverage",
            "fasta",
            "bam",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        header.extend(
            self.measurements
                .amplicon_median_depths
                .iter()
                .map(|(number, _)| format!("amplicon_{}_median_depth", number)),
        );
        header.push("qc_pass".to_string());
        header
    }

    /// Field values in the same order as [`QcRecord::header`].
    pub fn row(&self) -> Vec<String> {
        let m = &self.measurements;
        let mut row = vec![
            m.sample_name.clone(),
            format!("{:.2}", m.pct_n_bases),
            format!("{:.2}", m.pct_covered_bases),
            format!("{:.2}", m.pct_amplicon_covered_bases),
            m.longest_no_n_run.to_string(),
            m.num_aligned_reads.to_string(),
            m.median_depth_coverage.to_string(),
            m.fasta.clone(),
            m.bam.clone(),
        ];
        row.extend(m.amplicon_median_depths.iter().map(|(_, depth)| depth.to_string()));
        row.push(if self.qc_pass { "TRUE" } else { "FALSE" }.to_string());
        row
    }
}
