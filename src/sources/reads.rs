use crate::error::{QcError, Result};
use crate::utils::external_tools::run_samtools;
use rust_htslib::bam::{self, Read};
use std::path::PathBuf;

/// Counts aligned reads in one alignment file.
pub trait ReadCounter {
    /// Number of records that are neither secondary nor supplementary.
    fn count_aligned_reads(&self) -> Result<u64>;
}

pub struct HtslibReadCounter {
    bam: PathBuf,
}

impl HtslibReadCounter {
    pub fn new(bam: impl Into<PathBuf>) -> Self {
        Self { bam: bam.into() }
    }
}

impl ReadCounter for HtslibReadCounter {
    fn count_aligned_reads(&self) -> Result<u64> {
        let alignment_error = |source| QcError::Alignment {
            path: self.bam.clone(),
            source,
        };

        let mut bam = bam::Reader::from_path(&self.bam).map_err(alignment_error)?;
        let mut count = 0u64;
        for record_result in bam.records() {
            let record = record_result.map_err(alignment_error)?;

            // Same filter as `samtools view -c -F 0x900`
            if !record.is_secondary() && !record.is_supplementary() {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Count from `samtools view -c -F 0x900`.
pub struct SamtoolsReadCounter {
    bam: PathBuf,
}

impl SamtoolsReadCounter {
    pub fn new(bam: impl Into<PathBuf>) -> Self {
        Self { bam: bam.into() }
    }
}

impl ReadCounter for SamtoolsReadCounter {
    fn count_aligned_reads(&self) -> Result<u64> {
        let bam = self.bam.to_string_lossy();
        let output = run_samtools(&["view", "-c", "-F", "0x900", bam.as_ref()])?;
        parse_count(&output)
    }
}

pub(crate) fn parse_count(text: &str) -> Result<u64> {
    text.trim().parse::<u64>().map_err(|_| QcError::ExternalTool {
        tool: "samtools view".to_string(),
        message: format!("expected a read count, got '{}'", text.trim()),
    })
}
