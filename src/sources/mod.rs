//! Inputs the QC engine consumes but does not compute: depth, read counts and sequences.

mod depth;
mod fasta;
mod reads;

pub use depth::{DepthSource, HtslibDepth, SamtoolsDepth};
pub use fasta::{read_consensus, read_single_record, reference_length};
pub use reads::{HtslibReadCounter, ReadCounter, SamtoolsReadCounter};

use crate::error::Result;
use crate::utils::external_tools::check_samtools;
use std::path::Path;

/// Where depth and read counts come from.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AlignmentBackend {
    /// Read the BAM in-process with htslib
    #[default]
    #[value(name = "htslib")]
    Htslib,
    /// Shell out to samtools depth / samtools view
    #[value(name = "samtools")]
    Samtools,
}

impl AlignmentBackend {
    /// Builds the depth source and read counter for `bam`, checking for samtools first
    /// when that backend is selected.
    pub fn open(&self, bam: &Path) -> Result<(Box<dyn DepthSource>, Box<dyn ReadCounter>)> {
        match self {
            AlignmentBackend::Htslib => Ok((
                Box::new(HtslibDepth::new(bam)),
                Box::new(HtslibReadCounter::new(bam)),
            )),
            AlignmentBackend::Samtools => {
                check_samtools()?;
                Ok((
                    Box::new(SamtoolsDepth::new(bam)),
                    Box::new(SamtoolsReadCounter::new(bam)),
                ))
            }
        }
    }
}
