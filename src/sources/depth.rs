use crate::error::{QcError, Result};
use crate::types::DepthRecord;
use crate::utils::external_tools::run_samtools;
use log::debug;
use rust_htslib::bam::{self, Read};
use std::path::{Path, PathBuf};

/// Supplies per-position depth for one alignment file.
pub trait DepthSource {
    /// Records ordered by position; positions may be omitted where depth is 0.
    fn depth_records(&self) -> Result<Vec<DepthRecord>>;
}

/// Depth from an in-process pileup.
///
/// Like `samtools depth`, unmapped, secondary, QC-failed and duplicate reads are
/// skipped, as are reads with a deletion or reference skip at the position.
pub struct HtslibDepth {
    bam: PathBuf,
}

impl HtslibDepth {
    pub fn new(bam: impl Into<PathBuf>) -> Self {
        Self { bam: bam.into() }
    }
}

impl DepthSource for HtslibDepth {
    fn depth_records(&self) -> Result<Vec<DepthRecord>> {
        let alignment_error = |source| QcError::Alignment {
            path: self.bam.clone(),
            source,
        };

        let mut bam = bam::Reader::from_path(&self.bam).map_err(alignment_error)?;
        let header = bam.header().clone();

        let mut pileups = bam.pileup();
        pileups.set_max_depth(i32::MAX as u32);

        let mut records = Vec::new();
        for p in pileups {
            let pileup = p.map_err(alignment_error)?;
            let depth = pileup
                .alignments()
                .filter(|aln| !aln.is_del() && !aln.is_refskip())
                .count() as u32;
            let contig = String::from_utf8_lossy(header.tid2name(pileup.tid())).into_owned();
            records.push(DepthRecord::new(contig, pileup.pos() as u64 + 1, depth));
        }

        debug!("Pileup of {} produced {} covered positions", self.bam.display(), records.len());
        Ok(records)
    }
}

/// Depth from `samtools depth -a -d 0`.
pub struct SamtoolsDepth {
    bam: PathBuf,
}

impl SamtoolsDepth {
    pub fn new(bam: impl Into<PathBuf>) -> Self {
        Self { bam: bam.into() }
    }
}

impl DepthSource for SamtoolsDepth {
    fn depth_records(&self) -> Result<Vec<DepthRecord>> {
        let bam = self.bam.to_string_lossy();
        let output = run_samtools(&["depth", "-a", "-d", "0", bam.as_ref()])?;
        parse_depth_output(&output, &self.bam)
    }
}

/// Parses `contig<TAB>position<TAB>depth` lines.
pub(crate) fn parse_depth_output(text: &str, bam: &Path) -> Result<Vec<DepthRecord>> {
    let unparsable = |line_no: usize, line: &str| QcError::ExternalTool {
        tool: "samtools depth".to_string(),
        message: format!(
            "unparsable output line {} for {}: '{}'",
            line_no,
            bam.display(),
            line
        ),
    };

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| {
            let mut fields = line.split('\t');
            match (fields.next(), fields.next(), fields.next()) {
                (Some(contig), Some(pos), Some(depth)) => {
                    let position = pos.parse::<u64>().map_err(|_| unparsable(idx + 1, line))?;
                    let depth = depth.parse::<u32>().map_err(|_| unparsable(idx + 1, line))?;
                    Ok(DepthRecord::new(contig, position, depth))
                }
                _ => Err(unparsable(idx + 1, line)),
            }
        })
        .collect()
}
