use crate::types::DepthRecord;
use log::{debug, warn};

/// Per-position depth over the whole reference, 1-based.
///
/// Positions the depth source did not report are 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthSeries {
    depths: Vec<u32>,
}

impl DepthSeries {
    /// Materializes `records` into a series of exactly `reference_length` positions.
    pub fn from_records(records: &[DepthRecord], reference_length: u64) -> Self {
        let mut depths = vec![0u32; reference_length as usize];
        let mut out_of_range = 0usize;
        let mut contig: Option<&str> = None;

        for record in records {
            match contig {
                None => contig = Some(&record.contig),
                Some(name) if name != record.contig => {
                    warn!(
                        "Depth records span several contigs ({} and {}); positions are merged into one series",
                        name, record.contig
                    );
                    contig = Some(&record.contig);
                }
                _ => {}
            }

            match record.position.checked_sub(1).map(|idx| idx as usize) {
                Some(idx) if idx < depths.len() => depths[idx] = record.depth,
                _ => out_of_range += 1,
            }
        }

        if out_of_range > 0 {
            warn!(
                "Ignored {} depth records outside reference positions 1..={}",
                out_of_range, reference_length
            );
        }
        debug!(
            "Materialized {} depth records into {} positions",
            records.len(),
            reference_length
        );

        Self { depths }
    }

    pub fn from_depths(depths: Vec<u32>) -> Self {
        Self { depths }
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn depths(&self) -> &[u32] {
        &self.depths
    }

    /// Depth at a 1-based position.
    pub fn get(&self, position: u64) -> Option<u32> {
        let idx = position.checked_sub(1)? as usize;
        self.depths.get(idx).copied()
    }

    /// Depths at 1-based positions `start..=end`, clipped to the series.
    pub fn range(&self, start: u64, end: u64) -> &[u32] {
        let first = start.max(1) as usize - 1;
        let last = (end as usize).min(self.depths.len());
        if first >= last {
            &[]
        } else {
            &self.depths[first..last]
        }
    }
}
