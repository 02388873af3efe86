//! Primer scheme handling: reading primer tables and deriving amplicons from them.

mod reader;
mod resolver;

pub use reader::{read_primer_bed, read_primer_pairs, PrimerPairs};
pub use resolver::{primers_to_amplicons, AmpliconSet, PrimerSet};

use crate::error::{QcError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the amplicon number is embedded in a primer name, e.g. field 2 of
/// `MPXV_tile_7_LEFT` split on `_`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimerNaming {
    pub delimiter: String,
    pub amplicon_field: usize,
}

impl Default for PrimerNaming {
    fn default() -> Self {
        Self {
            delimiter: "_".to_string(),
            amplicon_field: 2,
        }
    }
}

impl PrimerNaming {
    pub fn new(delimiter: impl Into<String>, amplicon_field: usize) -> Self {
        Self {
            delimiter: delimiter.into(),
            amplicon_field,
        }
    }

    pub fn amplicon_number(&self, primer_name: &str) -> Result<String> {
        primer_name
            .split(self.delimiter.as_str())
            .nth(self.amplicon_field)
            .map(str::to_string)
            .ok_or_else(|| QcError::MalformedIdentifier {
                name: primer_name.to_string(),
                delimiter: self.delimiter.clone(),
                field: self.amplicon_field,
            })
    }
}

/// Reads both primer tables and resolves them into the amplicon set.
pub fn load_amplicons(primer_bed: &Path, primer_pairs: &Path, naming: &PrimerNaming) -> Result<AmpliconSet> {
    let pairs = read_primer_pairs(primer_pairs)?;
    let primers = PrimerSet::new(read_primer_bed(primer_bed, &pairs, naming)?)?;
    primers_to_amplicons(&primers)
}
