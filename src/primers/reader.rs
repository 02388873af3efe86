use crate::error::{QcError, Result};
use crate::primers::PrimerNaming;
use crate::types::{Orientation, Primer};
use crate::utils::input::{data_lines, open_text};
use log::{debug, info};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Symmetric primer partner lookup built from the pairs table.
#[derive(Debug, Default, Clone)]
pub struct PrimerPairs {
    partners: HashMap<String, String>,
}

impl PrimerPairs {
    /// Registers `left` and `right` as partners of each other.
    pub fn insert(&mut self, left: &str, right: &str) -> Result<()> {
        self.link(left, right)?;
        self.link(right, left)
    }

    fn link(&mut self, primer: &str, partner: &str) -> Result<()> {
        match self.partners.get(primer) {
            Some(existing) if existing != partner => Err(QcError::ConflictingPair {
                primer: primer.to_string(),
                first: existing.clone(),
                second: partner.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.partners.insert(primer.to_string(), partner.to_string());
                Ok(())
            }
        }
    }

    pub fn partner(&self, primer: &str) -> Option<&str> {
        self.partners.get(primer).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

/// Reads a two-column, tab-separated primer pairs table.
pub fn read_primer_pairs(path: &Path) -> Result<PrimerPairs> {
    info!("Reading primer pairs from {}", path.display());
    parse_primer_pairs(path, open_text(path)?)
}

pub(crate) fn parse_primer_pairs(path: &Path, reader: Box<dyn BufRead>) -> Result<PrimerPairs> {
    let mut pairs = PrimerPairs::default();
    for line in data_lines(path, reader) {
        let (line_no, line) = line?;
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        match fields.as_slice() {
            [left, right] if !left.is_empty() && !right.is_empty() => pairs.insert(left, right)?,
            _ => {
                return Err(QcError::parse(
                    path,
                    line_no,
                    format!("expected 2 tab-separated primer names, found {} fields", fields.len()),
                ))
            }
        }
    }
    debug!("Loaded {} paired primer names", pairs.len());
    Ok(pairs)
}

/// Reads a primer BED (contig, start, end, name, pool, strand) and joins every primer
/// with its partner from `pairs`.
pub fn read_primer_bed(path: &Path, pairs: &PrimerPairs, naming: &PrimerNaming) -> Result<Vec<Primer>> {
    info!("Reading primer coordinates from {}", path.display());
    parse_primer_bed(path, open_text(path)?, pairs, naming)
}

pub(crate) fn parse_primer_bed(
    path: &Path,
    reader: Box<dyn BufRead>,
    pairs: &PrimerPairs,
    naming: &PrimerNaming,
) -> Result<Vec<Primer>> {
    let mut primers = Vec::new();
    for line in data_lines(path, reader) {
        let (line_no, line) = line?;
        if line.starts_with("track") || line.starts_with("browser") {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 6 {
            return Err(QcError::parse(
                path,
                line_no,
                format!("expected at least 6 BED columns, found {}", fields.len()),
            ));
        }

        let coordinate = |idx: usize, what: &str| {
            fields[idx].trim().parse::<u64>().map_err(|e| {
                QcError::parse(path, line_no, format!("invalid {} '{}': {}", what, fields[idx], e))
            })
        };
        let start = coordinate(1, "start")?;
        let end = coordinate(2, "end")?;

        let name = fields[3].trim();
        let orientation = Orientation::from_strand(fields[5].trim()).ok_or_else(|| {
            QcError::parse(path, line_no, format!("unknown strand '{}' for primer '{}'", fields[5], name))
        })?;

        let pair_name = pairs
            .partner(name)
            .ok_or_else(|| QcError::MissingPair(name.to_string()))?;

        primers.push(Primer {
            name: name.to_string(),
            pair_name: pair_name.to_string(),
            contig: fields[0].trim().to_string(),
            start,
            end,
            pool: fields[4].trim().to_string(),
            orientation,
            amplicon_number: naming.amplicon_number(name)?,
        });
    }
    debug!("Loaded {} primers", primers.len());
    Ok(primers)
}
