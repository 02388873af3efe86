use crate::error::{QcError, Result};
use crate::utils::input::open_text;
use bio::io::fasta;
use log::debug;
use std::path::Path;

/// Reads a FASTA expected to hold exactly one record.
pub fn read_single_record(path: &Path) -> Result<fasta::Record> {
    let reader = fasta::Reader::from_bufread(open_text(path)?);
    let mut records = reader.records();

    let record = records
        .next()
        .ok_or_else(|| QcError::Fasta {
            path: path.to_path_buf(),
            message: "no FASTA record found".to_string(),
        })?
        .map_err(|e| QcError::io(path, e))?;

    if records.next().is_some() {
        return Err(QcError::Fasta {
            path: path.to_path_buf(),
            message: "expected a single FASTA record, found more than one".to_string(),
        });
    }

    debug!("Read '{}' ({} bp) from {}", record.id(), record.seq().len(), path.display());
    Ok(record)
}

/// Length of the reference sequence.
pub fn reference_length(path: &Path) -> Result<u64> {
    Ok(read_single_record(path)?.seq().len() as u64)
}

/// The consensus sequence, possibly empty.
pub fn read_consensus(path: &Path) -> Result<Vec<u8>> {
    Ok(read_single_record(path)?.seq().to_vec())
}
