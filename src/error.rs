//! Error types shared by the QC engine.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QcError {
    /// A primer in the BED has no entry in the primer pairs table.
    #[error("primer '{0}' has no pair in the primer pairs table")]
    MissingPair(String),

    /// The pairs table names a partner that is absent from the primer BED.
    #[error("primer '{primer}' is paired with '{partner}', which is not present in the primer BED")]
    MissingPartner { primer: String, partner: String },

    /// The pairs table pairs one primer with two different partners.
    #[error("primer '{primer}' is paired with both '{first}' and '{second}'")]
    ConflictingPair {
        primer: String,
        first: String,
        second: String,
    },

    #[error("primer name '{name}' has no field {field} when split on '{delimiter}'")]
    MalformedIdentifier {
        name: String,
        delimiter: String,
        field: usize,
    },

    /// A primer pair without exactly one forward-oriented primer.
    #[error("primer pair '{primer}'/'{partner}' has {forward_count} forward primers, expected exactly 1")]
    Orientation {
        primer: String,
        partner: String,
        forward_count: usize,
    },

    #[error("amplicon {number}: insert start {start} is not below insert end {end}")]
    InvalidAmplicon { number: String, start: u64, end: u64 },

    #[error("reference sequence in {0} has zero length")]
    EmptyReference(PathBuf),

    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{path}: {message}")]
    Fasta { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("alignment file {path}: {source}")]
    Alignment {
        path: PathBuf,
        #[source]
        source: rust_htslib::errors::Error,
    },
}

impl QcError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QcError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        QcError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QcError>;
