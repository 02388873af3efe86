use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Orientation {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Orientation {
    /// Parses a BED strand column.
    pub fn from_strand(strand: &str) -> Option<Self> {
        match strand {
            "+" => Some(Orientation::Forward),
            "-" => Some(Orientation::Reverse),
            _ => None,
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Orientation::Forward)
    }
}

/// One row of a primer BED, joined with its partner from the pairs table.
///
/// Coordinates are 0-based and half-open, as in BED.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primer {
    pub name: String,
    pub pair_name: String,
    pub contig: String,
    pub start: u64,
    pub end: u64,
    pub pool: String,
    pub orientation: Orientation,
    pub amplicon_number: String,
}

/// The insert between a forward primer and its reverse partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Amplicon {
    pub number: String,
    pub pool: String,
    pub contig: String,
    /// End coordinate of the forward primer.
    pub start: u64,
    /// Start coordinate of the reverse primer.
    pub end: u64,
    pub length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthRecord {
    pub contig: String,
    /// 1-based position.
    pub position: u64,
    pub depth: u32,
}

impl DepthRecord {
    pub fn new(contig: impl Into<String>, position: u64, depth: u32) -> Self {
        Self {
            contig: contig.into(),
            position,
            depth,
        }
    }
}
