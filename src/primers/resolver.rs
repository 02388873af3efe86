use crate::error::{QcError, Result};
use crate::types::{Amplicon, Primer};
use crate::utils::natural_sort::natural_cmp;
use log::{debug, warn};
use std::collections::HashMap;

/// Primers keyed by name, with every partner guaranteed to be present.
#[derive(Debug, Clone)]
pub struct PrimerSet {
    primers: Vec<Primer>,
    by_name: HashMap<String, usize>,
}

impl PrimerSet {
    pub fn new(primers: Vec<Primer>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(primers.len());
        for (idx, primer) in primers.iter().enumerate() {
            if by_name.insert(primer.name.clone(), idx).is_some() {
                warn!("Primer '{}' appears more than once; using its last BED row", primer.name);
            }
        }

        for primer in &primers {
            if !by_name.contains_key(&primer.pair_name) {
                return Err(QcError::MissingPartner {
                    primer: primer.name.clone(),
                    partner: primer.pair_name.clone(),
                });
            }
        }

        Ok(Self { primers, by_name })
    }

    pub fn get(&self, name: &str) -> Option<&Primer> {
        self.by_name.get(name).map(|&idx| &self.primers[idx])
    }

    /// Primers in BED order, skipping rows shadowed by a later duplicate.
    pub fn iter(&self) -> impl Iterator<Item = &Primer> {
        self.primers
            .iter()
            .enumerate()
            .filter(|(idx, primer)| self.by_name.get(&primer.name) == Some(idx))
            .map(|(_, primer)| primer)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn partner_of(&self, primer: &Primer) -> &Primer {
        // Presence of every partner is checked in `new`
        &self.primers[self.by_name[&primer.pair_name]]
    }

    /// Every pair must contain exactly one forward primer; anything else would place
    /// amplicon boundaries on the wrong primer.
    fn validate_orientation(&self) -> Result<()> {
        for primer in self.iter() {
            let partner = self.partner_of(primer);
            let forward_count = [primer, partner]
                .iter()
                .filter(|p| p.orientation.is_forward())
                .count();
            if forward_count != 1 {
                return Err(QcError::Orientation {
                    primer: primer.name.clone(),
                    partner: partner.name.clone(),
                    forward_count,
                });
            }
        }
        Ok(())
    }
}

/// Amplicons in natural amplicon-number order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmpliconSet {
    amplicons: Vec<Amplicon>,
}

impl AmpliconSet {
    pub fn new(mut amplicons: Vec<Amplicon>) -> Self {
        amplicons.sort_by(|a, b| natural_cmp(&a.number, &b.number));
        Self { amplicons }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Amplicon> {
        self.amplicons.iter()
    }

    pub fn len(&self) -> usize {
        self.amplicons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplicons.is_empty()
    }

    pub fn get(&self, number: &str) -> Option<&Amplicon> {
        self.amplicons.iter().find(|a| a.number == number)
    }

    /// Span from the lowest amplicon start to the highest amplicon end, or `None`
    /// without amplicons.
    pub fn region(&self) -> Option<(u64, u64)> {
        let start = self.amplicons.iter().map(|a| a.start).min()?;
        let end = self.amplicons.iter().map(|a| a.end).max()?;
        Some((start, end))
    }
}

impl<'a> IntoIterator for &'a AmpliconSet {
    type Item = &'a Amplicon;
    type IntoIter = std::slice::Iter<'a, Amplicon>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Derives one amplicon per forward primer: the insert runs from the forward primer's
/// end to its reverse partner's start.
pub fn primers_to_amplicons(primers: &PrimerSet) -> Result<AmpliconSet> {
    primers.validate_orientation()?;

    let mut by_number: HashMap<String, Amplicon> = HashMap::new();
    for primer in primers.iter().filter(|p| p.orientation.is_forward()) {
        let reverse = primers.partner_of(primer);
        let (start, end) = (primer.end, reverse.start);
        if start >= end {
            return Err(QcError::InvalidAmplicon {
                number: primer.amplicon_number.clone(),
                start,
                end,
            });
        }

        let amplicon = Amplicon {
            number: primer.amplicon_number.clone(),
            pool: primer.pool.clone(),
            contig: primer.contig.clone(),
            start,
            end,
            length: end - start,
        };
        if let Some(previous) = by_number.insert(amplicon.number.clone(), amplicon) {
            warn!(
                "Amplicon {} is defined by more than one forward primer; replacing {}-{} with the later definition",
                previous.number, previous.start, previous.end
            );
        }
    }

    let amplicons = AmpliconSet::new(by_number.into_values().collect());
    debug!("Resolved {} amplicons from {} primers", amplicons.len(), primers.len());
    Ok(amplicons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Orientation;

    fn primer(name: &str, pair: &str, start: u64, end: u64, pool: &str, orientation: Orientation) -> Primer {
        Primer {
            name: name.to_string(),
            pair_name: pair.to_string(),
            contig: "ref".to_string(),
            start,
            end,
            pool: pool.to_string(),
            orientation,
            amplicon_number: name.split('_').nth(2).unwrap().to_string(),
        }
    }

    fn two_amplicon_scheme() -> Vec<Primer> {
        vec![
            primer("S_x_1_LEFT", "S_x_1_RIGHT", 10, 40, "1", Orientation::Forward),
            primer("S_x_1_RIGHT", "S_x_1_LEFT", 360, 390, "1", Orientation::Reverse),
            primer("S_x_2_LEFT", "S_x_2_RIGHT", 200, 230, "2", Orientation::Forward),
            primer("S_x_2_RIGHT", "S_x_2_LEFT", 550, 580, "2", Orientation::Reverse),
        ]
    }

    #[test]
    fn test_two_amplicons() {
        let set = PrimerSet::new(two_amplicon_scheme()).unwrap();
        let amplicons = primers_to_amplicons(&set).unwrap();
        assert_eq!(amplicons.len(), 2);

        let first = amplicons.get("1").unwrap();
        assert_eq!((first.start, first.end, first.length), (40, 360, 320));
        assert_eq!(first.pool, "1");
        let second = amplicons.get("2").unwrap();
        assert_eq!((second.start, second.end, second.length), (230, 550, 320));
        assert_eq!(second.pool, "2");

        assert_eq!(amplicons.region(), Some((40, 550)));
    }

    #[test]
    fn test_pairing_is_symmetric() {
        let set = PrimerSet::new(two_amplicon_scheme()).unwrap();
        let amplicons = primers_to_amplicons(&set).unwrap();
        for amplicon in &amplicons {
            let forward = set
                .iter()
                .find(|p| p.orientation.is_forward() && p.amplicon_number == amplicon.number)
                .unwrap();
            let reverse = set.get(&forward.pair_name).unwrap();
            assert_eq!(reverse.pair_name, forward.name);
            assert_eq!(amplicon.start, forward.end);
            assert_eq!(amplicon.end, reverse.start);
        }
    }

    #[test]
    fn test_missing_partner() {
        let mut primers = two_amplicon_scheme();
        primers.pop();
        let err = PrimerSet::new(primers).unwrap_err();
        assert!(matches!(err, QcError::MissingPartner { partner, .. } if partner == "S_x_2_RIGHT"));
    }

    #[test]
    fn test_pair_with_two_forward_primers() {
        let mut primers = two_amplicon_scheme();
        primers[1].orientation = Orientation::Forward;
        let set = PrimerSet::new(primers).unwrap();
        let err = primers_to_amplicons(&set).unwrap_err();
        assert!(matches!(err, QcError::Orientation { forward_count: 2, .. }));
    }

    #[test]
    fn test_pair_with_no_forward_primer() {
        let mut primers = two_amplicon_scheme();
        primers[2].orientation = Orientation::Reverse;
        let set = PrimerSet::new(primers).unwrap();
        let err = primers_to_amplicons(&set).unwrap_err();
        assert!(matches!(err, QcError::Orientation { forward_count: 0, .. }));
    }

    #[test]
    fn test_inverted_pair_is_rejected() {
        let primers = vec![
            primer("S_x_1_LEFT", "S_x_1_RIGHT", 400, 430, "1", Orientation::Forward),
            primer("S_x_1_RIGHT", "S_x_1_LEFT", 100, 130, "1", Orientation::Reverse),
        ];
        let set = PrimerSet::new(primers).unwrap();
        let err = primers_to_amplicons(&set).unwrap_err();
        assert!(matches!(err, QcError::InvalidAmplicon { start: 430, end: 100, .. }));
    }

    #[test]
    fn test_amplicons_sorted_naturally() {
        let mut primers = Vec::new();
        for n in [10u64, 2, 1] {
            let left = format!("S_x_{}_LEFT", n);
            let right = format!("S_x_{}_RIGHT", n);
            primers.push(primer(&left, &right, n * 100, n * 100 + 20, "1", Orientation::Forward));
            primers.push(primer(&right, &left, n * 100 + 80, n * 100 + 100, "1", Orientation::Reverse));
        }
        let amplicons = primers_to_amplicons(&PrimerSet::new(primers).unwrap()).unwrap();
        let numbers: Vec<_> = amplicons.iter().map(|a| a.number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_empty_set_has_no_region() {
        assert_eq!(AmpliconSet::default().region(), None);
    }
}
