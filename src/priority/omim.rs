//! OMIM prioritizer: a coarse disease-database gate that never zeroes out
//! the combined score for an unlinked gene.

use std::collections::{HashMap, HashSet};

use crate::common::ModeOfInheritance;
use crate::model::{Gene, PriorityType};

use super::{ensure_all_scored, Prioritizer};

/// Returns 1.0 for genes linked to any OMIM disease compatible with the
/// requested mode of inheritance, otherwise 0.5; never 0.
#[derive(Debug, Clone)]
pub struct OmimPrioritizer {
    /// gene symbol -> modes of inheritance its linked OMIM diseases support.
    associations: HashMap<String, HashSet<ModeOfInheritance>>,
    requested_mode: ModeOfInheritance,
}

impl OmimPrioritizer {
    pub fn new(
        associations: HashMap<String, HashSet<ModeOfInheritance>>,
        requested_mode: ModeOfInheritance,
    ) -> Self {
        Self {
            associations,
            requested_mode,
        }
    }
}

impl Prioritizer for OmimPrioritizer {
    fn priority_type(&self) -> PriorityType {
        PriorityType::Omim
    }

    fn prioritize(&self, genes: &mut [Gene]) {
        ensure_all_scored(genes, self.priority_type(), 0.5, |gene| {
            let modes = self.associations.get(&gene.gene_symbol)?;
            let compatible = self.requested_mode == ModeOfInheritance::Any
                || modes.contains(&self.requested_mode);
            Some(if compatible { 1.0 } else { 0.5 })
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compatible_disease_scores_one() {
        let mut associations = HashMap::new();
        associations.insert(
            "RBM8A".to_string(),
            [ModeOfInheritance::AutosomalRecessive].into(),
        );
        let prioritizer = OmimPrioritizer::new(associations, ModeOfInheritance::AutosomalRecessive);

        let mut genes = vec![Gene::new("RBM8A", "HGNC:9907"), Gene::new("GNRHR2", "HGNC:X")];
        prioritizer.prioritize(&mut genes);

        assert_eq!(
            genes[0].priority_result(PriorityType::Omim).unwrap().score,
            1.0
        );
        assert_eq!(
            genes[1].priority_result(PriorityType::Omim).unwrap().score,
            0.5
        );
    }

    #[test]
    fn incompatible_mode_scores_half_not_zero() {
        let mut associations = HashMap::new();
        associations.insert(
            "RBM8A".to_string(),
            [ModeOfInheritance::AutosomalDominant].into(),
        );
        let prioritizer = OmimPrioritizer::new(associations, ModeOfInheritance::AutosomalRecessive);

        let mut genes = vec![Gene::new("RBM8A", "HGNC:9907")];
        prioritizer.prioritize(&mut genes);

        assert_eq!(
            genes[0].priority_result(PriorityType::Omim).unwrap().score,
            0.5
        );
    }
}
