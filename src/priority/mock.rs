//! Mock prioritizer: a constant gene-symbol -> score map, used for
//! deterministic tests.

use std::collections::HashMap;

use crate::model::{Gene, PriorityType};

use super::{ensure_all_scored, Prioritizer};

#[derive(Debug, Clone, Default)]
pub struct MockPrioritizer {
    scores: HashMap<String, f64>,
    default_score: f64,
}

impl MockPrioritizer {
    pub fn new(scores: HashMap<String, f64>) -> Self {
        Self {
            scores,
            default_score: 0.0,
        }
    }

    pub fn with_default_score(mut self, default_score: f64) -> Self {
        self.default_score = default_score;
        self
    }
}

impl Prioritizer for MockPrioritizer {
    fn priority_type(&self) -> PriorityType {
        PriorityType::Mock
    }

    fn prioritize(&self, genes: &mut [Gene]) {
        ensure_all_scored(genes, self.priority_type(), self.default_score, |gene| {
            self.scores.get(&gene.gene_symbol).copied()
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn attaches_configured_scores_and_default() {
        let mut scores = HashMap::new();
        scores.insert("RBM8A".to_string(), 0.9);
        let prioritizer = MockPrioritizer::new(scores).with_default_score(0.1);

        let mut genes = vec![Gene::new("RBM8A", "HGNC:9907"), Gene::new("GNRHR2", "HGNC:X")];
        prioritizer.prioritize(&mut genes);

        assert_eq!(genes[0].priority_result(PriorityType::Mock).unwrap().score, 0.9);
        assert_eq!(genes[1].priority_result(PriorityType::Mock).unwrap().score, 0.1);
    }
}
