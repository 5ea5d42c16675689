//! Phenotype Semantic Scorer: the Phenodigm/Phenix core.
//!
//! This module computes the cross-species semantic-similarity score from
//! caller-supplied match tables; it never touches an ontology. Loading HPO,
//! computing Resnik-based term-to-term similarity, and precomputing
//! empirical p-value distributions are the out-of-scope "organism
//! phenotype matcher" external collaborator.

mod phenix;
mod phenodigm;

pub use phenix::{PValueProvider, PhenixResult, PhenixScorer, SimulatedPValueProvider};
pub use phenodigm::PhenodigmScorer;

use crate::model::{Model, PhenotypeMatch, TermId};

/// The hypothetical model that would achieve the maximum possible Phenodigm
/// score against a query set, precomputed per organism.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TheoreticalBestModel {
    pub max_match_score: f64,
    pub best_avg_score: f64,
}

/// External interface: for a query term, the best matches against one
/// organism's term universe, plus that organism's theoretical-best
/// summary. Implementations load HPO and compute similarity out of scope of
/// this core.
pub trait OrganismPhenotypeMatcher {
    fn matches(&self, query_term: &TermId) -> Vec<PhenotypeMatch>;
    fn theoretical_best(&self) -> TheoreticalBestModel;
}

/// An in-memory matcher driven by literal match tables, used in tests and
/// as a reference fixture standing in for an HPO crate-backed
/// implementation.
#[derive(Debug, Clone, Default)]
pub struct TableOrganismMatcher {
    matches: std::collections::HashMap<TermId, Vec<PhenotypeMatch>>,
    best: Option<TheoreticalBestModel>,
}

impl TableOrganismMatcher {
    pub fn new(best: TheoreticalBestModel) -> Self {
        Self {
            matches: Default::default(),
            best: Some(best),
        }
    }

    pub fn with_match(mut self, query_term: TermId, m: PhenotypeMatch) -> Self {
        self.matches.entry(query_term).or_default().push(m);
        self
    }
}

impl OrganismPhenotypeMatcher for TableOrganismMatcher {
    fn matches(&self, query_term: &TermId) -> Vec<PhenotypeMatch> {
        self.matches.get(query_term).cloned().unwrap_or_default()
    }

    fn theoretical_best(&self) -> TheoreticalBestModel {
        self.best.unwrap_or(TheoreticalBestModel {
            max_match_score: 0.0,
            best_avg_score: 0.0,
        })
    }
}

/// Convenience used by both [`phenodigm`] and [`phenix`]: the model's
/// phenotype terms as a lookup set.
pub(crate) fn model_term_set(model: &Model) -> std::collections::HashSet<&TermId> {
    model.phenotype_terms.iter().collect()
}
