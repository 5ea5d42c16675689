//! Phenotype-semantic prioritizers: Phenodigm, Phenix and hiPhive share one
//! scoring core and differ only in which [`PriorityType`] they attach
//! results under.

use crate::model::{Gene, PriorityType, TermId};
use crate::pheno::{OrganismPhenotypeMatcher, PhenodigmScorer};
use crate::providers::GeneModelProvider;

use super::{ensure_all_scored, Prioritizer};

/// A phenotype-semantic prioritizer backed by [`PhenodigmScorer`]. The same
/// type serves the `Phenodigm`, `Phenix` and `HiPhive` [`PriorityType`]
/// variants: construct one instance per variant, naming the
/// `PriorityType` it should attach results under.
pub struct PhenotypePrioritizer<'a> {
    priority_type: PriorityType,
    query: Vec<TermId>,
    matcher: &'a dyn OrganismPhenotypeMatcher,
    models: &'a dyn GeneModelProvider,
    scorer: PhenodigmScorer,
}

impl<'a> PhenotypePrioritizer<'a> {
    pub fn new(
        priority_type: PriorityType,
        query: Vec<TermId>,
        matcher: &'a dyn OrganismPhenotypeMatcher,
        models: &'a dyn GeneModelProvider,
    ) -> Self {
        Self {
            priority_type,
            query,
            matcher,
            models,
            scorer: PhenodigmScorer::new(),
        }
    }

    fn best_score_for_gene(&self, gene_symbol: &str) -> Option<f64> {
        self.models
            .models_for_gene(gene_symbol)
            .iter()
            .map(|model| self.scorer.score(&self.query, model, self.matcher))
            .fold(None, |acc, score| Some(acc.map_or(score, |a: f64| a.max(score))))
    }
}

impl std::fmt::Debug for PhenotypePrioritizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhenotypePrioritizer")
            .field("priority_type", &self.priority_type)
            .field("query", &self.query)
            .finish()
    }
}

impl Prioritizer for PhenotypePrioritizer<'_> {
    fn priority_type(&self) -> PriorityType {
        self.priority_type
    }

    fn prioritize(&self, genes: &mut [Gene]) {
        ensure_all_scored(genes, self.priority_type, 0.0, |gene| {
            self.best_score_for_gene(&gene.gene_symbol)
        });
    }
}
