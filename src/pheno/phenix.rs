//! Phenix: the Phenodigm scorer plus an empirical p-value rescaling.

use crate::model::{Model, TermId};

use super::{OrganismPhenotypeMatcher, PhenodigmScorer};

/// Supplies a Phenomizer-style empirical p-value for a model against a
/// query. A lookup-table-backed implementation plugging in a precomputed,
/// offline-built distribution is equally valid; this trait is the narrow
/// seam either style plugs into.
pub trait PValueProvider {
    fn p_value(&self, query: &[TermId], model: &Model) -> Option<f64>;
}

/// Builds the empirical null distribution on the fly by drawing random
/// term sets of the same size as the query from `term_universe` and
/// scoring each against `model`, the same resampling scheme as an offline
/// Phenomizer distribution build but run inline per call. The p-value is
/// the Laplace-smoothed fraction of random draws scoring at least as well
/// as the real query.
pub struct SimulatedPValueProvider<'a> {
    matcher: &'a dyn OrganismPhenotypeMatcher,
    term_universe: Vec<TermId>,
    iterations: usize,
    scorer: PhenodigmScorer,
}

impl<'a> SimulatedPValueProvider<'a> {
    pub fn new(matcher: &'a dyn OrganismPhenotypeMatcher, term_universe: Vec<TermId>, iterations: usize) -> Self {
        Self {
            matcher,
            term_universe,
            iterations,
            scorer: PhenodigmScorer::new(),
        }
    }

    /// Seed the shared random source, for reproducible simulations.
    pub fn seed(self, seed: u64) -> Self {
        fastrand::seed(seed);
        self
    }

    fn random_query(&self, size: usize) -> Vec<TermId> {
        let mut drawn = Vec::with_capacity(size);
        let mut tries = 0;
        while drawn.len() < size && !self.term_universe.is_empty() {
            tries += 1;
            if tries > size * 1000 {
                break;
            }
            let term = &self.term_universe[fastrand::usize(0..self.term_universe.len())];
            if !drawn.contains(term) {
                drawn.push(term.clone());
            }
        }
        drawn
    }
}

impl PValueProvider for SimulatedPValueProvider<'_> {
    fn p_value(&self, query: &[TermId], model: &Model) -> Option<f64> {
        if query.is_empty() || self.iterations == 0 {
            return None;
        }
        let actual = self.scorer.score(query, model, self.matcher);
        let at_least_as_good = (0..self.iterations)
            .filter(|_| {
                let random_query = self.random_query(query.len());
                self.scorer.score(&random_query, model, self.matcher) >= actual
            })
            .count();
        Some((at_least_as_good + 1) as f64 / (self.iterations + 1) as f64)
    }
}

/// Result of a Phenix scoring call: the rescaled semantic-similarity score
/// plus, when a p-value was available, its negative natural logarithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhenixResult {
    pub score: f64,
    pub neg_log_p: Option<f64>,
}

/// Wraps [`PhenodigmScorer`] with an instance-level `normalization_factor`,
/// set once before any analysis runs and never mutated during one;
/// modeled here as a field fixed at construction rather than mutable
/// process-global state.
#[derive(Debug, Clone, Copy)]
pub struct PhenixScorer {
    phenodigm: PhenodigmScorer,
    normalization_factor: f64,
}

impl PhenixScorer {
    /// `normalization_factor` defaults to 1.0.
    pub fn new(normalization_factor: f64) -> Self {
        Self {
            phenodigm: PhenodigmScorer::new(),
            normalization_factor,
        }
    }

    pub fn normalization_factor(&self) -> f64 {
        self.normalization_factor
    }

    pub fn score(
        &self,
        query: &[TermId],
        model: &Model,
        matcher: &dyn OrganismPhenotypeMatcher,
        p_values: &dyn PValueProvider,
    ) -> PhenixResult {
        let hpo_sem_sim_score = self.phenodigm.score(query, model, matcher);
        let neg_log_p = p_values.p_value(query, model).map(|p| -p.ln());
        PhenixResult {
            score: hpo_sem_sim_score * self.normalization_factor,
            neg_log_p,
        }
    }
}

impl Default for PhenixScorer {
    fn default() -> Self {
        Self::new(1.0)
    }
}
