//! The Phenodigm cross-species semantic-similarity score.

use std::collections::HashSet;

use crate::model::{Model, TermId};

use super::{model_term_set, OrganismPhenotypeMatcher, TheoreticalBestModel};

/// Computes the Phenodigm score of a [`Model`] against a query phenotype
/// set, given an [`OrganismPhenotypeMatcher`] supplying precomputed
/// term-to-term matches for that organism.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhenodigmScorer;

impl PhenodigmScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score `model` against `query`, in `[0, 1]`.
    pub fn score(
        &self,
        query: &[TermId],
        model: &Model,
        matcher: &dyn OrganismPhenotypeMatcher,
    ) -> f64 {
        let pm = model_term_set(model);
        let theoretical = matcher.theoretical_best();

        // Step 1: best match score per query term, restricted to t in Pm.
        let per_query_best: Vec<f64> = query
            .iter()
            .map(|q| {
                matcher
                    .matches(q)
                    .into_iter()
                    .filter(|m| pm.contains(&m.matched_term))
                    .map(|m| m.score)
                    .fold(0.0_f64, f64::max)
            })
            .collect();

        // Step 2: maxModelMatchScore, sumModelBestMatchScores (matched terms
        // only), numMatchingPhenotypesForModel.
        let max_model_match_score = per_query_best.iter().copied().fold(0.0_f64, f64::max);
        let sum_model_best_match_scores: f64 = per_query_best
            .iter()
            .copied()
            .filter(|&score| score > 0.0)
            .sum();

        let mut matched_model_terms: HashSet<&TermId> = HashSet::new();
        for q in query {
            for m in matcher.matches(q) {
                if m.score > 0.0 && pm.contains(&m.matched_term) {
                    matched_model_terms.insert(&m.matched_term);
                }
            }
        }
        let num_matching_phenotypes_for_model = matched_model_terms.len();

        // Step 3.
        let total_phenotypes_with_match = query.len() + num_matching_phenotypes_for_model;

        // Step 4.
        if sum_model_best_match_scores == 0.0 {
            return 0.0;
        }

        // Step 5.
        let model_best_avg_score =
            sum_model_best_match_scores / total_phenotypes_with_match as f64;

        // Step 6.
        let combined = combined_score(
            max_model_match_score,
            model_best_avg_score,
            theoretical,
        );

        // Step 7.
        combined.min(100.0) / 100.0
    }
}

fn combined_score(
    max_model_match_score: f64,
    model_best_avg_score: f64,
    theoretical: TheoreticalBestModel,
) -> f64 {
    let max_ratio = if theoretical.max_match_score > 0.0 {
        max_model_match_score / theoretical.max_match_score
    } else {
        0.0
    };
    let avg_ratio = if theoretical.best_avg_score > 0.0 {
        model_best_avg_score / theoretical.best_avg_score
    } else {
        0.0
    };
    50.0 * (max_ratio + avg_ratio)
}
