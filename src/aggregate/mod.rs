//! Gene Ranking & Combined-Score Aggregator.

use crate::common::ModeOfInheritance;
use crate::model::{FilterStatus, Gene, Pedigree};

/// Genes at or above this many variants are down-weighted by
/// [`aggregate`]'s "too many variants are suspicious" heuristic, unless a
/// caller overrides it via [`aggregate_with_threshold`].
pub const DEFAULT_DOWNWEIGHT_THRESHOLD: usize = 5;

const DOWNWEIGHT_FACTOR: f64 = 0.05;

/// Compute `filterScore`, `priorityScore` and `combinedScore` for every
/// gene and sort descending by `combinedScore`, ties broken ascending by
/// gene symbol.
pub fn aggregate(genes: &mut Vec<Gene>, pedigree: &Pedigree, moi: ModeOfInheritance) {
    aggregate_with_threshold(genes, pedigree, moi, DEFAULT_DOWNWEIGHT_THRESHOLD)
}

/// As [`aggregate`], but with an explicit down-weighting threshold instead
/// of [`DEFAULT_DOWNWEIGHT_THRESHOLD`].
pub fn aggregate_with_threshold(
    genes: &mut Vec<Gene>,
    pedigree: &Pedigree,
    moi: ModeOfInheritance,
    downweight_threshold: usize,
) {
    for gene in genes.iter_mut() {
        let filter_score = filter_score(gene, pedigree, moi, downweight_threshold);
        let priority_score = priority_score(gene);
        gene.filter_score = Some(filter_score);
        gene.priority_score = Some(priority_score);
    }

    genes.sort_by(|a, b| {
        combined_score(b)
            .partial_cmp(&combined_score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.gene_symbol.cmp(&b.gene_symbol))
    });
}

/// `combinedScore = (priorityScore + filterScore) / 2`. Genes that
/// [`aggregate`] has not yet scored are treated as `0.0`.
pub fn combined_score(gene: &Gene) -> f64 {
    (gene.priority_score.unwrap_or(0.0) + gene.filter_score.unwrap_or(0.0)) / 2.0
}

fn priority_score(gene: &Gene) -> f64 {
    gene.priority_results
        .values()
        .map(|r| r.score)
        .product::<f64>()
        .max(0.0)
}

fn filter_score(
    gene: &Gene,
    pedigree: &Pedigree,
    moi: ModeOfInheritance,
    downweight_threshold: usize,
) -> f64 {
    let mut scores: Vec<f32> = gene
        .variants
        .iter()
        .filter(|v| v.filter_status() == FilterStatus::Passed)
        .map(|v| v.per_variant_filter_score())
        .collect();

    if moi == ModeOfInheritance::AutosomalRecessive {
        let duplicates: Vec<f32> = gene
            .variants
            .iter()
            .filter(|v| {
                v.filter_status() == FilterStatus::Passed && homozygous_in_any_affected(v, pedigree)
            })
            .map(|v| v.per_variant_filter_score())
            .collect();
        scores.extend(duplicates);
    }

    let raw = if moi == ModeOfInheritance::AutosomalRecessive {
        scores.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        if scores.len() < 2 {
            0.0
        } else {
            (scores[0] + scores[1]) as f64 / 2.0
        }
    } else {
        scores
            .into_iter()
            .fold(0.0_f32, f32::max) as f64
    };

    raw * downweight_factor(gene.variants.len(), downweight_threshold)
}

fn homozygous_in_any_affected(
    variant: &crate::model::VariantEvaluation,
    pedigree: &Pedigree,
) -> bool {
    pedigree.affected().any(|individual| {
        variant
            .genotypes
            .get(&individual.name)
            .map(|call| call.is_hom_alt())
            .unwrap_or(false)
    })
}

/// `1 − min(1, Σᵢ factor·1.5ⁱ⁻¹)` for `i` in `1..=(numVariants −
/// threshold)`, applied only when `numVariants >= threshold`.
fn downweight_factor(num_variants: usize, threshold: usize) -> f64 {
    if num_variants < threshold {
        return 1.0;
    }
    let excess = num_variants - threshold;
    let penalty: f64 = (1..=excess)
        .map(|i| DOWNWEIGHT_FACTOR * 1.5_f64.powi(i as i32 - 1))
        .sum();
    1.0 - penalty.min(1.0)
}
