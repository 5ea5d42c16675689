//! Prioritizer Framework.

mod exome_walker;
mod mock;
mod omim;
mod phenotype;

pub use exome_walker::{ExomeWalkerPrioritizer, Network};
pub use mock::MockPrioritizer;
pub use omim::OmimPrioritizer;
pub use phenotype::PhenotypePrioritizer;

use crate::model::{Gene, PriorityResult, PriorityType};

/// Consumes the complete set of genes and attaches one [`PriorityResult`]
/// per gene.
pub trait Prioritizer: std::fmt::Debug {
    fn priority_type(&self) -> PriorityType;

    fn prioritize(&self, genes: &mut [Gene]);
}

/// Attaches a result to every gene, falling back to a sentinel default
/// score when the gene is unknown, for any prioritizer that produces its
/// scores as a sparse `gene_symbol -> score` map; "if absent, fall back to
/// a default" rather than erroring on an unmapped gene.
pub(crate) fn ensure_all_scored(
    genes: &mut [Gene],
    priority_type: PriorityType,
    default_score: f64,
    mut score_of: impl FnMut(&Gene) -> Option<f64>,
) {
    for gene in genes {
        let score = score_of(gene).unwrap_or(default_score);
        gene.attach_priority_result(PriorityResult::new(priority_type, score));
    }
}
