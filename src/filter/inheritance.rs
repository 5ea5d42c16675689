//! Inheritance Filter (gene-level).

use std::any::Any;
use std::collections::BTreeSet;

use crate::inheritance::{compatible_modes, ModeFrequencyCeilings};
use crate::model::{FilterDecision, FilterType, Gene, InheritanceMode, Pedigree, VariantEvaluation};

use super::{record_gene, GeneFilter};

/// PASS iff the gene's inheritance-mode set intersects the configured
/// target set; each member variant is additionally marked PASS/FAIL on
/// `FilterType::Inheritance` depending on whether it participates in a
/// compatible genotype combination.
///
/// A pedigree/genotype mismatch (`PedigreeIncompatible`) is non-fatal: the
/// gene's inheritance-mode set is left empty and the filter fails the
/// gene, logged via `tracing::warn!` rather than propagated.
#[derive(Debug, Clone, PartialEq)]
pub struct InheritanceFilter {
    pedigree: Pedigree,
    target_modes: BTreeSet<InheritanceMode>,
    ceilings: ModeFrequencyCeilings,
}

impl InheritanceFilter {
    pub fn new(
        pedigree: Pedigree,
        target_modes: BTreeSet<InheritanceMode>,
        ceilings: ModeFrequencyCeilings,
    ) -> Self {
        Self {
            pedigree,
            target_modes,
            ceilings,
        }
    }
}

impl GeneFilter for InheritanceFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Inheritance
    }

    fn apply(&self, gene: &mut Gene) -> FilterDecision {
        let variant_refs: Vec<&VariantEvaluation> = gene.variants.iter().collect();
        let compatibility = match compatible_modes(&self.pedigree, &variant_refs, &self.ceilings) {
            Ok(c) => c,
            Err(err) => {
                tracing::warn!("gene {}: {}", gene.gene_symbol, err);
                gene.inheritance_modes.clear();
                for variant in &mut gene.variants {
                    variant
                        .filter_results
                        .record(FilterType::Inheritance, FilterDecision::Fail);
                }
                return record_gene(gene, self.filter_type(), FilterDecision::Fail);
            }
        };

        gene.inheritance_modes = compatibility.modes().collect();

        let supporting = compatibility.all_supporting_reportable();
        for (idx, variant) in gene.variants.iter_mut().enumerate() {
            let decision = FilterDecision::from(supporting.contains(&idx));
            variant
                .filter_results
                .record(FilterType::Inheritance, decision);
        }

        let pass = self
            .target_modes
            .iter()
            .any(|m| compatibility.is_compatible(*m));
        record_gene(gene, self.filter_type(), pass.into())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn config_eq(&self, other: &dyn GeneFilter) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}
