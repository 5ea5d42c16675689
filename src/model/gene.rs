//! Gene entity: aggregation of Variant Evaluations sharing a gene identifier.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::inheritance_mode::InheritanceMode;
use super::priority_result::{PriorityResult, PriorityType};
use super::variant::{FilterResults, FilterStatus, VariantEvaluation};

/// A gene and all Variant Evaluations assigned to it during grouping.
///
/// Invariants:
/// (a) every member variant shares `gene_id`;
/// (b) `priority_score`/`filter_score` are only meaningful after
///     [`crate::aggregate::aggregate`] has run for a chosen mode of
///     inheritance — both start as `None` ("uninitialized");
/// (c) [`Gene::passed_filters`] is true iff at least one member variant has
///     `filter status` = Passed and no gene-level filter has recorded Fail.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct Gene {
    pub gene_symbol: String,
    pub gene_id: String,
    pub variants: Vec<VariantEvaluation>,
    #[serde(default)]
    pub priority_results: IndexMap<PriorityType, PriorityResult>,
    #[serde(default)]
    pub priority_score: Option<f64>,
    #[serde(default)]
    pub filter_score: Option<f64>,
    #[serde(default)]
    pub inheritance_modes: BTreeSet<InheritanceMode>,
    #[serde(default)]
    pub filter_results: FilterResults,
}

impl Gene {
    pub fn new(gene_symbol: impl Into<String>, gene_id: impl Into<String>) -> Self {
        Self {
            gene_symbol: gene_symbol.into(),
            gene_id: gene_id.into(),
            variants: Vec::new(),
            priority_results: IndexMap::new(),
            priority_score: None,
            filter_score: None,
            inheritance_modes: BTreeSet::new(),
            filter_results: FilterResults::new(),
        }
    }

    /// Invariant (c): at least one member variant passed, and no gene-level
    /// filter recorded a fail.
    pub fn passed_filters(&self) -> bool {
        let any_variant_passed = self
            .variants
            .iter()
            .any(|v| v.filter_status() == FilterStatus::Passed);
        any_variant_passed && !self.filter_results.has_any_fail()
    }

    pub fn priority_result(&self, priority_type: PriorityType) -> Option<&PriorityResult> {
        self.priority_results.get(&priority_type)
    }

    pub fn attach_priority_result(&mut self, result: PriorityResult) {
        self.priority_results.insert(result.priority_type, result);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{
        Chromosome, FilterDecision, FilterType, SampleGenotype, VariantCoordinates, VariantEffect,
    };

    fn variant(passes: Option<bool>) -> VariantEvaluation {
        let mut filter_results = FilterResults::new();
        if let Some(p) = passes {
            filter_results.record(FilterType::Quality, p.into());
        }
        VariantEvaluation {
            coordinates: VariantCoordinates {
                chromosome: Chromosome::new(1).unwrap(),
                position: 100,
                reference: "A".into(),
                alternate: "T".into(),
                alt_allele_index: 0,
            },
            effect: VariantEffect::Missense,
            gene_symbol: Some("GENE1".into()),
            gene_id: Some("HGNC:1".into()),
            genotypes: SampleGenotype::new(),
            frequency: None,
            pathogenicity: None,
            quality: 50.0,
            filter_results,
        }
    }

    #[test]
    fn passed_filters_requires_a_passed_variant() {
        let mut gene = Gene::new("GENE1", "HGNC:1");
        gene.variants.push(variant(None));
        assert!(!gene.passed_filters());
        gene.variants.push(variant(Some(true)));
        assert!(gene.passed_filters());
    }

    #[test]
    fn gene_level_fail_overrides_any_passed_variant() {
        let mut gene = Gene::new("GENE1", "HGNC:1");
        gene.variants.push(variant(Some(true)));
        gene.filter_results.record(FilterType::Inheritance, FilterDecision::Fail);
        assert!(!gene.passed_filters());
    }

    #[test]
    fn scores_start_uninitialized() {
        let gene = Gene::new("GENE1", "HGNC:1");
        assert_eq!(gene.priority_score, None);
        assert_eq!(gene.filter_score, None);
    }
}
