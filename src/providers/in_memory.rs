//! HashMap-backed test doubles for the provider traits: lookup a
//! `HashSet`/`HashMap`, default if absent.

use std::collections::HashMap;

use crate::err::ProviderError;
use crate::model::{FrequencyData, Model, PathogenicityData, VariantCoordinates, VariantEffect};

use super::{FrequencyDao, GeneModelProvider, PathogenicityDao};

fn coord_key(coords: &VariantCoordinates) -> (u8, u32, String, String) {
    (
        coords.chromosome.number(),
        coords.position,
        coords.reference.clone(),
        coords.alternate.clone(),
    )
}

/// An in-memory [`FrequencyDao`] keyed by variant coordinates.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFrequencyDao(HashMap<(u8, u32, String, String), FrequencyData>);

impl InMemoryFrequencyDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, coords: &VariantCoordinates, data: FrequencyData) -> Self {
        self.0.insert(coord_key(coords), data);
        self
    }
}

impl FrequencyDao for InMemoryFrequencyDao {
    fn lookup(&self, coords: &VariantCoordinates) -> Result<Option<FrequencyData>, ProviderError> {
        Ok(self.0.get(&coord_key(coords)).cloned())
    }
}

/// An in-memory [`PathogenicityDao`] keyed by variant coordinates; the
/// variant effect is accepted for contract parity but does not further
/// partition the table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPathogenicityDao(HashMap<(u8, u32, String, String), PathogenicityData>);

impl InMemoryPathogenicityDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, coords: &VariantCoordinates, data: PathogenicityData) -> Self {
        self.0.insert(coord_key(coords), data);
        self
    }
}

impl PathogenicityDao for InMemoryPathogenicityDao {
    fn lookup(
        &self,
        coords: &VariantCoordinates,
        _effect: VariantEffect,
    ) -> Result<Option<PathogenicityData>, ProviderError> {
        Ok(self.0.get(&coord_key(coords)).cloned())
    }
}

/// An in-memory [`GeneModelProvider`] keyed by gene symbol.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGeneModelDao(HashMap<String, Vec<Model>>);

impl InMemoryGeneModelDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, gene_symbol: impl Into<String>, models: Vec<Model>) -> Self {
        self.0.insert(gene_symbol.into(), models);
        self
    }
}

impl GeneModelProvider for InMemoryGeneModelDao {
    fn models_for_gene(&self, gene_symbol: &str) -> Vec<Model> {
        self.0.get(gene_symbol).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn coords(position: u32) -> VariantCoordinates {
        VariantCoordinates {
            chromosome: crate::model::Chromosome::new(1).unwrap(),
            position,
            reference: "A".into(),
            alternate: "T".into(),
            alt_allele_index: 0,
        }
    }

    #[test]
    fn frequency_lookup_hits_and_misses() {
        let dao = InMemoryFrequencyDao::new().with(
            &coords(100),
            FrequencyData {
                max_freq: 0.01,
                ..Default::default()
            },
        );
        assert_eq!(dao.lookup(&coords(100)).unwrap().unwrap().max_freq, 0.01);
        assert!(dao.lookup(&coords(200)).unwrap().is_none());
    }

    #[test]
    fn gene_model_lookup_hits_and_misses() {
        let dao = InMemoryGeneModelDao::new().with(
            "RBM8A",
            vec![Model {
                id: "OMIM:1".into(),
                gene_symbol: Some("RBM8A".into()),
                phenotype_terms: vec![],
            }],
        );
        assert_eq!(dao.models_for_gene("RBM8A").len(), 1);
        assert!(dao.models_for_gene("GNRHR2").is_empty());
    }
}
