//! Data Provider traits: external interfaces.
//!
//! These are read-only collaborators the analysis core consumes but never
//! implements against a real backend: loading annotation RocksDB-backed
//! frequency/pathogenicity stores and HPO ontology term universes are out
//! of scope here. Each trait is the narrow seam a caller plugs a real
//! implementation into; this module also ships the in-memory test doubles
//! used throughout the test suite.

mod in_memory;

pub use in_memory::{InMemoryFrequencyDao, InMemoryPathogenicityDao, InMemoryGeneModelDao};

use crate::err::ProviderError;
use crate::model::{FrequencyData, Model, PathogenicityData, VariantCoordinates, VariantEffect};

/// `(chr, pos, ref, alt) -> FrequencyData`.
pub trait FrequencyDao {
    fn lookup(&self, coords: &VariantCoordinates) -> Result<Option<FrequencyData>, ProviderError>;
}

/// `(chr, pos, ref, alt, variantEffect) -> PathogenicityData`.
pub trait PathogenicityDao {
    fn lookup(
        &self,
        coords: &VariantCoordinates,
        effect: VariantEffect,
    ) -> Result<Option<PathogenicityData>, ProviderError>;
}

/// Disease/organism-model lookups keyed by gene symbol, the bridge a
/// phenotype-semantic prioritizer needs between a [`crate::model::Gene`]
/// and the Models it should be scored against: required glue for a
/// runnable phenotype-semantic prioritizer.
pub trait GeneModelProvider {
    fn models_for_gene(&self, gene_symbol: &str) -> Vec<Model>;
}
