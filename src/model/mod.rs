//! The entities that flow through the analysis pipeline.

mod chromosome;
mod gene;
mod genotype;
mod inheritance_mode;
mod pedigree;
mod phenotype;
mod priority_result;
mod variant;

pub use chromosome::Chromosome;
pub use gene::Gene;
pub use genotype::{GenotypeCall, SampleCall, SampleGenotype};
pub use inheritance_mode::InheritanceMode;
pub use pedigree::{DanglingParentError, Individual, Pedigree, Sex};
pub use phenotype::{Model, PhenotypeMatch, PhenotypeTerm, TermId};
pub use priority_result::{PriorityResult, PriorityType};
pub use variant::{
    FilterDecision, FilterResults, FilterStatus, FilterType, FrequencyData, PathogenicityData,
    VariantCoordinates, VariantEffect, VariantEvaluation,
};
