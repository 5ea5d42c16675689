//! Per-sample genotype calls.
//!
//! A sample's genotype is modeled as an ordered sequence of allele calls
//! (one per copy of the locus) drawn from a closed four-value set, the
//! same classification a VCF genotype string ("0/1", "1/1", ...) reduces
//! to before quality thresholds apply; here the classification works
//! directly off the allele-call list instead of a string, since VCF
//! parsing is out of scope for this core.

use indexmap::IndexMap;

/// One allele call, drawn from a closed four-value set.
#[derive(
    serde::Serialize, serde::Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy,
)]
pub enum GenotypeCall {
    /// Reference allele.
    Ref,
    /// The alternate allele under test.
    Alt,
    /// A different alternate allele (multi-allelic site).
    OtherAlt,
    /// No call could be made.
    NoCall,
}

/// One sample's genotype: an ordered list of allele calls. Diploid loci
/// carry two calls; hemizygous loci (male chrX/Y, MT) carry one.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct SampleCall(pub Vec<GenotypeCall>);

impl SampleCall {
    pub fn new(calls: Vec<GenotypeCall>) -> Self {
        Self(calls)
    }

    pub fn het(calls: [GenotypeCall; 2]) -> Self {
        Self(calls.to_vec())
    }

    fn alt_count(&self) -> usize {
        self.0
            .iter()
            .filter(|c| matches!(c, GenotypeCall::Alt))
            .count()
    }

    /// Whether any allele call is a no-call.
    pub fn is_no_call(&self) -> bool {
        self.0.is_empty() || self.0.iter().any(|c| matches!(c, GenotypeCall::NoCall))
    }

    /// True for `{Ref, Ref}` (or a single `Ref` call for hemizygous loci).
    pub fn is_hom_ref(&self) -> bool {
        !self.is_no_call() && self.0.iter().all(|c| matches!(c, GenotypeCall::Ref))
    }

    /// True for exactly one `Alt` call among two calls (diploid heterozygous).
    pub fn is_het(&self) -> bool {
        !self.is_no_call() && self.0.len() == 2 && self.alt_count() == 1
    }

    /// True when every call is `Alt` (homozygous-alternate, or hemizygous alt).
    pub fn is_hom_alt(&self) -> bool {
        !self.is_no_call() && !self.0.is_empty() && self.alt_count() == self.0.len()
    }

    /// Heterozygous or homozygous-alternate: "carries the alt allele".
    pub fn carries_alt(&self) -> bool {
        !self.is_no_call() && self.alt_count() > 0
    }
}

/// Ordered per-sample genotype calls for one variant, keyed by sample name.
pub type SampleGenotype = IndexMap<String, SampleCall>;

#[cfg(test)]
mod test {
    use super::*;
    use GenotypeCall::*;

    #[test]
    fn classifies_het_hom_ref_hom_alt() {
        assert!(SampleCall::new(vec![Ref, Alt]).is_het());
        assert!(SampleCall::new(vec![Ref, Ref]).is_hom_ref());
        assert!(SampleCall::new(vec![Alt, Alt]).is_hom_alt());
        assert!(SampleCall::new(vec![Alt]).is_hom_alt());
        assert!(SampleCall::new(vec![NoCall, Ref]).is_no_call());
    }

    #[test]
    fn carries_alt_covers_het_and_hom_alt() {
        assert!(SampleCall::new(vec![Ref, Alt]).carries_alt());
        assert!(SampleCall::new(vec![Alt, Alt]).carries_alt());
        assert!(!SampleCall::new(vec![Ref, Ref]).carries_alt());
        assert!(!SampleCall::new(vec![NoCall, NoCall]).carries_alt());
    }
}
