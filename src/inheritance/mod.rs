//! Inheritance Compatibility Engine.
//!
//! Pure predicates over `(pedigree, genotypes)`, generalized from "one
//! query sample set" to "an arbitrary pedigree".

use std::collections::{BTreeMap, BTreeSet};

use enum_map::EnumMap;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::err::InheritanceError;
use crate::model::{InheritanceMode, Pedigree, SampleCall, VariantEvaluation};

/// Per-(sub)mode minor-allele-frequency ceiling. Variants whose
/// `maxFreq` exceeds the configured ceiling for a mode are dropped from
/// that mode's supporting set before the compatibility predicate runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeFrequencyCeilings(EnumMap<InheritanceMode, Option<f32>>);

impl ModeFrequencyCeilings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, mode: InheritanceMode, max_freq: f32) -> &mut Self {
        self.0[mode] = Some(max_freq);
        self
    }

    pub fn ceiling(&self, mode: InheritanceMode) -> Option<f32> {
        self.0[mode]
    }

    /// The modes that carry an explicit ceiling, in declaration order.
    pub fn configured_modes(&self) -> impl Iterator<Item = InheritanceMode> + '_ {
        InheritanceMode::iter().filter(move |m| self.0[*m].is_some())
    }
}

/// Result of [`compatible_modes`]: which modes a gene is compatible with,
/// and which variants (by index into the input slice) support each mode.
#[derive(Debug, Clone, Default)]
pub struct InheritanceCompatibility {
    modes: BTreeMap<InheritanceMode, BTreeSet<usize>>,
}

impl InheritanceCompatibility {
    pub fn is_compatible(&self, mode: InheritanceMode) -> bool {
        self.modes.contains_key(&mode)
    }

    pub fn modes(&self) -> impl Iterator<Item = InheritanceMode> + '_ {
        self.modes.keys().copied()
    }

    pub fn supporting(&self, mode: InheritanceMode) -> BTreeSet<usize> {
        self.modes.get(&mode).cloned().unwrap_or_default()
    }

    /// Union of supporting variant indices across every compatible,
    /// reportable mode (used by the Inheritance Filter).
    pub fn all_supporting_reportable(&self) -> BTreeSet<usize> {
        self.modes
            .iter()
            .filter(|(mode, _)| mode.is_reportable())
            .flat_map(|(_, indices)| indices.iter().copied())
            .collect()
    }

    fn insert(&mut self, mode: InheritanceMode, indices: impl IntoIterator<Item = usize>) {
        self.modes.entry(mode).or_default().extend(indices);
    }
}

fn call_for<'a>(variant: &'a VariantEvaluation, sample: &str) -> Option<&'a SampleCall> {
    variant.genotypes.get(sample)
}

/// Variant indices (into `variants`) whose `maxFreq` passes the ceiling
/// configured for `mode`, restricted to the given chromosome predicate.
fn candidates(
    variants: &[&VariantEvaluation],
    ceilings: &ModeFrequencyCeilings,
    mode: InheritanceMode,
    chrom_ok: impl Fn(&VariantEvaluation) -> bool,
) -> Vec<usize> {
    let ceiling = ceilings.ceiling(mode);
    variants
        .iter()
        .enumerate()
        .filter(|(_, v)| chrom_ok(v))
        .filter(|(_, v)| ceiling.map(|c| v.max_freq() <= c).unwrap_or(true))
        .map(|(i, _)| i)
        .collect()
}

fn dominant_compatible(pedigree: &Pedigree, variant: &VariantEvaluation) -> bool {
    pedigree.affected().all(|ind| {
        call_for(variant, &ind.name)
            .map(SampleCall::carries_alt)
            .unwrap_or(false)
    }) && pedigree.unaffected().all(|ind| {
        call_for(variant, &ind.name)
            .map(|c| c.is_hom_ref() || c.is_no_call())
            .unwrap_or(true)
    })
}

fn recessive_hom_compatible(pedigree: &Pedigree, variant: &VariantEvaluation) -> bool {
    pedigree.affected().all(|ind| {
        call_for(variant, &ind.name)
            .map(SampleCall::is_hom_alt)
            .unwrap_or(false)
    }) && !pedigree.unaffected().any(|ind| {
        call_for(variant, &ind.name)
            .map(SampleCall::is_hom_alt)
            .unwrap_or(false)
    })
}

/// Compound-het pair compatibility: every affected member is heterozygous
/// at both variants, and every unaffected parent of an affected individual
/// is heterozygous at exactly one of the two.
fn comp_het_pair_compatible(pedigree: &Pedigree, v1: &VariantEvaluation, v2: &VariantEvaluation) -> bool {
    let affected_ok = pedigree.affected().all(|ind| {
        let het1 = call_for(v1, &ind.name).map(SampleCall::is_het).unwrap_or(false);
        let het2 = call_for(v2, &ind.name).map(SampleCall::is_het).unwrap_or(false);
        het1 && het2
    });
    if !affected_ok {
        return false;
    }

    let unaffected_parents: BTreeSet<String> = pedigree
        .affected()
        .flat_map(|ind| pedigree.unaffected_parents_of(&ind.name))
        .map(|p| p.name.clone())
        .collect();

    unaffected_parents.iter().all(|parent| {
        let het1 = call_for(v1, parent).map(SampleCall::is_het).unwrap_or(false);
        let het2 = call_for(v2, parent).map(SampleCall::is_het).unwrap_or(false);
        het1 != het2
    })
}

fn mt_compatible(pedigree: &Pedigree, variant: &VariantEvaluation) -> bool {
    pedigree.affected().all(|ind| {
        call_for(variant, &ind.name)
            .map(SampleCall::carries_alt)
            .unwrap_or(false)
    })
}

/// Validate that every sample named in any variant's genotypes exists in
/// the pedigree.
fn validate_samples(pedigree: &Pedigree, variants: &[&VariantEvaluation]) -> Result<(), InheritanceError> {
    for variant in variants {
        for sample in variant.genotypes.keys() {
            if !pedigree.contains(sample) {
                return Err(InheritanceError::PedigreeIncompatible(format!(
                    "sample {:?} not found in pedigree",
                    sample
                )));
            }
        }
    }
    Ok(())
}

/// Compute the inheritance modes a gene (i.e. its variants) is compatible
/// with, given `pedigree` and per-mode frequency ceilings.
pub fn compatible_modes(
    pedigree: &Pedigree,
    variants: &[&VariantEvaluation],
    ceilings: &ModeFrequencyCeilings,
) -> Result<InheritanceCompatibility, InheritanceError> {
    validate_samples(pedigree, variants)?;

    let mut result = InheritanceCompatibility::default();

    // Autosomal dominant.
    let ad_candidates = candidates(variants, ceilings, InheritanceMode::AutosomalDominant, |v| {
        v.coordinates.chromosome.is_autosomal()
    });
    let ad_supporting: Vec<usize> = ad_candidates
        .into_iter()
        .filter(|&i| dominant_compatible(pedigree, variants[i]))
        .collect();
    if !ad_supporting.is_empty() {
        result.insert(InheritanceMode::AutosomalDominant, ad_supporting);
    }

    // Autosomal recessive, homozygous sub-mode.
    let ar_hom_candidates = candidates(variants, ceilings, InheritanceMode::AutosomalRecessiveHomAlt, |v| {
        v.coordinates.chromosome.is_autosomal()
    });
    let ar_hom_supporting: Vec<usize> = ar_hom_candidates
        .into_iter()
        .filter(|&i| recessive_hom_compatible(pedigree, variants[i]))
        .collect();
    if !ar_hom_supporting.is_empty() {
        result.insert(InheritanceMode::AutosomalRecessiveHomAlt, ar_hom_supporting.clone());
    }

    // Autosomal recessive, compound heterozygous sub-mode.
    let comp_het_candidates = candidates(
        variants,
        ceilings,
        InheritanceMode::AutosomalRecessiveCompHet,
        |v| v.coordinates.chromosome.is_autosomal(),
    );
    let mut comp_het_supporting = BTreeSet::new();
    for (&i, &j) in comp_het_candidates.iter().tuple_combinations() {
        if comp_het_pair_compatible(pedigree, variants[i], variants[j]) {
            comp_het_supporting.insert(i);
            comp_het_supporting.insert(j);
        }
    }
    if !comp_het_supporting.is_empty() {
        result.insert(InheritanceMode::AutosomalRecessiveCompHet, comp_het_supporting.clone());
    }

    // Combined AUTOSOMAL_RECESSIVE iff compatible with either sub-mode.
    if !ar_hom_supporting.is_empty() || !comp_het_supporting.is_empty() {
        let mut combined: BTreeSet<usize> = ar_hom_supporting.into_iter().collect();
        combined.extend(comp_het_supporting);
        result.insert(InheritanceMode::AutosomalRecessive, combined);
    }

    // X dominant.
    let xd_candidates = candidates(variants, ceilings, InheritanceMode::XDominant, |v| {
        v.coordinates.chromosome.is_x()
    });
    let xd_supporting: Vec<usize> = xd_candidates
        .into_iter()
        .filter(|&i| dominant_compatible(pedigree, variants[i]))
        .collect();
    if !xd_supporting.is_empty() {
        result.insert(InheritanceMode::XDominant, xd_supporting);
    }

    // X recessive (hemizygous males handled by `SampleCall::is_hom_alt`,
    // which treats a single ALT allele call as homozygous-alternate).
    let xr_candidates = candidates(variants, ceilings, InheritanceMode::XRecessive, |v| {
        v.coordinates.chromosome.is_x()
    });
    let xr_supporting: Vec<usize> = xr_candidates
        .into_iter()
        .filter(|&i| recessive_hom_compatible(pedigree, variants[i]))
        .collect();
    if !xr_supporting.is_empty() {
        result.insert(InheritanceMode::XRecessive, xr_supporting);
    }

    // Mitochondrial.
    let mt_candidates = candidates(variants, ceilings, InheritanceMode::Mitochondrial, |v| {
        v.coordinates.chromosome.is_mt()
    });
    let mt_supporting: Vec<usize> = mt_candidates
        .into_iter()
        .filter(|&i| mt_compatible(pedigree, variants[i]))
        .collect();
    if !mt_supporting.is_empty() {
        result.insert(InheritanceMode::Mitochondrial, mt_supporting);
    }

    // ANY: always compatible, diagnostic-only, no supporting set.
    result.insert(InheritanceMode::Any, std::iter::empty());

    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{
        Chromosome, FilterResults, FrequencyData, GenotypeCall, Individual, Sex, VariantCoordinates,
        VariantEffect,
    };

    fn singleton_proband() -> Pedigree {
        Pedigree::new(vec![Individual {
            name: "proband".into(),
            sex: Sex::Male,
            affected: true,
            father: None,
            mother: None,
        }])
        .unwrap()
    }

    #[test]
    fn configured_modes_lists_only_explicit_ceilings() {
        let mut ceilings = ModeFrequencyCeilings::new();
        ceilings.set(InheritanceMode::AutosomalDominant, 0.001);
        ceilings.set(InheritanceMode::Mitochondrial, 0.2);

        let configured: BTreeSet<_> = ceilings.configured_modes().collect();
        assert_eq!(
            configured,
            [InheritanceMode::AutosomalDominant, InheritanceMode::Mitochondrial].into()
        );
    }

    fn trio() -> Pedigree {
        Pedigree::new(vec![
            Individual {
                name: "father".into(),
                sex: Sex::Male,
                affected: false,
                father: None,
                mother: None,
            },
            Individual {
                name: "mother".into(),
                sex: Sex::Female,
                affected: false,
                father: None,
                mother: None,
            },
            Individual {
                name: "proband".into(),
                sex: Sex::Male,
                affected: true,
                father: Some("father".into()),
                mother: Some("mother".into()),
            },
        ])
        .unwrap()
    }

    fn het_variant(chrom: u8, pos: u32, max_freq: f32, sample: &str) -> VariantEvaluation {
        let mut genotypes = crate::model::SampleGenotype::new();
        genotypes.insert(
            sample.to_string(),
            SampleCall::het([GenotypeCall::Ref, GenotypeCall::Alt]),
        );
        VariantEvaluation {
            coordinates: VariantCoordinates {
                chromosome: Chromosome::new(chrom).unwrap(),
                position: pos,
                reference: "A".into(),
                alternate: "T".into(),
                alt_allele_index: 0,
            },
            effect: VariantEffect::Missense,
            gene_symbol: Some("RBM8A".into()),
            gene_id: Some("HGNC:9907".into()),
            genotypes,
            frequency: Some(FrequencyData {
                max_freq,
                ..Default::default()
            }),
            pathogenicity: None,
            quality: 100.0,
            filter_results: FilterResults::new(),
        }
    }

    #[test]
    fn s4_recessive_comp_het_on_singleton() {
        let pedigree = singleton_proband();
        let v1 = het_variant(1, 100, 0.001, "proband");
        let v2 = het_variant(1, 200, 0.05, "proband");
        let mut ceilings = ModeFrequencyCeilings::new();
        ceilings.set(InheritanceMode::AutosomalRecessiveCompHet, 0.1);
        ceilings.set(InheritanceMode::AutosomalRecessive, 0.1);

        let result = compatible_modes(&pedigree, &[&v1, &v2], &ceilings).unwrap();
        assert!(result.is_compatible(InheritanceMode::AutosomalRecessiveCompHet));
        assert!(result.is_compatible(InheritanceMode::AutosomalRecessive));
        assert_eq!(result.supporting(InheritanceMode::AutosomalRecessiveCompHet), [0, 1].into());
    }

    #[test]
    fn ar_symmetry_invariant() {
        let pedigree = singleton_proband();
        let v1 = het_variant(1, 100, 0.001, "proband");
        let v2 = het_variant(1, 200, 0.001, "proband");
        let ceilings = ModeFrequencyCeilings::new();
        let result = compatible_modes(&pedigree, &[&v1, &v2], &ceilings).unwrap();
        if result.is_compatible(InheritanceMode::AutosomalRecessive) {
            assert!(
                result.is_compatible(InheritanceMode::AutosomalRecessiveHomAlt)
                    || result.is_compatible(InheritanceMode::AutosomalRecessiveCompHet)
            );
        }
    }

    #[test]
    fn unknown_sample_is_pedigree_incompatible() {
        let pedigree = singleton_proband();
        let v = het_variant(1, 100, 0.001, "stranger");
        let ceilings = ModeFrequencyCeilings::new();
        let err = compatible_modes(&pedigree, &[&v], &ceilings).unwrap_err();
        assert!(matches!(err, InheritanceError::PedigreeIncompatible(_)));
    }

    #[test]
    fn dominant_requires_all_affected_carry_and_all_unaffected_ref() {
        let pedigree = trio();
        let mut v = het_variant(1, 100, 0.001, "proband");
        v.genotypes.insert(
            "father".into(),
            SampleCall::new(vec![GenotypeCall::Ref, GenotypeCall::Ref]),
        );
        v.genotypes.insert(
            "mother".into(),
            SampleCall::new(vec![GenotypeCall::Ref, GenotypeCall::Ref]),
        );
        let ceilings = ModeFrequencyCeilings::new();
        let result = compatible_modes(&pedigree, &[&v], &ceilings).unwrap();
        assert!(result.is_compatible(InheritanceMode::AutosomalDominant));
    }

    #[test]
    fn any_mode_is_always_compatible_and_not_reportable() {
        let pedigree = singleton_proband();
        let ceilings = ModeFrequencyCeilings::new();
        let result = compatible_modes(&pedigree, &[], &ceilings).unwrap();
        assert!(result.is_compatible(InheritanceMode::Any));
        assert!(!InheritanceMode::Any.is_reportable());
    }
}
