//! Variant Evaluation entity and its filter-results record.

use indexmap::IndexMap;

use super::chromosome::Chromosome;
use super::genotype::SampleGenotype;

/// Closed enumeration of variant consequence classes relevant to filtering.
/// Narrowed to the classes the Pathogenicity Filter needs to distinguish:
/// missense-equivalent, other-deleterious, benign.
#[derive(
    serde::Serialize, serde::Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy,
)]
pub enum VariantEffect {
    Missense,
    Synonymous,
    SpliceDonor,
    SpliceAcceptor,
    SpliceRegion,
    StopGained,
    StopLost,
    StartLost,
    Frameshift,
    InframeIndel,
    Downstream,
    Upstream,
    IntronicNonSplice,
    Intergenic,
}

impl VariantEffect {
    /// Missense-equivalent effects gate on computational pathogenicity
    /// scores.
    pub fn is_missense_equivalent(&self) -> bool {
        matches!(self, VariantEffect::Missense | VariantEffect::InframeIndel)
    }

    /// Non-missense deleterious effects always pass the pathogenicity
    /// filter regardless of score presence.
    pub fn is_deleterious_non_missense(&self) -> bool {
        matches!(
            self,
            VariantEffect::SpliceDonor
                | VariantEffect::SpliceAcceptor
                | VariantEffect::StopGained
                | VariantEffect::StopLost
                | VariantEffect::StartLost
                | VariantEffect::Frameshift
        )
    }

    /// Benign effect classes, failing under pathogenicity-only mode.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            VariantEffect::Synonymous
                | VariantEffect::Downstream
                | VariantEffect::Upstream
                | VariantEffect::IntronicNonSplice
                | VariantEffect::Intergenic
                | VariantEffect::SpliceRegion
        )
    }
}

/// Genomic coordinates of one variant.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct VariantCoordinates {
    pub chromosome: Chromosome,
    /// 1-based position.
    pub position: u32,
    pub reference: String,
    pub alternate: String,
    /// Index of the alternate allele when multi-allelic (0-based).
    pub alt_allele_index: u32,
}

impl VariantCoordinates {
    /// Whether `position` lies within the half-open-on-neither-end
    /// (i.e. fully inclusive) interval `[start, end]` on the same
    /// chromosome.
    pub fn within(&self, chromosome: Chromosome, start: u32, end: u32) -> bool {
        self.chromosome == chromosome && self.position >= start && self.position <= end
    }
}

/// Frequency annotation for a variant. Per-source fields are nullable;
/// `max_freq` is the highest observed frequency across all configured
/// population databases.
#[serde_with::skip_serializing_none]
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone, Default)]
pub struct FrequencyData {
    pub gnomad_exomes: Option<f32>,
    pub gnomad_genomes: Option<f32>,
    pub in_house: Option<f32>,
    /// Highest observed minor allele frequency, as a percentage (0..=100).
    pub max_freq: f32,
}

/// Pathogenicity annotation for a variant. CADD is rescaled to `[0, 1]`
/// by the provider so all four components are directly comparable.
#[serde_with::skip_serializing_none]
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone, Default)]
pub struct PathogenicityData {
    pub polyphen: Option<f32>,
    /// SIFT score, already inverted (`1 - sift`) so that higher is "more
    /// damaging", consistent with the other three components.
    pub sift_inverted: Option<f32>,
    pub mutation_taster: Option<f32>,
    pub cadd_scaled: Option<f32>,
}

impl PathogenicityData {
    /// Maximum of the present components, or `None` if all are absent.
    pub fn max_score(&self) -> Option<f32> {
        [
            self.polyphen,
            self.sift_inverted,
            self.mutation_taster,
            self.cadd_scaled,
        ]
        .into_iter()
        .flatten()
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f32| a.max(v))))
    }
}

/// The closed set of filter types: at least these eight.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    strum::EnumString,
    strum::Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Clone,
    Copy,
)]
pub enum FilterType {
    Quality,
    Interval,
    Frequency,
    Pathogenicity,
    KnownVariant,
    RegulatoryFeature,
    Inheritance,
    PriorityScore,
}

/// Outcome of applying one filter to one entity.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum FilterDecision {
    Pass,
    Fail,
}

impl FilterDecision {
    pub fn is_pass(&self) -> bool {
        matches!(self, FilterDecision::Pass)
    }
}

impl From<bool> for FilterDecision {
    fn from(value: bool) -> Self {
        if value {
            FilterDecision::Pass
        } else {
            FilterDecision::Fail
        }
    }
}

/// Derived filter status of an entity.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum FilterStatus {
    Unfiltered,
    Passed,
    Failed,
}

/// The mutable filter-results record attached to a variant or gene.
/// Ordered by first-insertion, i.e. by step-declaration order.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct FilterResults(IndexMap<FilterType, FilterDecision>);

impl FilterResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a filter's decision. A filter type already recorded is
    /// overwritten in place rather than duplicated, preserving its original
    /// position: exactly one entry per filter type.
    pub fn record(&mut self, filter_type: FilterType, decision: FilterDecision) {
        self.0.insert(filter_type, decision);
    }

    pub fn get(&self, filter_type: FilterType) -> Option<FilterDecision> {
        self.0.get(&filter_type).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FilterType, &FilterDecision)> {
        self.0.iter()
    }

    pub fn has_any_fail(&self) -> bool {
        self.0.values().any(|d| !d.is_pass())
    }

    pub fn has_any_pass(&self) -> bool {
        self.0.values().any(|d| d.is_pass())
    }

    /// Once any filter fails, status is `Failed` for the rest of the run;
    /// `Passed` requires at least one pass and zero fails; otherwise
    /// `Unfiltered`.
    pub fn status(&self) -> FilterStatus {
        if self.has_any_fail() {
            FilterStatus::Failed
        } else if self.has_any_pass() {
            FilterStatus::Passed
        } else {
            FilterStatus::Unfiltered
        }
    }
}

/// One annotated variant as it flows through the pipeline.
#[serde_with::skip_serializing_none]
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct VariantEvaluation {
    pub coordinates: VariantCoordinates,
    pub effect: VariantEffect,
    /// Gene symbol; `None` represents the "unknown gene" sentinel.
    pub gene_symbol: Option<String>,
    /// Gene identifier (e.g. HGNC ID); `None` represents "unknown gene".
    pub gene_id: Option<String>,
    pub genotypes: SampleGenotype,
    pub frequency: Option<FrequencyData>,
    pub pathogenicity: Option<PathogenicityData>,
    pub quality: f32,
    #[serde(default)]
    pub filter_results: FilterResults,
}

impl VariantEvaluation {
    pub fn filter_status(&self) -> FilterStatus {
        self.filter_results.status()
    }

    /// The per-variant filter score used by gene-level aggregation: the
    /// max of its pathogenicity components, capped to `[0, 1]`.
    pub fn per_variant_filter_score(&self) -> f32 {
        self.pathogenicity
            .as_ref()
            .and_then(PathogenicityData::max_score)
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }

    /// `maxFreq` across all configured population databases, or `0.0` when
    /// no frequency data has been attached.
    pub fn max_freq(&self) -> f32 {
        self.frequency.as_ref().map(|f| f.max_freq).unwrap_or(0.0)
    }
}
