//! Analysis Runner / Step Scheduler: turns a declared sequence of filters
//! and prioritizers into a ranked set of genes.

use indexmap::IndexMap;

use crate::common::ModeOfInheritance;
use crate::err::AnalysisError;
use crate::filter::{GeneFilter, PriorityScoreFilter, VariantFilter};
use crate::model::{FilterStatus, FilterType, Gene, Pedigree, VariantEvaluation};
use crate::priority::Prioritizer;

/// One unit of work in an [`Analysis`]: either a variant-level filter or a
/// gene-level step (a gene filter or a prioritizer). Prioritizers are
/// scheduled as gene filters from an ordering perspective: both kinds are
/// carried in the same declared sequence and the scheduler only
/// distinguishes them when executing.
pub enum AnalysisStep {
    VariantFilter(Box<dyn VariantFilter>),
    GeneFilter(Box<dyn GeneFilter>),
    Prioritizer(Box<dyn Prioritizer>),
}

impl AnalysisStep {
    fn is_inheritance_filter(&self) -> bool {
        matches!(self, AnalysisStep::GeneFilter(f) if f.filter_type() == FilterType::Inheritance)
    }
}

/// An ordered sequence of steps plus the pedigree and mode of inheritance
/// the run is scored against.
pub struct Analysis {
    pedigree: Pedigree,
    mode: ModeOfInheritance,
    steps: Vec<AnalysisStep>,
}

impl Analysis {
    pub fn builder(pedigree: Pedigree, mode: ModeOfInheritance) -> AnalysisBuilder {
        AnalysisBuilder {
            pedigree,
            mode,
            steps: Vec::new(),
        }
    }

    pub fn pedigree(&self) -> &Pedigree {
        &self.pedigree
    }

    pub fn mode(&self) -> ModeOfInheritance {
        self.mode
    }
}

/// Accumulates an ordered step sequence and validates, at
/// [`build`](Self::build) time before any variant is touched, that every
/// priority-score gene filter is preceded by a prioritizer of the same
/// type, and that no variant filter is declared after a gene-level step
/// (the runner only ever executes a variant filter prefix; anything past
/// the first gene-level step would otherwise be silently skipped).
pub struct AnalysisBuilder {
    pedigree: Pedigree,
    mode: ModeOfInheritance,
    steps: Vec<AnalysisStep>,
}

impl AnalysisBuilder {
    pub fn step(mut self, step: AnalysisStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Result<Analysis, AnalysisError> {
        let mut prioritized = std::collections::HashSet::new();
        let mut seen_gene_level_step = false;
        for step in &self.steps {
            match step {
                AnalysisStep::VariantFilter(_) => {
                    if seen_gene_level_step {
                        return Err(AnalysisError::StepDependencyUnsatisfied(
                            "variant filter declared after a gene-level step; variant filters \
                             must all run before any gene filter or prioritizer"
                                .to_string(),
                        ));
                    }
                }
                AnalysisStep::Prioritizer(p) => {
                    seen_gene_level_step = true;
                    prioritized.insert(p.priority_type());
                }
                AnalysisStep::GeneFilter(f) => {
                    seen_gene_level_step = true;
                    if let Some(priority_filter) = f.as_any().downcast_ref::<PriorityScoreFilter>() {
                        if !prioritized.contains(&priority_filter.priority_type()) {
                            return Err(AnalysisError::StepDependencyUnsatisfied(format!(
                                "priority-score filter for {:?} declared before a matching prioritizer ran",
                                priority_filter.priority_type()
                            )));
                        }
                    }
                }
            }
        }

        Ok(Analysis {
            pedigree: self.pedigree,
            mode: self.mode,
            steps: self.steps,
        })
    }
}

/// Executes an [`Analysis`] over an initial variant stream, producing the
/// final (unsorted) set of genes. Pair with [`crate::aggregate::aggregate`]
/// to obtain a ranked list.
pub trait AnalysisRunner {
    fn run(&self, analysis: &Analysis, variants: Vec<VariantEvaluation>) -> Result<Vec<Gene>, AnalysisError>;
}

fn group_into_genes(variants: Vec<VariantEvaluation>) -> Vec<Gene> {
    let mut genes: IndexMap<String, Gene> = IndexMap::new();
    for variant in variants {
        let (Some(gene_symbol), Some(gene_id)) = (variant.gene_symbol.clone(), variant.gene_id.clone())
        else {
            continue;
        };
        genes
            .entry(gene_id.clone())
            .or_insert_with(|| Gene::new(gene_symbol, gene_id))
            .variants
            .push(variant);
    }
    genes.into_values().collect()
}

/// Run the gene-level portion of an analysis: ordinary gene filters and
/// prioritizers in declared order, then every inheritance filter,
/// regardless of where it was declared.
fn run_gene_steps(steps: &[AnalysisStep], genes: &mut Vec<Gene>) {
    let (inheritance_steps, other_steps): (Vec<&AnalysisStep>, Vec<&AnalysisStep>) = steps
        .iter()
        .filter(|s| !matches!(s, AnalysisStep::VariantFilter(_)))
        .partition(|s| s.is_inheritance_filter());

    for step in other_steps.into_iter().chain(inheritance_steps) {
        match step {
            AnalysisStep::GeneFilter(filter) => {
                for gene in genes.iter_mut() {
                    filter.apply(gene);
                }
            }
            AnalysisStep::Prioritizer(prioritizer) => {
                prioritizer.prioritize(genes);
            }
            AnalysisStep::VariantFilter(_) => unreachable!("filtered out above"),
        }
    }
}

/// All variants are held in memory for the run's duration; every filter
/// runs over every variant regardless of prior pass/fail.
#[derive(Debug, Default)]
pub struct SimpleRunner;

impl AnalysisRunner for SimpleRunner {
    fn run(&self, analysis: &Analysis, variants: Vec<VariantEvaluation>) -> Result<Vec<Gene>, AnalysisError> {
        if variants.is_empty() {
            return Ok(Vec::new());
        }

        let mut variants = variants;
        for step in &analysis.steps {
            if let AnalysisStep::VariantFilter(filter) = step {
                for variant in variants.iter_mut() {
                    filter.apply(variant);
                }
            } else {
                break;
            }
        }

        let mut genes = group_into_genes(variants);
        run_gene_steps(&analysis.steps, &mut genes);
        Ok(genes)
    }
}

/// Variants that fail a filter are dropped immediately; only passed
/// variants survive to subsequent filters, so only the failing filter is
/// ever recorded for a dropped variant. Produces identical gene rankings
/// to [`SimpleRunner`] because [`crate::aggregate::aggregate`] only
/// considers passed variants either way.
#[derive(Debug, Default)]
pub struct StreamingRunner;

impl AnalysisRunner for StreamingRunner {
    fn run(&self, analysis: &Analysis, variants: Vec<VariantEvaluation>) -> Result<Vec<Gene>, AnalysisError> {
        if variants.is_empty() {
            return Ok(Vec::new());
        }

        let mut variants = variants;
        for step in &analysis.steps {
            let AnalysisStep::VariantFilter(filter) = step else {
                break;
            };
            for variant in variants.iter_mut() {
                filter.apply(variant);
            }
            variants.retain(|v| v.filter_status() != FilterStatus::Failed);
        }

        let mut genes = group_into_genes(variants);
        run_gene_steps(&analysis.steps, &mut genes);
        Ok(genes)
    }
}

#[cfg(test)]
mod test {
    use crate::filter::{IntervalFilter, Interval, PriorityScoreFilter, QualityFilter};
    use crate::model::{
        Chromosome, FilterDecision, FilterStatus, FilterType, Individual, Sex, VariantCoordinates,
        VariantEffect, VariantEvaluation,
    };
    use crate::priority::MockPrioritizer;

    use super::*;

    fn pedigree() -> Pedigree {
        Pedigree::new(vec![Individual {
            name: "proband".into(),
            sex: Sex::Male,
            affected: true,
            father: None,
            mother: None,
        }])
        .unwrap()
    }

    fn variant(gene_symbol: Option<&str>, quality: f32) -> VariantEvaluation {
        VariantEvaluation {
            coordinates: VariantCoordinates {
                chromosome: Chromosome::new(1).unwrap(),
                position: 100,
                reference: "A".into(),
                alternate: "T".into(),
                alt_allele_index: 0,
            },
            effect: VariantEffect::Missense,
            gene_symbol: gene_symbol.map(str::to_string),
            gene_id: gene_symbol.map(|_| "HGNC:1".to_string()),
            genotypes: Default::default(),
            frequency: None,
            pathogenicity: None,
            quality,
            filter_results: Default::default(),
        }
    }

    fn variant_at(gene_symbol: &str, gene_id: &str, chr: u8, pos: u32, quality: f32) -> VariantEvaluation {
        VariantEvaluation {
            coordinates: VariantCoordinates {
                chromosome: Chromosome::new(chr).unwrap(),
                position: pos,
                reference: "A".into(),
                alternate: "T".into(),
                alt_allele_index: 0,
            },
            effect: VariantEffect::Missense,
            gene_symbol: Some(gene_symbol.to_string()),
            gene_id: Some(gene_id.to_string()),
            genotypes: Default::default(),
            frequency: None,
            pathogenicity: None,
            quality,
            filter_results: Default::default(),
        }
    }

    /// S1: two variant filters (interval, quality), all variants fail.
    /// GNRHR2 (1 variant on chr2) and RBM8A (2 variants on chr1). Both genes
    /// fail; every variant carries exactly the two filter records; the
    /// variant at 1:145508800 passes INTERVAL but fails QUALITY.
    #[test]
    fn s1_two_variant_filters_all_variants_fail() {
        let analysis = Analysis::builder(pedigree(), ModeOfInheritance::Any)
            .step(AnalysisStep::VariantFilter(Box::new(IntervalFilter::new(vec![
                Interval {
                    chromosome: Chromosome::new(1).unwrap(),
                    start: 145_508_800,
                    end: 145_508_800,
                },
            ]))))
            .step(AnalysisStep::VariantFilter(Box::new(
                QualityFilter::new(9_999_999.0).unwrap(),
            )))
            .build()
            .unwrap();

        let variants = vec![
            variant_at("GNRHR2", "HGNC:GNRHR2", 2, 1, 100.0),
            variant_at("RBM8A", "HGNC:9907", 1, 145_507_800, 100.0),
            variant_at("RBM8A", "HGNC:9907", 1, 145_508_800, 100.0),
        ];
        let genes = SimpleRunner.run(&analysis, variants).unwrap();

        assert_eq!(genes.len(), 2);
        for gene in &genes {
            assert!(!gene.passed_filters());
            for variant in &gene.variants {
                assert_eq!(variant.filter_results.iter().count(), 2);
                assert_eq!(variant.filter_status(), FilterStatus::Failed);
            }
        }

        let rbm8a = genes.iter().find(|g| g.gene_symbol == "RBM8A").unwrap();
        let boundary = rbm8a
            .variants
            .iter()
            .find(|v| v.coordinates.position == 145_508_800)
            .unwrap();
        assert_eq!(boundary.filter_results.get(FilterType::Interval), Some(FilterDecision::Pass));
        assert_eq!(boundary.filter_results.get(FilterType::Quality), Some(FilterDecision::Fail));
    }

    /// S2: interval filter alone passes one of RBM8A's two variants; GNRHR2
    /// (outside the interval) fails entirely.
    #[test]
    fn s2_interval_passes_one_variant() {
        let analysis = Analysis::builder(pedigree(), ModeOfInheritance::Any)
            .step(AnalysisStep::VariantFilter(Box::new(IntervalFilter::new(vec![
                Interval {
                    chromosome: Chromosome::new(1).unwrap(),
                    start: 145_508_800,
                    end: 145_508_800,
                },
            ]))))
            .build()
            .unwrap();

        let variants = vec![
            variant_at("GNRHR2", "HGNC:GNRHR2", 2, 1, 100.0),
            variant_at("RBM8A", "HGNC:9907", 1, 145_507_800, 100.0),
            variant_at("RBM8A", "HGNC:9907", 1, 145_508_800, 100.0),
        ];
        let genes = SimpleRunner.run(&analysis, variants).unwrap();

        let gnrhr2 = genes.iter().find(|g| g.gene_symbol == "GNRHR2").unwrap();
        assert!(!gnrhr2.passed_filters());

        let rbm8a = genes.iter().find(|g| g.gene_symbol == "RBM8A").unwrap();
        assert!(rbm8a.passed_filters());
        let passing: Vec<_> = rbm8a
            .variants
            .iter()
            .filter(|v| v.filter_status() == FilterStatus::Passed)
            .collect();
        assert_eq!(passing.len(), 1);
        assert_eq!(passing[0].coordinates.position, 145_508_800);
    }

    /// S3: a priority-score gate retains the gene scored above cutoff and
    /// rejects the one scored below, recording PRIORITY_SCORE on the loser.
    #[test]
    fn s3_priority_score_gate() {
        let scores = [("RBM8A".to_string(), 0.9), ("GNRHR2".to_string(), 0.0)]
            .into_iter()
            .collect();
        let prioritizer = MockPrioritizer::new(scores);
        let filter = PriorityScoreFilter::new(crate::model::PriorityType::Mock, 0.8).unwrap();

        let analysis = Analysis::builder(pedigree(), ModeOfInheritance::Any)
            .step(AnalysisStep::Prioritizer(Box::new(prioritizer)))
            .step(AnalysisStep::GeneFilter(Box::new(filter)))
            .build()
            .unwrap();

        let variants = vec![
            variant_at("GNRHR2", "HGNC:GNRHR2", 2, 1, 100.0),
            variant_at("RBM8A", "HGNC:9907", 1, 100, 100.0),
        ];
        let mut genes = SimpleRunner.run(&analysis, variants).unwrap();

        let rbm8a = genes.iter().find(|g| g.gene_symbol == "RBM8A").unwrap();
        assert_eq!(
            rbm8a.filter_results.get(FilterType::PriorityScore),
            Some(FilterDecision::Pass)
        );
        let gnrhr2 = genes.iter().find(|g| g.gene_symbol == "GNRHR2").unwrap();
        assert_eq!(
            gnrhr2.filter_results.get(FilterType::PriorityScore),
            Some(FilterDecision::Fail)
        );

        crate::aggregate::aggregate(&mut genes, &pedigree(), ModeOfInheritance::Any);
        let rbm8a = genes.iter().find(|g| g.gene_symbol == "RBM8A").unwrap();
        assert_eq!(rbm8a.priority_score, Some(0.9));
    }

    #[test]
    fn ungrouped_variants_are_dropped() {
        let analysis = Analysis::builder(pedigree(), ModeOfInheritance::Any)
            .build()
            .unwrap();
        let variants = vec![variant(None, 100.0), variant(Some("RBM8A"), 100.0)];
        let genes = SimpleRunner.run(&analysis, variants).unwrap();
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].gene_symbol, "RBM8A");
    }

    #[test]
    fn priority_score_filter_without_prior_prioritizer_is_rejected() {
        let filter = PriorityScoreFilter::new(crate::model::PriorityType::Mock, 0.5).unwrap();
        let result = Analysis::builder(pedigree(), ModeOfInheritance::Any)
            .step(AnalysisStep::GeneFilter(Box::new(filter)))
            .build();
        assert!(matches!(result, Err(AnalysisError::StepDependencyUnsatisfied(_))));
    }

    #[test]
    fn priority_score_filter_after_matching_prioritizer_is_accepted() {
        let prioritizer = MockPrioritizer::new(Default::default());
        let filter = PriorityScoreFilter::new(crate::model::PriorityType::Mock, 0.5).unwrap();
        let analysis = Analysis::builder(pedigree(), ModeOfInheritance::Any)
            .step(AnalysisStep::Prioritizer(Box::new(prioritizer)))
            .step(AnalysisStep::GeneFilter(Box::new(filter)))
            .build();
        assert!(analysis.is_ok());
    }

    #[test]
    fn streaming_and_simple_runners_agree_on_surviving_genes() {
        let build = || {
            Analysis::builder(pedigree(), ModeOfInheritance::Any)
                .step(AnalysisStep::VariantFilter(Box::new(
                    QualityFilter::new(50.0).unwrap(),
                )))
                .build()
                .unwrap()
        };

        let variants = || {
            vec![
                variant(Some("RBM8A"), 10.0),
                variant(Some("RBM8A"), 100.0),
            ]
        };

        let simple_genes = SimpleRunner.run(&build(), variants()).unwrap();
        let streaming_genes = StreamingRunner.run(&build(), variants()).unwrap();

        assert_eq!(simple_genes.len(), 1);
        assert_eq!(streaming_genes.len(), 1);
        assert_eq!(simple_genes[0].variants.len(), 2);
        assert_eq!(streaming_genes[0].variants.len(), 1);
    }

    #[test]
    fn empty_input_completes_with_no_genes() {
        let analysis = Analysis::builder(pedigree(), ModeOfInheritance::Any)
            .build()
            .unwrap();
        let genes = SimpleRunner.run(&analysis, vec![]).unwrap();
        assert!(genes.is_empty());
    }

    #[test]
    fn variant_filter_after_gene_level_step_is_rejected() {
        let prioritizer = MockPrioritizer::new(Default::default());
        let result = Analysis::builder(pedigree(), ModeOfInheritance::Any)
            .step(AnalysisStep::Prioritizer(Box::new(prioritizer)))
            .step(AnalysisStep::VariantFilter(Box::new(
                QualityFilter::new(30.0).unwrap(),
            )))
            .build();
        assert!(matches!(result, Err(AnalysisError::StepDependencyUnsatisfied(_))));
    }
}
