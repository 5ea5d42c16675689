//! Priority-Score Filter (gene-level).

use std::any::Any;

use crate::err::FilterConfigError;
use crate::model::{FilterDecision, FilterType, Gene, PriorityType};

use super::{record_gene, GeneFilter};

/// PASS iff `gene` has a [`crate::model::PriorityResult`] of the named
/// [`PriorityType`] with score `>= threshold`. Requires, at the analysis
/// scheduling level, that a prioritizer of that type has already run; this
/// filter itself only reads whatever result is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityScoreFilter {
    priority_type: PriorityType,
    threshold: f64,
}

impl PriorityScoreFilter {
    pub fn new(priority_type: PriorityType, threshold: f64) -> Result<Self, FilterConfigError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(FilterConfigError::PriorityScoreThresholdOutOfRange(threshold));
        }
        Ok(Self {
            priority_type,
            threshold,
        })
    }

    pub fn priority_type(&self) -> PriorityType {
        self.priority_type
    }
}

impl GeneFilter for PriorityScoreFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::PriorityScore
    }

    fn apply(&self, gene: &mut Gene) -> FilterDecision {
        let pass = gene
            .priority_result(self.priority_type)
            .map(|r| r.score >= self.threshold)
            .unwrap_or(false);
        record_gene(gene, self.filter_type(), pass.into())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn config_eq(&self, other: &dyn GeneFilter) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}
