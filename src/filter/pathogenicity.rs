//! Pathogenicity Filter.

use std::any::Any;

use crate::err::FilterConfigError;
use crate::model::{FilterDecision, FilterType, VariantEvaluation};

use super::{record_variant, VariantFilter};

/// For missense-equivalent effects, PASS iff any computational score is
/// `>= threshold`; non-missense deleterious effects always PASS; benign
/// effects FAIL when `pathogenicity_only` mode is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathogenicityFilter {
    threshold: f32,
    pathogenicity_only: bool,
}

impl PathogenicityFilter {
    pub fn new(threshold: f32, pathogenicity_only: bool) -> Result<Self, FilterConfigError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(FilterConfigError::PathogenicityCutoffOutOfRange(threshold));
        }
        Ok(Self {
            threshold,
            pathogenicity_only,
        })
    }
}

impl VariantFilter for PathogenicityFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Pathogenicity
    }

    fn apply(&self, variant: &mut VariantEvaluation) -> FilterDecision {
        let pass = if variant.effect.is_deleterious_non_missense() {
            true
        } else if variant.effect.is_missense_equivalent() {
            variant
                .pathogenicity
                .as_ref()
                .and_then(|p| p.max_score())
                .map(|score| score >= self.threshold)
                .unwrap_or(false)
        } else {
            // benign effect class
            !self.pathogenicity_only
        };
        record_variant(variant, self.filter_type(), pass.into())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn config_eq(&self, other: &dyn VariantFilter) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}
