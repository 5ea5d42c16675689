//! Quality Filter.

use std::any::Any;

use crate::err::FilterConfigError;
use crate::model::{FilterDecision, FilterType, VariantEvaluation};

use super::{record_variant, VariantFilter};

/// PASS iff `variant.quality >= threshold`. No frequency/pathogenicity
/// access; a genotype-quality-style check narrowed to the variant-level
/// QUAL score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityFilter {
    threshold: f32,
}

impl QualityFilter {
    pub fn new(threshold: f32) -> Result<Self, FilterConfigError> {
        if threshold < 0.0 {
            return Err(FilterConfigError::NegativeQualityThreshold(threshold));
        }
        Ok(Self { threshold })
    }
}

impl VariantFilter for QualityFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Quality
    }

    fn apply(&self, variant: &mut VariantEvaluation) -> FilterDecision {
        let decision = FilterDecision::from(variant.quality >= self.threshold);
        record_variant(variant, self.filter_type(), decision)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn config_eq(&self, other: &dyn VariantFilter) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}
