//! Interval Filter.

use std::any::Any;

use crate::model::{Chromosome, FilterDecision, FilterType, VariantEvaluation};

use super::{record_variant, VariantFilter};

/// One fully-inclusive genomic interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub chromosome: Chromosome,
    pub start: u32,
    pub end: u32,
}

/// PASS iff the variant's coordinates lie inside any configured interval,
/// inclusive on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalFilter {
    intervals: Vec<Interval>,
}

impl IntervalFilter {
    pub fn new(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }
}

impl VariantFilter for IntervalFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Interval
    }

    fn apply(&self, variant: &mut VariantEvaluation) -> FilterDecision {
        let pass = self.intervals.iter().any(|iv| {
            variant
                .coordinates
                .within(iv.chromosome, iv.start, iv.end)
        });
        record_variant(variant, self.filter_type(), pass.into())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn config_eq(&self, other: &dyn VariantFilter) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}
