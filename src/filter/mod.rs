//! Filter Framework.
//!
//! Filters are a small closed set of concrete types behind a uniform
//! trait rather than an open class hierarchy. Every filter records its
//! decision on the entity regardless of pass/fail, so `apply` both
//! mutates the entity's filter-results record and returns the decision
//! for the caller's own bookkeeping (e.g. the streaming runner, which
//! drops failed variants after recording).

use std::any::Any;
use std::fmt::Debug;

use crate::model::{FilterDecision, FilterType, Gene, VariantEvaluation};

mod frequency;
mod interval;
mod inheritance;
mod pathogenicity;
mod priority_score;
mod quality;

pub use frequency::FrequencyFilter;
pub use interval::{Interval, IntervalFilter};
pub use inheritance::InheritanceFilter;
pub use pathogenicity::PathogenicityFilter;
pub use priority_score::PriorityScoreFilter;
pub use quality::QualityFilter;

/// Pure, deterministic, idempotent per-variant filter.
pub trait VariantFilter: Debug {
    fn filter_type(&self) -> FilterType;

    /// Evaluate and record the decision on `variant`, returning it too.
    fn apply(&self, variant: &mut VariantEvaluation) -> FilterDecision;

    /// Support for [`VariantFilter::config_eq`]'s downcast.
    fn as_any(&self) -> &dyn Any;

    /// Equality of filters is defined by `(FilterType, configuration)`.
    /// Concrete filters derive `PartialEq` on their configuration struct;
    /// this downcasts and compares.
    fn config_eq(&self, other: &dyn VariantFilter) -> bool;
}

/// Pure, deterministic, idempotent gene-level filter; may additionally mark
/// member variants.
pub trait GeneFilter: Debug {
    fn filter_type(&self) -> FilterType;

    fn apply(&self, gene: &mut Gene) -> FilterDecision;

    fn as_any(&self) -> &dyn Any;

    fn config_eq(&self, other: &dyn GeneFilter) -> bool;
}

/// Helper macro-free implementation shared by every concrete filter: record
/// the decision on the entity's filter-results record before returning it.
pub(crate) fn record_variant(
    variant: &mut VariantEvaluation,
    filter_type: FilterType,
    decision: FilterDecision,
) -> FilterDecision {
    variant.filter_results.record(filter_type, decision);
    decision
}

pub(crate) fn record_gene(
    gene: &mut Gene,
    filter_type: FilterType,
    decision: FilterDecision,
) -> FilterDecision {
    gene.filter_results.record(filter_type, decision);
    decision
}
