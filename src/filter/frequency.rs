//! Frequency Filter: a threshold-plus-strictness shape over population
//! allele frequency.

use std::any::Any;

use crate::err::FilterConfigError;
use crate::model::{FilterDecision, FilterType, VariantEvaluation};

use super::{record_variant, VariantFilter};

/// PASS iff `maxFreq(variant) <= threshold` AND (not strict OR the variant
/// has no frequency record at all). A null frequency object always passes
/// in non-strict mode; under strict mode a null frequency object FAILS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyFilter {
    max_freq: f32,
    fail_if_represented_in_database: bool,
}

impl FrequencyFilter {
    pub fn new(max_freq: f32, fail_if_represented_in_database: bool) -> Result<Self, FilterConfigError> {
        if !(0.0..=100.0).contains(&max_freq) {
            return Err(FilterConfigError::FrequencyThresholdOutOfRange(max_freq));
        }
        Ok(Self {
            max_freq,
            fail_if_represented_in_database,
        })
    }
}

impl VariantFilter for FrequencyFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Frequency
    }

    fn apply(&self, variant: &mut VariantEvaluation) -> FilterDecision {
        let pass = match &variant.frequency {
            None => !self.fail_if_represented_in_database,
            Some(freq) => freq.max_freq <= self.max_freq,
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{Chromosome, FrequencyData, SampleGenotype, VariantCoordinates, VariantEffect};

    fn variant(frequency: Option<FrequencyData>) -> VariantEvaluation {
        VariantEvaluation {
            coordinates: VariantCoordinates {
                chromosome: Chromosome::new(1).unwrap(),
                position: 1,
                reference: "A".into(),
                alternate: "T".into(),
                alt_allele_index: 0,
            },
            effect: VariantEffect::Missense,
            gene_symbol: None,
            gene_id: None,
            genotypes: SampleGenotype::new(),
            frequency,
            pathogenicity: None,
            quality: 100.0,
            filter_results: Default::default(),
        }
    }

    #[test]
    fn constructor_rejects_out_of_range_thresholds() {
        assert!(FrequencyFilter::new(-0.1, false).is_err());
        assert!(FrequencyFilter::new(100.1, false).is_err());
        assert!(FrequencyFilter::new(0.0, false).is_ok());
        assert!(FrequencyFilter::new(100.0, false).is_ok());
    }

    #[test]
    fn zero_threshold_non_strict_passes_only_without_frequency_data() {
        let filter = FrequencyFilter::new(0.0, false).unwrap();
        let mut no_data = variant(None);
        assert_eq!(filter.apply(&mut no_data), FilterDecision::Pass);

        let mut some_data = variant(Some(FrequencyData {
            max_freq: 0.0,
            ..Default::default()
        }));
        assert_eq!(filter.apply(&mut some_data), FilterDecision::Pass);

        let mut above = variant(Some(FrequencyData {
            max_freq: 0.01,
            ..Default::default()
        }));
        assert_eq!(filter.apply(&mut above), FilterDecision::Fail);
    }

    #[test]
    fn strict_mode_fails_null_frequency() {
        let filter = FrequencyFilter::new(1.0, true).unwrap();
        let mut no_data = variant(None);
        assert_eq!(filter.apply(&mut no_data), FilterDecision::Fail);
    }
}
