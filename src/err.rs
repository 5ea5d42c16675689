//! Crate-wide error types.
//!
//! Small, `thiserror`-derived enums per fallible subsystem, composed with
//! `anyhow::Error` at call sites that just need to propagate.

use std::process::{ExitCode, Termination};

/// Top-level error that a binary entry point can report as its exit code.
#[derive(thiserror::Error, Debug, Clone)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),
}

impl Termination for AppError {
    fn report(self) -> ExitCode {
        match self {
            AppError::InvalidConfiguration(_) => ExitCode::from(2),
            AppError::AnalysisFailed(_) => ExitCode::from(1),
        }
    }
}

/// Errors raised while constructing filters with an out-of-range parameter.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FilterConfigError {
    #[error("frequency threshold {0} is out of range [0, 100]")]
    FrequencyThresholdOutOfRange(f32),
    #[error("quality threshold {0} must be >= 0")]
    NegativeQualityThreshold(f32),
    #[error("pathogenicity cutoff {0} is out of range [0, 1]")]
    PathogenicityCutoffOutOfRange(f32),
    #[error("priority score threshold {0} is out of range [0, 1]")]
    PriorityScoreThresholdOutOfRange(f64),
}

/// Errors raised by the inheritance compatibility engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InheritanceError {
    /// The variant's samples are not a subset of the pedigree's individuals.
    #[error("pedigree incompatible with supplied genotypes: {0}")]
    PedigreeIncompatible(String),
}

/// Errors raised by the step scheduler.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("step dependency unsatisfied: {0}")]
    StepDependencyUnsatisfied(String),
}

/// Errors raised by external data providers.
///
/// Non-fatal per-variant: callers translate it into the provider's "no
/// data" policy rather than aborting the analysis.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("data provider unavailable: {0}")]
    Unavailable(String),
}
