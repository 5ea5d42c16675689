//! Priority result entity.

/// Closed set of gene-level prioritizer kinds.
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
pub enum PriorityType {
    Omim,
    Phenix,
    Phenodigm,
    HiPhive,
    ExomeWalker,
    Mock,
}

/// `(PriorityType, score, optional subscores)`. The meaning of `score` is
/// defined entirely by `priority_type`; scores of different types are not
/// comparable to one another.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct PriorityResult {
    pub priority_type: PriorityType,
    pub score: f64,
    #[serde(default)]
    pub subscores: std::collections::BTreeMap<String, f64>,
}

impl PriorityResult {
    pub fn new(priority_type: PriorityType, score: f64) -> Self {
        Self {
            priority_type,
            score,
            subscores: Default::default(),
        }
    }

    pub fn with_subscore(mut self, name: impl Into<String>, value: f64) -> Self {
        self.subscores.insert(name.into(), value);
        self
    }
}
