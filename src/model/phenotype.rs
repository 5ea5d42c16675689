//! Phenotype terms, matches and models.
//!
//! These are plain data carriers only: no ontology traversal or similarity
//! computation lives here. HPO loading and term-to-term similarity are
//! external collaborators; the core only consumes precomputed
//! [`PhenotypeMatch`] tables (see [`crate::pheno`]).

/// An HPO-style term identifier, e.g. `"HP:0000123"`.
#[derive(
    serde::Serialize, serde::Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone,
)]
pub struct TermId(pub String);

impl From<&str> for TermId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TermId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A term plus its human-readable label.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone)]
pub struct PhenotypeTerm {
    pub id: TermId,
    pub label: String,
}

/// A precomputed best-match between one query term and one model/organism
/// term, as produced by the out-of-scope organism phenotype matcher.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone)]
pub struct PhenotypeMatch {
    pub query_term: TermId,
    pub matched_term: TermId,
    pub lca_term: TermId,
    pub score: f64,
}

/// A disease or organism-model entity with phenotype annotations.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone)]
pub struct Model {
    pub id: String,
    pub gene_symbol: Option<String>,
    pub phenotype_terms: Vec<TermId>,
}
