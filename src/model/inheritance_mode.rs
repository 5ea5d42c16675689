//! Inheritance-mode enumeration: `serde`, `enum_map::Enum`,
//! `strum::EnumString`/`Display`, ordered/hashable.

#[derive(
    serde::Serialize,
    serde::Deserialize,
    enum_map::Enum,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Clone,
    Copy,
)]
pub enum InheritanceMode {
    AutosomalDominant,
    AutosomalRecessive,
    AutosomalRecessiveCompHet,
    AutosomalRecessiveHomAlt,
    XDominant,
    XRecessive,
    Mitochondrial,
    /// Diagnostic-only mode: always compatible, excluded from result
    /// aggregation.
    Any,
}

impl InheritanceMode {
    /// Modes that feed into result aggregation; `Any` is diagnostic-only.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, InheritanceMode::Any)
    }
}
