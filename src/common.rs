//! Common functionality shared across the analysis core and its CLI shell.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use strum_macros::{Display, EnumString};

/// Commonly used command line arguments, flattened into every sub command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program.
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// Mode of inheritance as selected for one analysis run.
///
/// Distinct from [`crate::inheritance::InheritanceMode`], which is the
/// richer set of modes the compatibility engine can prove a gene compatible
/// with; this is the coarser configuration knob a caller selects up front.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    enum_map::Enum,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    Debug,
    EnumString,
    Display,
)]
pub enum ModeOfInheritance {
    #[strum(serialize = "AD")]
    AutosomalDominant,
    #[strum(serialize = "AR")]
    AutosomalRecessive,
    #[strum(serialize = "XD")]
    XDominant,
    #[strum(serialize = "XR")]
    XRecessive,
    #[strum(serialize = "MT")]
    Mitochondrial,
    #[strum(serialize = "ANY")]
    Any,
}
