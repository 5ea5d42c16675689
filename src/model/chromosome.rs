//! Chromosome numbering used by variant coordinates.

use std::fmt;

/// A chromosome, numbered 1..=22 for the autosomes, with 23=X, 24=Y, 25=MT.
#[derive(
    serde::Serialize, serde::Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy,
)]
pub struct Chromosome(u8);

impl Chromosome {
    pub const X: u8 = 23;
    pub const Y: u8 = 24;
    pub const MT: u8 = 25;

    /// Construct from the 1..=25 numbering scheme used throughout this crate.
    pub fn new(no: u8) -> Result<Self, String> {
        if (1..=25).contains(&no) {
            Ok(Self(no))
        } else {
            Err(format!("chromosome number {} out of range 1..=25", no))
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn is_autosomal(&self) -> bool {
        self.0 < Self::X
    }

    pub fn is_x(&self) -> bool {
        self.0 == Self::X
    }

    pub fn is_y(&self) -> bool {
        self.0 == Self::Y
    }

    pub fn is_mt(&self) -> bool {
        self.0 == Self::MT
    }
}

impl TryFrom<u8> for Chromosome {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
            Self::MT => write!(f, "MT"),
            n => write!(f, "{}", n),
        }
    }
}
