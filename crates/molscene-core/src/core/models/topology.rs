use super::ids::AtomId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BondOrder {
    Single = 1,
    Double = 2,
    Triple = 3,
}

impl Default for BondOrder {
    fn default() -> Self {
        BondOrder::Single
    }
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
            }
        )
    }
}

/// Where a bond came from: connectivity records in the source file, or the
/// geometric distance-table inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondProvenance {
    Explicit,
    Inferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: AtomId,
    pub atom2: AtomId,
    pub order: BondOrder,
    pub provenance: BondProvenance,
}

impl Bond {
    pub fn new(atom1: AtomId, atom2: AtomId, order: BondOrder, provenance: BondProvenance) -> Self {
        Self {
            atom1,
            atom2,
            order,
            provenance,
        }
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1 == atom_id || self.atom2 == atom_id
    }
}
