use crate::core::models::atom::Atom;
use crate::core::models::model::StructuralModel;
use crate::core::utils::{geometry, identifiers};
use nalgebra::Point3;
use std::collections::BTreeSet;

use super::error::SelectionError;

/// Chain-based selection target: a concrete chain letter, or the protein
/// backbone pseudo-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainTarget {
    Id(char),
    Backbone,
}

/// What the within-distance predicate measures distance to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceTarget {
    Residue(isize),
    Chain(char),
}

/// A rule selecting a subset of atoms and bonds.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionPredicate {
    /// Every atom and bond.
    All,
    /// Atoms of one residue; bonds with both endpoints in it.
    Residue(isize),
    /// Atoms of one chain (or the backbone); bonds with both endpoints in it.
    Chain(ChainTarget),
    /// Atoms whose residue has at least one atom within `radius` of the
    /// target, excluding the target's own atoms; bonds where both endpoints
    /// qualify.
    WithinDistance { radius: f64, target: DistanceTarget },
}

/// Checks that everything a predicate references exists in the model.
///
/// Mutation-time validation: a predicate that fails here is rejected before
/// it is stored, so the previously valid selection state stays in force.
pub fn validate(
    predicate: &SelectionPredicate,
    model: &StructuralModel,
) -> Result<(), SelectionError> {
    match predicate {
        SelectionPredicate::All | SelectionPredicate::Chain(ChainTarget::Backbone) => Ok(()),
        SelectionPredicate::Residue(number) => validate_residue(*number, model),
        SelectionPredicate::Chain(ChainTarget::Id(chain)) => validate_chain(*chain, model),
        SelectionPredicate::WithinDistance { target, .. } => validate_target(target, model),
    }
}

/// Checks that a distance target exists in the model.
pub fn validate_target(
    target: &DistanceTarget,
    model: &StructuralModel,
) -> Result<(), SelectionError> {
    match target {
        DistanceTarget::Residue(number) => validate_residue(*number, model),
        DistanceTarget::Chain(chain) => validate_chain(*chain, model),
    }
}

fn validate_residue(number: isize, model: &StructuralModel) -> Result<(), SelectionError> {
    if model.has_residue(number) {
        Ok(())
    } else {
        Err(SelectionError::InvalidResidue(number))
    }
}

fn validate_chain(chain: char, model: &StructuralModel) -> Result<(), SelectionError> {
    if model.has_chain(chain) {
        Ok(())
    } else {
        Err(SelectionError::InvalidChain(chain))
    }
}

/// First pass of the within-distance predicate: the set of residue numbers
/// that have at least one atom within `radius` (inclusive) of any atom of
/// the target.
///
/// The target's own residues qualify trivially (distance zero); the
/// exclusion of target atoms happens at match time, not here.
pub fn valid_residues(
    model: &StructuralModel,
    target: &DistanceTarget,
    radius: f64,
) -> BTreeSet<isize> {
    let target_positions: Vec<Point3<f64>> = model
        .atoms_iter()
        .filter(|(_, atom)| match target {
            DistanceTarget::Residue(number) => atom.residue_number == *number,
            DistanceTarget::Chain(chain) => atom.chain_id == *chain,
        })
        .map(|(_, atom)| atom.position)
        .collect();

    let mut valid = BTreeSet::new();
    for (_, atom) in model.atoms_iter() {
        if valid.contains(&atom.residue_number) {
            continue;
        }
        if let Some(min) = geometry::min_distance_to_set(&atom.position, &target_positions) {
            if min <= radius {
                let _ = valid.insert(atom.residue_number);
            }
        }
    }
    valid
}

/// A predicate resolved against one model, ready for entity matching.
///
/// Preparation never fails: a predicate referencing entities the model does
/// not have (possible after a reload) simply matches nothing.
#[derive(Debug, Clone)]
pub(crate) enum PreparedSelection {
    All,
    Residue(isize),
    Chain(char),
    Backbone,
    Within {
        valid: BTreeSet<isize>,
        target: DistanceTarget,
    },
}

impl PreparedSelection {
    pub fn prepare(predicate: &SelectionPredicate, model: &StructuralModel) -> Self {
        match predicate {
            SelectionPredicate::All => Self::All,
            SelectionPredicate::Residue(number) => Self::Residue(*number),
            SelectionPredicate::Chain(ChainTarget::Id(chain)) => Self::Chain(*chain),
            SelectionPredicate::Chain(ChainTarget::Backbone) => Self::Backbone,
            SelectionPredicate::WithinDistance { radius, target } => Self::Within {
                valid: valid_residues(model, target, *radius),
                target: *target,
            },
        }
    }

    pub fn matches_atom(&self, atom: &Atom) -> bool {
        match self {
            Self::All => true,
            Self::Residue(number) => atom.residue_number == *number,
            Self::Chain(chain) => atom.chain_id == *chain,
            Self::Backbone => identifiers::is_backbone_atom(&atom.name),
            Self::Within { valid, target } => {
                valid.contains(&atom.residue_number)
                    && match target {
                        DistanceTarget::Residue(number) => atom.residue_number != *number,
                        DistanceTarget::Chain(chain) => atom.chain_id != *chain,
                    }
            }
        }
    }

    pub fn matches_bond(&self, atom1: &Atom, atom2: &Atom) -> bool {
        match self {
            Self::All => true,
            Self::Residue(number) => {
                atom1.residue_number == *number && atom2.residue_number == *number
            }
            Self::Chain(chain) => atom1.chain_id == *chain && atom2.chain_id == *chain,
            Self::Backbone => {
                identifiers::is_backbone_atom(&atom1.name)
                    && identifiers::is_backbone_atom(&atom2.name)
            }
            Self::Within { .. } => self.matches_atom(atom1) && self.matches_atom(atom2),
        }
    }
}
