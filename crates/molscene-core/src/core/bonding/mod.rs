//! Covalent bond derivation for a freshly parsed structure.
//!
//! Bonds come from one of two sources: the connectivity records the file
//! already carries, or geometric inference that matches every close atom
//! pair against a reference bond-length table. The caller picks the source
//! explicitly; nothing here falls back silently.

mod spatial;
pub mod table;

use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::model::StructuralModel;
use crate::core::models::topology::{Bond, BondOrder, BondProvenance};
use crate::core::utils::geometry;
use spatial::SpatialGrid;

/// Derives the bond list for a model.
///
/// With `use_explicit` set and connectivity records present, one Single bond
/// is emitted per unique unordered pair. Otherwise bonds are inferred from
/// interatomic distances via [`table::classify`]. Either way the output is
/// deduplicated and sorted by the serial pair, so the same structure yields
/// the same bonds regardless of atom input order.
pub fn infer(model: &StructuralModel, use_explicit: bool) -> Vec<Bond> {
    if use_explicit && model.has_explicit_connectivity() {
        from_explicit(model)
    } else {
        from_geometry(model)
    }
}

fn from_explicit(model: &StructuralModel) -> Vec<Bond> {
    // Pairs are already normalized and deduplicated by the parser; partners
    // referencing unknown serials are dropped here.
    let bonds: Vec<Bond> = model
        .explicit_pairs()
        .iter()
        .filter_map(|&(serial1, serial2)| {
            let atom1 = model.find_atom_by_serial(serial1)?;
            let atom2 = model.find_atom_by_serial(serial2)?;
            Some(Bond::new(
                atom1,
                atom2,
                BondOrder::Single,
                BondProvenance::Explicit,
            ))
        })
        .collect();
    tracing::debug!(count = bonds.len(), "derived bonds from connectivity records");
    bonds
}

fn from_geometry(model: &StructuralModel) -> Vec<Bond> {
    let atoms: Vec<(AtomId, &Atom)> = model.atoms_iter().collect();
    if atoms.len() < 2 {
        return Vec::new();
    }

    let cell_size = table::max_reference_length() + table::DISTANCE_TOLERANCE;
    let mut grid = SpatialGrid::with_capacity(cell_size, atoms.len());
    for (index, (_, atom)) in atoms.iter().enumerate() {
        grid.insert(&atom.position, index);
    }

    // Candidate pairs are keyed by (smaller serial, larger serial) so the
    // final sort makes the bond list independent of file order.
    let mut found: Vec<(usize, usize, usize, usize, BondOrder)> = Vec::new();
    let mut neighbors = Vec::new();
    for (i, (_, atom1)) in atoms.iter().enumerate() {
        grid.query_neighbors(&atom1.position, &mut neighbors);
        for &j in &neighbors {
            if j <= i {
                continue;
            }
            let atom2 = atoms[j].1;
            let dist = geometry::distance(&atom1.position, &atom2.position);
            if let Some(order) = table::classify(&atom1.element, &atom2.element, dist) {
                let (serial_lo, idx_lo, serial_hi, idx_hi) = if atom1.serial <= atom2.serial {
                    (atom1.serial, i, atom2.serial, j)
                } else {
                    (atom2.serial, j, atom1.serial, i)
                };
                found.push((serial_lo, serial_hi, idx_lo, idx_hi, order));
            }
        }
    }

    found.sort_unstable_by_key(|&(s1, s2, ..)| (s1, s2));
    found.dedup_by_key(|&mut (s1, s2, ..)| (s1, s2));

    let bonds: Vec<Bond> = found
        .into_iter()
        .map(|(_, _, idx_lo, idx_hi, order)| {
            Bond::new(atoms[idx_lo].0, atoms[idx_hi].0, order, BondProvenance::Inferred)
        })
        .collect();
    tracing::debug!(count = bonds.len(), "inferred bonds from geometry");
    bonds
}
