use super::atom::Atom;
use super::ids::{AtomId, BondId};
use super::topology::Bond;
use crate::core::utils::geometry;
use slotmap::SlotMap;
use std::collections::{BTreeSet, HashMap};

/// The complete parsed structure of one loaded molecule.
///
/// Owns every atom and bond of a single load generation, plus the residue
/// number set and the chain list accumulated during parsing. Atoms keep
/// their file order; bonds keep the order the inference engine emitted
/// them in. A model is assembled in two steps (parser fills atoms and the
/// raw connectivity pairs, then [`set_bonds`](Self::set_bonds) installs the
/// inference output) and is treated as immutable afterwards; a reload
/// replaces the whole model.
#[derive(Debug, Clone, Default)]
pub struct StructuralModel {
    atoms: SlotMap<AtomId, Atom>,
    atom_order: Vec<AtomId>,
    bonds: SlotMap<BondId, Bond>,
    bond_order: Vec<BondId>,
    residue_numbers: BTreeSet<isize>,
    chain_ids: Vec<char>,
    serial_map: HashMap<usize, AtomId>,
    explicit_pairs: Vec<(usize, usize)>,
}

impl StructuralModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom in file order, registering its serial, residue number,
    /// and chain. Returns the arena id of the new atom.
    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let serial = atom.serial;
        let residue_number = atom.residue_number;
        let chain_id = atom.chain_id;

        let atom_id = self.atoms.insert(atom);
        self.atom_order.push(atom_id);
        self.serial_map.insert(serial, atom_id);
        let _ = self.residue_numbers.insert(residue_number);
        if !self.chain_ids.contains(&chain_id) {
            self.chain_ids.push(chain_id);
        }
        atom_id
    }

    /// Installs the bond list produced by the inference engine, replacing any
    /// previously installed bonds.
    pub fn set_bonds(&mut self, bonds: Vec<Bond>) {
        self.bonds.clear();
        self.bond_order.clear();
        for bond in bonds {
            let bond_id = self.bonds.insert(bond);
            self.bond_order.push(bond_id);
        }
    }

    /// Records the deduplicated unordered serial pairs read from the source
    /// file's connectivity records.
    pub fn set_explicit_pairs(&mut self, pairs: Vec<(usize, usize)>) {
        self.explicit_pairs = pairs;
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Iterates atoms in file order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atom_order
            .iter()
            .filter_map(|&id| self.atoms.get(id).map(|atom| (id, atom)))
    }

    pub fn atom_count(&self) -> usize {
        self.atom_order.len()
    }

    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.bonds.get(id)
    }

    /// Iterates bonds in the order the inference engine emitted them.
    pub fn bonds_iter(&self) -> impl Iterator<Item = (BondId, &Bond)> {
        self.bond_order
            .iter()
            .filter_map(|&id| self.bonds.get(id).map(|bond| (id, bond)))
    }

    pub fn bond_count(&self) -> usize {
        self.bond_order.len()
    }

    /// Residue numbers present in the structure, ascending.
    pub fn residue_numbers(&self) -> &BTreeSet<isize> {
        &self.residue_numbers
    }

    /// Chain identifiers in order of first appearance.
    pub fn chain_ids(&self) -> &[char] {
        &self.chain_ids
    }

    pub fn has_residue(&self, residue_number: isize) -> bool {
        self.residue_numbers.contains(&residue_number)
    }

    pub fn has_chain(&self, chain_id: char) -> bool {
        self.chain_ids.contains(&chain_id)
    }

    pub fn find_atom_by_serial(&self, serial: usize) -> Option<AtomId> {
        self.serial_map.get(&serial).copied()
    }

    /// Unordered serial pairs from the source file's connectivity records.
    pub fn explicit_pairs(&self) -> &[(usize, usize)] {
        &self.explicit_pairs
    }

    pub fn has_explicit_connectivity(&self) -> bool {
        !self.explicit_pairs.is_empty()
    }

    /// Euclidean distance between two atoms addressed by serial.
    ///
    /// Pure read over the coordinates; returns `None` when either serial is
    /// unknown.
    pub fn measure_distance(&self, serial_a: usize, serial_b: usize) -> Option<f64> {
        let a = self.atoms.get(self.find_atom_by_serial(serial_a)?)?;
        let b = self.atoms.get(self.find_atom_by_serial(serial_b)?)?;
        Some(geometry::distance(&a.position, &b.position))
    }
}
