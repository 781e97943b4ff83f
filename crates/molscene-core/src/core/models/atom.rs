use crate::core::utils::elements::{Rgb, element_color};
use nalgebra::Point3;

/// Represents a single atom in a loaded structure.
///
/// An atom carries its identity exactly as reconstructed from the source
/// file: the 1-based serial, the atom and residue names, the parent residue
/// number and chain letter, and the 3D position. The reference color is
/// derived from the element at construction time so that coloring rules can
/// read it without a table lookup. Atoms are immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number from the source file (1-based, file order).
    pub serial: usize,
    /// The atom name (e.g., "CA", "N1").
    pub name: String,
    /// Lower-cased element symbol (e.g., "c", "cl").
    pub element: String,
    /// Sequence number of the parent residue.
    pub residue_number: isize,
    /// Name of the parent residue (e.g., "ALA", "DRG").
    pub residue_name: String,
    /// Single-letter identifier of the parent chain.
    pub chain_id: char,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Reference color derived from the element.
    pub color: Rgb,
}

impl Atom {
    /// Creates a new `Atom`, deriving the reference color from `element`.
    pub fn new(
        serial: usize,
        name: &str,
        element: &str,
        residue_number: isize,
        residue_name: &str,
        chain_id: char,
        position: Point3<f64>,
    ) -> Self {
        Self {
            serial,
            name: name.to_string(),
            element: element.to_string(),
            residue_number,
            residue_name: residue_name.to_string(),
            chain_id,
            position,
            color: element_color(element),
        }
    }

    /// Human-readable label in the `RESNAME<number>:NAME` convention used by
    /// interactive tooling (e.g. `"DRG285:N1"`).
    pub fn label(&self) -> String {
        format!(
            "{}{}:{}",
            self.residue_name,
            self.residue_number,
            self.name.to_uppercase()
        )
    }
}
