use phf::{Set, phf_set};

static BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "C", "CA", "N", "O",
};

/// Returns true when the atom name is a protein backbone atom.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn is_backbone_atom(atom_name: &str) -> bool {
    BACKBONE_ATOM_NAMES.contains(atom_name.trim().to_ascii_uppercase().as_str())
}
