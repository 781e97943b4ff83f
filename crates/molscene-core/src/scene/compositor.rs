use crate::core::models::atom::Atom;
use crate::core::models::ids::{AtomId, BondId, RepresentationId};
use crate::core::models::model::StructuralModel;
use crate::core::models::topology::Bond;
use crate::core::utils::elements::{Rgb, vdw_radius};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use slotmap::SecondaryMap;

use super::representation::{ColoringRule, RepresentationStore, Style, Visibility};
use super::selection::PreparedSelection;

/// Sphere scale factor for ball-and-stick atoms.
pub const BALL_AND_STICK_SPHERE_SCALE: f64 = 0.25;
/// Sphere scale factor for space-filling atoms.
pub const SPACE_FILLING_SPHERE_SCALE: f64 = 0.8;
/// Cross-section of bond sticks and line segments.
pub const BOND_THICKNESS: f64 = 0.08;
/// Element-coloring renders ball-and-stick bond sticks white.
pub const BALL_AND_STICK_BOND_COLOR: Rgb = Rgb::new(255, 255, 255);

/// A drawable entity: one atom or one bond of the structural model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Atom(AtomId),
    Bond(BondId),
}

/// Placement of one instance: unit sphere/box into world space.
///
/// Atom spheres scale uniformly by the element's van der Waals radius times
/// the style factor. Bonds sit at the midpoint of their two endpoints,
/// rotated so +Z runs along the bond axis, with the bond length on the Z
/// scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
    pub scale: Vector3<f64>,
}

/// Final color of one instance.
///
/// Line segments colored by element take one color per bond endpoint; the
/// renderer splits the segment at the midpoint. Everything else is uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceColor {
    Uniform(Rgb),
    PerEndpoint(Rgb, Rgb),
}

/// One entry of the compositor's output: an entity in one style with its
/// resolved transform, color, visibility, and owning representation.
///
/// Instances are ephemeral: the whole set is recomputed on every
/// representation mutation or model reload and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstance {
    pub entity: Entity,
    pub style: Style,
    pub transform: Transform,
    pub color: InstanceColor,
    pub visible: bool,
    pub representation: Option<RepresentationId>,
}

#[derive(Clone, Copy)]
struct Claim {
    representation: RepresentationId,
    coloring: ColoringRule,
}

/// Resolves the full representation stack against a model.
///
/// Representations are evaluated newest first; each one sees only the
/// entities of its own style that no newer shown representation has claimed.
/// The first claim wins: an older representation can never override a newer
/// one's claim on the same entity. Entities claimed by nobody are emitted
/// invisible.
///
/// Output order is fixed (styles in declaration order, atoms in file order,
/// then bonds), so composing an unchanged store and model twice yields
/// identical instance lists.
pub fn compose(model: &StructuralModel, store: &RepresentationStore) -> Vec<RenderInstance> {
    let mut atom_claims: Vec<SecondaryMap<AtomId, Claim>> =
        Style::ALL.iter().map(|_| SecondaryMap::new()).collect();
    let mut bond_claims: Vec<SecondaryMap<BondId, Claim>> =
        Style::ALL.iter().map(|_| SecondaryMap::new()).collect();

    for representation in store.iter_newest_first() {
        if representation.visibility == Visibility::Hidden {
            continue;
        }
        let prepared = PreparedSelection::prepare(&representation.predicate, model);
        let claim = Claim {
            representation: representation.id,
            coloring: representation.coloring,
        };
        let style_index = style_index(representation.style);

        if representation.style.renders_atoms() {
            for (atom_id, atom) in model.atoms_iter() {
                if atom_claims[style_index].contains_key(atom_id) {
                    continue;
                }
                if prepared.matches_atom(atom) {
                    let _ = atom_claims[style_index].insert(atom_id, claim);
                }
            }
        }
        if representation.style.renders_bonds() {
            for (bond_id, bond) in model.bonds_iter() {
                if bond_claims[style_index].contains_key(bond_id) {
                    continue;
                }
                let Some((atom1, atom2)) = endpoints(model, bond) else {
                    continue;
                };
                if prepared.matches_bond(atom1, atom2) {
                    let _ = bond_claims[style_index].insert(bond_id, claim);
                }
            }
        }
    }

    let mut instances = Vec::new();
    for (style_index, &style) in Style::ALL.iter().enumerate() {
        if style.renders_atoms() {
            for (atom_id, atom) in model.atoms_iter() {
                instances.push(atom_instance(
                    style,
                    atom_id,
                    atom,
                    atom_claims[style_index].get(atom_id),
                ));
            }
        }
        if style.renders_bonds() {
            for (bond_id, bond) in model.bonds_iter() {
                let Some((atom1, atom2)) = endpoints(model, bond) else {
                    continue;
                };
                instances.push(bond_instance(
                    style,
                    bond_id,
                    atom1,
                    atom2,
                    bond_claims[style_index].get(bond_id),
                ));
            }
        }
    }
    instances
}

fn style_index(style: Style) -> usize {
    match style {
        Style::BallAndStick => 0,
        Style::SpaceFilling => 1,
        Style::Lines => 2,
    }
}

fn endpoints<'m>(model: &'m StructuralModel, bond: &Bond) -> Option<(&'m Atom, &'m Atom)> {
    Some((model.atom(bond.atom1)?, model.atom(bond.atom2)?))
}

fn atom_instance(
    style: Style,
    atom_id: AtomId,
    atom: &Atom,
    claim: Option<&Claim>,
) -> RenderInstance {
    let factor = match style {
        Style::BallAndStick => BALL_AND_STICK_SPHERE_SCALE,
        Style::SpaceFilling => SPACE_FILLING_SPHERE_SCALE,
        Style::Lines => 0.0,
    };
    let radius = vdw_radius(&atom.element) * factor;
    let color = match claim.map(|c| c.coloring) {
        Some(ColoringRule::Fixed(fixed)) => InstanceColor::Uniform(fixed),
        _ => InstanceColor::Uniform(atom.color),
    };
    RenderInstance {
        entity: Entity::Atom(atom_id),
        style,
        transform: Transform {
            position: atom.position,
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(radius, radius, radius),
        },
        color,
        visible: claim.is_some(),
        representation: claim.map(|c| c.representation),
    }
}

fn bond_instance(
    style: Style,
    bond_id: BondId,
    atom1: &Atom,
    atom2: &Atom,
    claim: Option<&Claim>,
) -> RenderInstance {
    let axis = atom2.position - atom1.position;
    let length = axis.norm();
    let midpoint = Point3::from((atom1.position.coords + atom2.position.coords) * 0.5);
    let rotation = if length > 0.0 && length.is_finite() {
        UnitQuaternion::rotation_between(&Vector3::z(), &axis).unwrap_or_else(|| {
            // Anti-parallel axis: rotation_between has no unique answer.
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI)
        })
    } else {
        UnitQuaternion::identity()
    };

    let color = match claim.map(|c| c.coloring) {
        Some(ColoringRule::Fixed(fixed)) => InstanceColor::Uniform(fixed),
        _ => match style {
            Style::Lines => InstanceColor::PerEndpoint(atom1.color, atom2.color),
            _ => InstanceColor::Uniform(BALL_AND_STICK_BOND_COLOR),
        },
    };
    RenderInstance {
        entity: Entity::Bond(bond_id),
        style,
        transform: Transform {
            position: midpoint,
            rotation,
            scale: Vector3::new(BOND_THICKNESS, BOND_THICKNESS, length),
        },
        color,
        visible: claim.is_some(),
        representation: claim.map(|c| c.representation),
    }
}
