use crate::core::models::ids::RepresentationId;
use crate::core::utils::elements::Rgb;
use slotmap::SlotMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::error::RepresentationError;
use super::selection::SelectionPredicate;

/// Upper bound on the number of stacked representations.
pub const MAX_REPRESENTATIONS: usize = 10;

/// Drawing style of one representation layer.
///
/// Each style renders a subset of the structure's entities: ball-and-stick
/// draws atom spheres and bond sticks, space-filling draws atom spheres
/// only, lines draws bond segments only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    BallAndStick,
    SpaceFilling,
    Lines,
}

impl Style {
    /// All styles, in the fixed order the compositor emits them.
    pub const ALL: [Style; 3] = [Style::BallAndStick, Style::SpaceFilling, Style::Lines];

    pub fn renders_atoms(self) -> bool {
        matches!(self, Style::BallAndStick | Style::SpaceFilling)
    }

    pub fn renders_bonds(self) -> bool {
        matches!(self, Style::BallAndStick | Style::Lines)
    }
}

#[derive(Debug, Error)]
#[error("Invalid drawing style string")]
pub struct ParseStyleError;

impl FromStr for Style {
    type Err = ParseStyleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ball-and-stick" | "ballandstick" | "cpk" => Ok(Style::BallAndStick),
            "space-filling" | "spacefilling" | "vdw" => Ok(Style::SpaceFilling),
            "lines" => Ok(Style::Lines),
            _ => Err(ParseStyleError),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Style::BallAndStick => "ball-and-stick",
                Style::SpaceFilling => "space-filling",
                Style::Lines => "lines",
            }
        )
    }
}

/// How a representation colors the entities it claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColoringRule {
    /// Each entity keeps its element-derived reference color.
    ByElement,
    /// Every claimed entity gets one fixed color.
    Fixed(Rgb),
}

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);

#[derive(Debug, Error)]
#[error("Invalid coloring rule string")]
pub struct ParseColoringRuleError;

impl FromStr for ColoringRule {
    type Err = ParseColoringRuleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "element" | "name" => Ok(ColoringRule::ByElement),
            "red" => Ok(ColoringRule::Fixed(RED)),
            "green" => Ok(ColoringRule::Fixed(GREEN)),
            "blue" => Ok(ColoringRule::Fixed(BLUE)),
            _ => Err(ParseColoringRuleError),
        }
    }
}

impl fmt::Display for ColoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColoringRule::ByElement => write!(f, "element"),
            ColoringRule::Fixed(RED) => write!(f, "red"),
            ColoringRule::Fixed(GREEN) => write!(f, "green"),
            ColoringRule::Fixed(BLUE) => write!(f, "blue"),
            ColoringRule::Fixed(c) => write!(f, "#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

/// One independently configured visual layer over the structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Representation {
    pub id: RepresentationId,
    pub style: Style,
    pub coloring: ColoringRule,
    pub predicate: SelectionPredicate,
    pub visibility: Visibility,
}

/// Initial configuration for a new representation.
#[derive(Debug, Clone, PartialEq)]
pub struct RepresentationConfig {
    pub style: Style,
    pub coloring: ColoringRule,
    pub predicate: SelectionPredicate,
    pub visibility: Visibility,
}

impl Default for RepresentationConfig {
    fn default() -> Self {
        Self {
            style: Style::BallAndStick,
            coloring: ColoringRule::ByElement,
            predicate: SelectionPredicate::All,
            visibility: Visibility::Shown,
        }
    }
}

/// Typed partial update for one representation.
///
/// Fields left `None` keep their current value. Visibility has its own
/// toggle entry point and is not part of the patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepresentationPatch {
    pub style: Option<Style>,
    pub coloring: Option<ColoringRule>,
    pub predicate: Option<SelectionPredicate>,
}

/// The ordered stack of representations.
///
/// Order is semantically meaningful: the newest (last appended) layer has
/// the highest claim priority during compositing. The store always holds at
/// least one representation; it is created with a default layer and refuses
/// to remove the last one.
#[derive(Debug, Clone)]
pub struct RepresentationStore {
    representations: SlotMap<RepresentationId, Representation>,
    order: Vec<RepresentationId>,
}

impl Default for RepresentationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RepresentationStore {
    /// Creates a store holding one default representation.
    pub fn new() -> Self {
        let mut store = Self {
            representations: SlotMap::with_key(),
            order: Vec::new(),
        };
        // A fresh store can never be at the limit.
        let _ = store.add(RepresentationConfig::default());
        store
    }

    /// Appends a representation, making it the highest-priority layer.
    pub fn add(
        &mut self,
        config: RepresentationConfig,
    ) -> Result<RepresentationId, RepresentationError> {
        if self.order.len() >= MAX_REPRESENTATIONS {
            return Err(RepresentationError::LimitReached(MAX_REPRESENTATIONS));
        }
        let id = self.representations.insert_with_key(|id| Representation {
            id,
            style: config.style,
            coloring: config.coloring,
            predicate: config.predicate,
            visibility: config.visibility,
        });
        self.order.push(id);
        Ok(id)
    }

    /// Removes a representation; the last remaining one cannot be removed.
    pub fn remove(&mut self, id: RepresentationId) -> Result<(), RepresentationError> {
        if !self.representations.contains_key(id) {
            return Err(RepresentationError::UnknownId);
        }
        if self.order.len() == 1 {
            return Err(RepresentationError::CannotRemoveLast);
        }
        let _ = self.representations.remove(id);
        self.order.retain(|&existing| existing != id);
        Ok(())
    }

    /// Applies a partial update to one representation.
    pub fn update(
        &mut self,
        id: RepresentationId,
        patch: &RepresentationPatch,
    ) -> Result<(), RepresentationError> {
        let representation = self
            .representations
            .get_mut(id)
            .ok_or(RepresentationError::UnknownId)?;
        if let Some(style) = patch.style {
            representation.style = style;
        }
        if let Some(coloring) = patch.coloring {
            representation.coloring = coloring;
        }
        if let Some(predicate) = &patch.predicate {
            representation.predicate = predicate.clone();
        }
        Ok(())
    }

    pub fn set_visibility(
        &mut self,
        id: RepresentationId,
        visibility: Visibility,
    ) -> Result<(), RepresentationError> {
        let representation = self
            .representations
            .get_mut(id)
            .ok_or(RepresentationError::UnknownId)?;
        representation.visibility = visibility;
        Ok(())
    }

    pub fn get(&self, id: RepresentationId) -> Option<&Representation> {
        self.representations.get(id)
    }

    /// Iterates representations oldest to newest (stack order).
    pub fn list(&self) -> impl Iterator<Item = &Representation> {
        self.order
            .iter()
            .filter_map(|&id| self.representations.get(id))
    }

    /// Iterates representations newest to oldest (claim priority order).
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Representation> {
        self.order
            .iter()
            .rev()
            .filter_map(|&id| self.representations.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::selection::ChainTarget;

    #[test]
    fn a_new_store_holds_one_default_representation() {
        let store = RepresentationStore::new();
        assert_eq!(store.len(), 1);
        let rep = store.list().next().unwrap();
        assert_eq!(rep.style, Style::BallAndStick);
        assert_eq!(rep.coloring, ColoringRule::ByElement);
        assert_eq!(rep.predicate, SelectionPredicate::All);
        assert_eq!(rep.visibility, Visibility::Shown);
    }

    #[test]
    fn added_representations_go_to_the_top_of_the_stack() {
        let mut store = RepresentationStore::new();
        let id = store
            .add(RepresentationConfig {
                style: Style::Lines,
                ..Default::default()
            })
            .unwrap();

        let order: Vec<RepresentationId> = store.list().map(|r| r.id).collect();
        assert_eq!(order.len(), 2);
        assert_eq!(order[1], id);
        assert_eq!(store.iter_newest_first().next().unwrap().id, id);
    }

    #[test]
    fn removing_the_last_representation_is_refused() {
        let mut store = RepresentationStore::new();
        let id = store.list().next().unwrap().id;
        assert_eq!(store.remove(id), Err(RepresentationError::CannotRemoveLast));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn removing_an_unknown_id_is_an_error() {
        let mut store = RepresentationStore::new();
        let id = store.add(RepresentationConfig::default()).unwrap();
        store.remove(id).unwrap();
        assert_eq!(store.remove(id), Err(RepresentationError::UnknownId));
    }

    #[test]
    fn the_limit_caps_the_stack_depth() {
        let mut store = RepresentationStore::new();
        for _ in 1..MAX_REPRESENTATIONS {
            store.add(RepresentationConfig::default()).unwrap();
        }
        assert_eq!(store.len(), MAX_REPRESENTATIONS);
        assert_eq!(
            store.add(RepresentationConfig::default()),
            Err(RepresentationError::LimitReached(MAX_REPRESENTATIONS))
        );
    }

    #[test]
    fn update_patches_only_the_given_fields() {
        let mut store = RepresentationStore::new();
        let id = store.list().next().unwrap().id;

        store
            .update(
                id,
                &RepresentationPatch {
                    style: Some(Style::Lines),
                    coloring: None,
                    predicate: Some(SelectionPredicate::Chain(ChainTarget::Id('A'))),
                },
            )
            .unwrap();

        let rep = store.get(id).unwrap();
        assert_eq!(rep.style, Style::Lines);
        assert_eq!(rep.coloring, ColoringRule::ByElement);
        assert_eq!(
            rep.predicate,
            SelectionPredicate::Chain(ChainTarget::Id('A'))
        );
    }

    #[test]
    fn visibility_toggles_independently_of_configuration() {
        let mut store = RepresentationStore::new();
        let id = store.list().next().unwrap().id;

        store.set_visibility(id, Visibility::Hidden).unwrap();
        assert_eq!(store.get(id).unwrap().visibility, Visibility::Hidden);
        store.set_visibility(id, Visibility::Shown).unwrap();
        assert_eq!(store.get(id).unwrap().visibility, Visibility::Shown);
    }

    #[test]
    fn style_entity_coverage_matches_the_drawing_method() {
        assert!(Style::BallAndStick.renders_atoms());
        assert!(Style::BallAndStick.renders_bonds());
        assert!(Style::SpaceFilling.renders_atoms());
        assert!(!Style::SpaceFilling.renders_bonds());
        assert!(!Style::Lines.renders_atoms());
        assert!(Style::Lines.renders_bonds());
    }

    #[test]
    fn style_and_coloring_parse_from_strings() {
        assert_eq!("cpk".parse::<Style>().unwrap(), Style::BallAndStick);
        assert_eq!("VDW".parse::<Style>().unwrap(), Style::SpaceFilling);
        assert_eq!("lines".parse::<Style>().unwrap(), Style::Lines);
        assert!("ribbon".parse::<Style>().is_err());

        assert_eq!(
            "element".parse::<ColoringRule>().unwrap(),
            ColoringRule::ByElement
        );
        assert_eq!(
            "red".parse::<ColoringRule>().unwrap(),
            ColoringRule::Fixed(RED)
        );
        assert!("mauve".parse::<ColoringRule>().is_err());
    }

    #[test]
    fn style_and_coloring_round_trip_through_display() {
        for style in Style::ALL {
            assert_eq!(style.to_string().parse::<Style>().unwrap(), style);
        }
        assert_eq!(ColoringRule::ByElement.to_string(), "element");
        assert_eq!(ColoringRule::Fixed(GREEN).to_string(), "green");
        assert_eq!(
            ColoringRule::Fixed(Rgb::new(1, 2, 3)).to_string(),
            "#010203"
        );
    }
}
