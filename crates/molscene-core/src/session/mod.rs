//! # Session Module
//!
//! The public API layer. A [`Session`] owns the currently loaded structure
//! and the representation stack, and keeps the composited render instances
//! in sync with both. External collaborators (renderer, GUI) drive it with
//! plain synchronous calls and pull the instance list after every mutation.

use crate::core::bonding;
use crate::core::io::pdb::{self, ParseReport, PdbError};
use crate::core::models::ids::RepresentationId;
use crate::core::models::model::StructuralModel;
use crate::scene::compositor::{self, RenderInstance};
use crate::scene::error::{RepresentationError, SelectionError};
use crate::scene::representation::{
    Representation, RepresentationConfig, RepresentationPatch, RepresentationStore, Visibility,
};
use crate::scene::selection::{self, DistanceTarget};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] PdbError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Representation(#[from] RepresentationError),

    #[error("no atom with serial {0} in the loaded structure")]
    UnknownAtom(usize),

    #[error("no structure is loaded")]
    NoModelLoaded,
}

/// Options for one structure load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Derive bonds from the file's connectivity records when present,
    /// instead of geometric inference. Off by default.
    pub use_explicit_bonds: bool,
}

/// The stateful entry point tying the whole pipeline together.
///
/// The pipeline is synchronous and single-threaded: parse, then infer, then
/// recomposite on every representation mutation. Mutation requires `&mut
/// self`, so at most one compositing pass can ever run at a time. A new
/// model is swapped in only after parsing and bond inference both complete,
/// so readers never observe a partially-populated structure; a failed load
/// leaves the previous model untouched.
///
/// Representation configuration survives reloads by id. Render instances do
/// not: every successful load bumps the generation counter and drops the
/// cached instances, so output derived from an older model can never be
/// composited with a newer one.
#[derive(Debug)]
pub struct Session {
    model: Option<StructuralModel>,
    store: RepresentationStore,
    instances: Vec<RenderInstance>,
    dirty: bool,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with no structure and one default representation.
    pub fn new() -> Self {
        Self {
            model: None,
            store: RepresentationStore::new(),
            instances: Vec::new(),
            dirty: true,
            generation: 0,
        }
    }

    /// Loads a structure with default options. See
    /// [`load_structure_with`](Self::load_structure_with).
    pub fn load_structure(&mut self, text: &str) -> Result<&StructuralModel, SessionError> {
        self.load_structure_with(text, LoadOptions::default())
    }

    /// Parses `text`, derives bonds, and replaces the active model
    /// wholesale.
    ///
    /// Parse-time failures abort the load and leave the previously loaded
    /// model (if any) intact. Skipped malformed records are reported through
    /// `tracing` warnings emitted by the parser.
    pub fn load_structure_with(
        &mut self,
        text: &str,
        options: LoadOptions,
    ) -> Result<&StructuralModel, SessionError> {
        let (model, report) = pdb::parse(text)?;
        Ok(self.install_model(model, &report, options))
    }

    fn install_model(
        &mut self,
        mut model: StructuralModel,
        report: &ParseReport,
        options: LoadOptions,
    ) -> &StructuralModel {
        let bonds = bonding::infer(&model, options.use_explicit_bonds);
        model.set_bonds(bonds);

        self.generation += 1;
        self.invalidate();
        info!(
            generation = self.generation,
            atoms = model.atom_count(),
            bonds = model.bond_count(),
            chains = model.chain_ids().len(),
            skipped_records = report.skipped.len(),
            "structure loaded"
        );
        self.model.insert(model)
    }

    pub fn model(&self) -> Option<&StructuralModel> {
        self.model.as_ref()
    }

    /// Load generation of the current model; bumped on every successful
    /// load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The representation stack, oldest to newest.
    pub fn representations(&self) -> impl Iterator<Item = &Representation> {
        self.store.list()
    }

    /// Appends a representation as the new highest-priority layer.
    ///
    /// With a structure loaded, the configuration's predicate is validated
    /// against it first.
    pub fn add_representation(
        &mut self,
        config: RepresentationConfig,
    ) -> Result<RepresentationId, SessionError> {
        if let Some(model) = &self.model {
            selection::validate(&config.predicate, model)?;
        }
        let id = self.store.add(config)?;
        debug!(?id, "representation added");
        self.invalidate();
        Ok(id)
    }

    pub fn remove_representation(&mut self, id: RepresentationId) -> Result<(), SessionError> {
        self.store.remove(id)?;
        debug!(?id, "representation removed");
        self.invalidate();
        Ok(())
    }

    /// Applies a typed patch to one representation.
    ///
    /// A patched predicate is validated against the current model before
    /// anything is applied, so a failing mutation leaves the previous valid
    /// state in force.
    pub fn update_representation(
        &mut self,
        id: RepresentationId,
        patch: RepresentationPatch,
    ) -> Result<(), SessionError> {
        if let (Some(model), Some(predicate)) = (&self.model, &patch.predicate) {
            selection::validate(predicate, model)?;
        }
        self.store.update(id, &patch)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_visibility(
        &mut self,
        id: RepresentationId,
        visibility: Visibility,
    ) -> Result<(), SessionError> {
        self.store.set_visibility(id, visibility)?;
        self.invalidate();
        Ok(())
    }

    /// The composited instance set for the current model and stack.
    ///
    /// Pull-based: recomputes lazily after any mutation invalidated the
    /// cache. Without a loaded structure the set is empty.
    pub fn compute_instances(&mut self) -> &[RenderInstance] {
        if self.dirty {
            self.instances = match &self.model {
                Some(model) => compositor::compose(model, &self.store),
                None => Vec::new(),
            };
            self.dirty = false;
            debug!(instances = self.instances.len(), "scene recomposited");
        }
        &self.instances
    }

    /// Euclidean distance between two atoms addressed by serial.
    pub fn measure_distance(&self, serial_a: usize, serial_b: usize) -> Result<f64, SessionError> {
        let model = self.model.as_ref().ok_or(SessionError::NoModelLoaded)?;
        for serial in [serial_a, serial_b] {
            if model.find_atom_by_serial(serial).is_none() {
                return Err(SessionError::UnknownAtom(serial));
            }
        }
        model
            .measure_distance(serial_a, serial_b)
            .ok_or(SessionError::UnknownAtom(serial_a))
    }

    /// Residue numbers with at least one atom within `radius` of the target
    /// (the raw first pass of the within-distance predicate).
    pub fn residues_within(
        &self,
        target: DistanceTarget,
        radius: f64,
    ) -> Result<BTreeSet<isize>, SessionError> {
        let model = self.model.as_ref().ok_or(SessionError::NoModelLoaded)?;
        selection::validate_target(&target, model)?;
        Ok(selection::valid_residues(model, &target, radius))
    }

    fn invalidate(&mut self) {
        self.dirty = true;
        self.instances.clear();
    }
}
