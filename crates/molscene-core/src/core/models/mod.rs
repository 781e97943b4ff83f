//! # Core Models Module
//!
//! The fundamental data structures for representing one loaded molecular
//! structure.
//!
//! - [`atom`] - individual atom records with coordinates and identity
//! - [`topology`] - bond records, bond order, and bond provenance
//! - [`model`] - the [`model::StructuralModel`] arena owning all atoms and
//!   bonds of one load generation
//! - [`ids`] - stable arena key types for atoms, bonds, and representations
//!
//! A model is built once per load (parser first, bond inference second) and
//! replaced wholesale on reload; nothing mutates it incrementally afterwards.

pub mod atom;
pub mod ids;
pub mod model;
pub mod topology;
