//! # Core Module
//!
//! The stateless foundation of the library: everything needed to turn raw
//! structure text into a fully-bonded [`models::model::StructuralModel`].
//!
//! - **Molecular Representation** ([`models`]) - atoms, bonds, and the
//!   structural model arena that owns them
//! - **File I/O** ([`io`]) - the fixed-column structure parser
//! - **Bond Inference** ([`bonding`]) - explicit-connectivity and
//!   distance-table bond derivation
//! - **Chemistry Tables** ([`utils`]) - element colors, van der Waals radii,
//!   backbone atom names, and geometry helpers

pub mod bonding;
pub mod io;
pub mod models;
pub mod utils;
