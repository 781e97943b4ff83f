//! # Scene Module
//!
//! The stateful logic core sitting between the parsed structure and the
//! renderer: the ordered representation stack, typed selection predicates,
//! and the compositor that resolves the final per-entity visibility, style,
//! and color.
//!
//! - [`representation`] - representation records and the ordered store
//! - [`selection`] - selection predicates and their evaluation
//! - [`compositor`] - the newest-first claim pass producing render instances
//! - [`config`] - externally supplied chain-name aliases
//! - [`error`] - selection and representation error kinds

pub mod compositor;
pub mod config;
pub mod error;
pub mod representation;
pub mod selection;
