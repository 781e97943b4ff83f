//! # molscene Core Library
//!
//! A library for loading molecular structures from fixed-column text and
//! resolving an arbitrary stack of visual representations over them: which
//! atoms and bonds are visible, in what drawing style, and with what color.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to keep the
//! parsing/chemistry foundation separate from the stateful scene logic and the
//! user-facing entry points.
//!
//! - **[`core`]: The Foundation.** Stateless data models ([`core::models`]),
//!   the fixed-column structure parser ([`core::io`]), the distance-based bond
//!   inference engine ([`core::bonding`]), and static chemistry tables
//!   ([`core::utils`]).
//!
//! - **[`scene`]: The Logic Core.** The ordered representation stack, typed
//!   selection predicates (including the two-pass within-distance predicate),
//!   and the compositor that assigns every atom and bond its final
//!   visibility, style, and color under the newest-first claim rule.
//!
//! - **[`session`]: The Public API.** The highest-level, user-facing layer.
//!   A [`session::Session`] ties parsing, inference, and compositing together
//!   behind a small set of calls: load a structure, mutate the representation
//!   stack, pull the composited render instances.
//!
//! Rendering itself (GPU meshes, cameras, picking) is deliberately out of
//! scope: the compositor's output is a plain list of render instances that an
//! external renderer can draw however it likes.

pub mod core;
pub mod scene;
pub mod session;
