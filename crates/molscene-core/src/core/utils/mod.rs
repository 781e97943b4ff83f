pub mod elements;
pub mod geometry;
pub mod identifiers;
