//! Core data model for ChordTile

pub mod geometry;
pub mod keys;
pub mod position;

pub use geometry::*;
pub use keys::*;
pub use position::*;
