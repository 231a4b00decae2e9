//! Core data model for content units.
//!
//! This module contains:
//! - Content units and their builder
//! - The read-only `ContentSource` view used by renderers
//! - The recursive section outline

mod content;
pub mod section;

pub use content::{
    Content, ContentBuilder, ContentSource, Position, anchor_path, generate_identifier,
};
pub use section::{OutlineIter, Section, iter_outline};
