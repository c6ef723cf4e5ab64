//! Path handling for the sort engine.
//!
//! The engine only ever works with absolute paths. [`PathEntity`] wraps one
//! and derives the attributes every other component needs (name, parent,
//! extension, stem, hidden status). The [`normalize`] helpers turn
//! user-supplied paths such as `~/Downloads` into absolute ones before they
//! reach the engine.
//!
//! # Examples
//!
//! ```
//! use sorter::path::{PathEntity, PathRelationship};
//! use std::path::Path;
//!
//! let file = PathEntity::new("/home/me/Downloads/slides.PPTX").unwrap();
//! assert_eq!(file.extension(), "pptx");
//! assert_eq!(file.parent(), Path::new("/home/me/Downloads"));
//!
//! assert!(PathRelationship::is_within(file.path(), Path::new("/home/me")));
//! ```

mod entity;
pub mod normalize;
pub mod relationship;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use entity::{is_hidden_name, PathEntity};
pub(crate) use entity::split_name;
pub use relationship::PathRelationship;
