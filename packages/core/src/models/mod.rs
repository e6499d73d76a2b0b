//! Data Models
//!
//! This module contains the core data structures used throughout the catalog
//! engine:
//!
//! - `CategoryNode` - Recursive category aggregate (a root node plus its
//!   embedded subtree is one persisted document)
//! - `CategoryPatch` - Sparse field-level update
//! - `time` - Clock abstraction for deterministic timestamp tests

mod category;
pub mod time;

pub use category::{is_valid_slug, CategoryNode, CategoryPatch, ValidationError};
pub use time::{MockTimeProvider, SystemTimeProvider, TimeProvider};
