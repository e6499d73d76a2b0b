//! Utility functions for the catalog engine
//!
//! This module provides pure helpers used across the codebase.

mod path;

pub use path::{display_path_to_slug_path, slug_path_to_display_path, slugify};
