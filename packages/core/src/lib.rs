//! Catalog Core Business Logic Layer
//!
//! This crate provides the category tree engine for an e-commerce catalog:
//! an unbounded-depth category hierarchy where each top-level category is
//! persisted as a single aggregate document with its entire subtree embedded.
//!
//! # Architecture
//!
//! - **Root Aggregate Storage**: One document per top-level category; every
//!   mutation below a root is a full-root read-modify-write (atomic per
//!   aggregate, with an optimistic version check on replace)
//! - **Sibling-Scoped Slugs**: Slug uniqueness holds within one sibling level
//!   only; different branches may reuse the same slug by design
//! - **Dual Path Representations**: A machine-facing slug path
//!   (`clothing/hood-wears/hoodies`) and a human-facing display path
//!   (`Clothing > Hood Wears > Hoodies`) with a documented round-trip
//!   contract
//!
//! # Modules
//!
//! - [`models`] - Data structures (`CategoryNode`, patches, clock)
//! - [`tree`] - Pure tree algorithms (locate, mutate, sibling uniqueness)
//! - [`utils`] - Path codec and slug derivation
//! - [`db`] - Document store boundary and in-memory reference store
//! - [`services`] - `CategoryService` orchestration, errors, events

pub mod db;
pub mod models;
pub mod services;
pub mod tree;
pub mod utils;

// Re-export commonly used types
pub use models::{CategoryNode, CategoryPatch};
pub use services::{CategoryService, CategoryServiceError, CreateCategoryParams};
