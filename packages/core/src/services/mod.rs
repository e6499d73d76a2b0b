//! Business Services
//!
//! This module contains the orchestration layer of the catalog engine:
//!
//! - `CategoryService` - CRUD operations and category tree management
//! - `CategoryServiceError` - the error taxonomy exposed to callers
//! - `CategoryEvent` - domain events broadcast on committed changes
//!
//! Services coordinate between the pure tree algorithms and the document
//! store, enforcing the validate-before-persist and cache-after-write rules.

pub mod category_service;
pub mod error;
pub mod events;

pub use category_service::{
    CategoryOrderField, CategoryPage, CategoryService, CreateCategoryParams,
    ListCategoriesOptions,
};
pub use error::CategoryServiceError;
pub use events::CategoryEvent;
