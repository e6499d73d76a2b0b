//! Persistence Layer
//!
//! This module defines the boundary to the document store that holds root
//! aggregates:
//!
//! - [`DocumentStore`] - the five-operation adapter trait (get, ordered list,
//!   create, whole-document replace, delete)
//! - [`MemoryStore`] - in-memory reference implementation used by tests and
//!   embeddable as-is
//! - [`DocumentStoreError`] - adapter failure taxonomy, including optimistic
//!   concurrency conflicts
//!
//! The engine never issues partial or nested writes: a root aggregate and its
//! embedded subtree travel through this boundary as one document.

mod document_store;
mod error;
mod memory_store;

pub use document_store::{DocumentPage, DocumentStore, ListQuery, OrderDirection};
pub use error::DocumentStoreError;
pub use memory_store::MemoryStore;
