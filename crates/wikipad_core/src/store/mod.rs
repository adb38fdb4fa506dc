//! In-memory page collection and its persisted record layout.
//!
//! # Responsibility
//! - Own the canonical page list and notify observers on mutation.
//! - Convert the page list to and from the JSON record layout.
//!
//! # Invariants
//! - Page ids are unique within one store.
//! - Referential integrity of `parent_id` is not enforced.

pub mod page_store;
pub mod snapshot;
