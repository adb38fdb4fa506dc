//! Wiki domain model.
//!
//! # Responsibility
//! - Define the page record shared by the store, the editor binding and the
//!   tree view.
//! - Define the tagged update requests accepted by the store.
//!
//! # Invariants
//! - Every page is identified by a stable `PageId`.
//! - Deletion is a hard remove; there are no tombstones.

pub mod page;
