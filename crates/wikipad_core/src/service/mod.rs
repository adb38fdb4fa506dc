//! Use-case layer over the page store and editor binding.
//!
//! # Responsibility
//! - Project the flat page list into tree-view rows.
//! - Orchestrate page selection, title edits and editor events for a UI.

pub mod tree_view;
pub mod wiki_session;
