//! Rich-text editing surface and its binding to page content.
//!
//! # Responsibility
//! - Define the surface contract the binding drives (`EditSurface`).
//! - Route surface change events back into the page store.
//! - Build insertable content (images, tables) for the surface.
//!
//! # Invariants
//! - The binding never reads surface state; changes arrive as
//!   `ContentChange` events stamped with the page they belong to.
//! - Insertions never write to the store directly.

pub mod binding;
pub mod image;
pub mod surface;
pub mod table;
