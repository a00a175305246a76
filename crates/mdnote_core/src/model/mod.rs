//! Domain model for the markdown editor.
//!
//! # Responsibility
//! - Define the data structures shared by repository, gateway and editor.
//!
//! # Invariants
//! - Every article is identified by a store-assigned `ArticleId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod article;
