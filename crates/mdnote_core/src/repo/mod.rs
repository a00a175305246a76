//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the article data access contract.
//! - Isolate SQLite query details from the gateway.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod article_repo;
