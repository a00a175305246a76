//! Core use-case services.
//!
//! # Responsibility
//! - Turn repository calls into the gateway API used by the editor and CLI.
//! - Keep the view layer decoupled from storage details.

pub mod article_service;
