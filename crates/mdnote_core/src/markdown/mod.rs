//! Markdown preview pipeline.
//!
//! # Responsibility
//! - Parse markdown source into a tagged-variant tree ([`ast`]).
//! - Render the tree to HTML through a declarative class table ([`style`]).
//!
//! # Invariants
//! - The grammar is pulldown-cmark's CommonMark plus GFM tables,
//!   strikethrough and task lists; no custom syntax is added here.

pub mod ast;
mod parse;
mod render;
pub mod style;

pub use parse::parse;
pub use render::{escape_html, render_html, render_markdown, sanitize_url};
pub(crate) use render::class_attr;
