//! Editor view: form state machine plus its page rendering.
//!
//! # Responsibility
//! - Model the create/edit/delete flow of the editor page ([`state`]).
//! - Render that state as one HTML page with a pluggable look ([`page`]).

pub mod page;
pub mod state;
