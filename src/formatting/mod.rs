// src/formatting/mod.rs
//! Document rendering — converts a post and its comment tree to markdown.
//!
//! Rendering is a pure function of its inputs; persistence is the
//! orchestrator's job, consuming the returned document.

mod document;
mod escape;

pub use document::compose_discussion_markdown;
pub use escape::escape_markdown;
