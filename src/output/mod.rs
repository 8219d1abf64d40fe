// src/output/mod.rs
//! Output planning and execution.
//!
//! Path derivation and plan construction are pure; [`writer`] is the only
//! place where filesystem I/O occurs.

mod paths;
mod types;
mod writer;

pub use paths::*;
pub use types::*;
pub use writer::*;
