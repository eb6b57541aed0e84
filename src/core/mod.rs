//! Header verification core.
//!
//! Template, normalization, discovery, matching and reporting. The CLI in
//! the crate root only wires these together.

pub mod check;
pub mod config;
pub mod discover;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod report;
pub mod template;
