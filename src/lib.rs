//! Cachebust - content-hash fingerprinting for static assets
//!
//! Renames assets to include a digest of their content and rewrites the
//! references to them in HTML, CSS and templates so browsers fetch new
//! files whenever the content changes.

pub mod bust;
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod ui;

pub use error::{CachebustError, CachebustResult};
