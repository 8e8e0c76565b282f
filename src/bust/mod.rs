//! Fingerprinting, naming and reference-rewrite engine
//!
//! Computes a content digest for each asset, derives a busted name that
//! embeds it, optionally materializes the renamed file, and rewrites
//! references inside consumer files so they point at the busted name.
//!
//! # Run order
//!
//! | Step | Component | Effect |
//! |------|-----------|--------|
//! | 1 | [`AssetMapBuilder`] | hash, name, copy/delete assets |
//! | 2 | [`cleanup`] | remove stale busted files from the previous run |
//! | 3 | [`MapStore`] | persist the new asset map |
//! | 4 | [`Rewriter`] | rewrite consumer files in place |
//!
//! Everything is synchronous and strictly ordered: assets are processed in
//! descending lexicographic order of their relative path, and rewrite rules
//! are applied in that same order so longer paths are rewritten before any
//! shorter path that is a substring of them.

mod builder;
pub mod cleanup;
mod digest;
mod fs;
mod map;
mod naming;
mod options;
mod persist;
mod pipeline;
mod rewrite;

pub use builder::AssetMapBuilder;
pub use digest::{Algorithm, Digester, Encoding};
pub use fs::{AssetFs, DryRunFs, LocalFs};
pub use map::AssetMap;
pub use naming::NameDeriver;
pub use options::BustOptions;
pub use persist::MapStore;
pub use pipeline::{BustReport, CacheBuster, CleanupOutcome};
pub use rewrite::{RewriteRule, Rewriter};

#[cfg(test)]
pub(crate) use fs::MemoryFs;
