//! Engine options
//!
//! Stored under `[options]` in `.cachebust.toml`.

use super::naming::normalize_dir;
use crate::error::{CachebustError, CachebustResult};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Options controlling hashing, naming and side effects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BustOptions {
    /// Digest algorithm (md5, sha1, sha256, sha512, blake3)
    pub algorithm: String,

    /// Root that asset paths and the side file are relative to
    pub base_dir: PathBuf,

    /// Write a copy of each asset at its busted path
    pub create_copies: bool,

    /// Force-delete each original after copying
    pub delete_originals: bool,

    /// Remove busted files produced by the previous run but not this one
    pub delete_old_hash_files: bool,

    /// Encoding of string input to the digest
    pub encoding: String,

    /// Persist the asset map to the side file
    pub json_output: bool,

    /// Side file path, relative to `base_dir`
    pub json_output_filename: PathBuf,

    /// Number of hex characters kept from the digest
    pub length: usize,

    /// Inserted between the stem and the digest
    pub separator: String,

    /// Append `?digest` instead of renaming
    pub query_string: bool,

    /// Relocate busted files into this directory (empty = in place)
    pub output_dir: String,

    /// Remove `output_dir` before processing
    pub clear_output_dir: bool,

    /// Fixed value used instead of a computed digest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl Default for BustOptions {
    fn default() -> Self {
        Self {
            algorithm: "md5".to_string(),
            base_dir: PathBuf::from("./"),
            create_copies: true,
            delete_originals: false,
            delete_old_hash_files: false,
            encoding: "utf8".to_string(),
            json_output: false,
            json_output_filename: PathBuf::from("cachebust.json"),
            length: 16,
            separator: ".".to_string(),
            query_string: false,
            output_dir: String::new(),
            clear_output_dir: false,
            hash: None,
        }
    }
}

impl BustOptions {
    /// Location of the persisted asset map
    pub fn map_path(&self) -> PathBuf {
        self.base_dir.join(&self.json_output_filename)
    }

    /// `<base_dir>/<output_dir>`, or `None` when busted files stay in place
    pub fn output_dir_path(&self) -> Option<PathBuf> {
        let dir = normalize_dir(&self.output_dir);
        (!dir.is_empty()).then(|| self.base_dir.join(dir))
    }

    /// Directory removed by `clear_output_dir`, if any
    ///
    /// Fails unless the output directory lies strictly inside `base_dir`.
    pub fn clearable_output_dir(&self) -> CachebustResult<Option<PathBuf>> {
        let Some(dir) = self.output_dir_path() else {
            return Ok(None);
        };
        let base = lexical(&self.base_dir);
        let inside = lexical(&dir).strip_prefix(&base).is_ok_and(|rest| {
            rest.components().next().is_some()
                && rest.components().all(|c| matches!(c, Component::Normal(_)))
        });
        if inside {
            Ok(Some(dir))
        } else {
            Err(CachebustError::UnsafeOutputDir(dir))
        }
    }
}

/// Resolve `.` and `..` without touching the filesystem
fn lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}
