//! Filesystem effects used by the engine
//!
//! The engine never touches `std::fs` directly. Every read, write, copy and
//! delete goes through [`AssetFs`], so a run can be pointed at the real
//! disk ([`LocalFs`]), made read-only ([`DryRunFs`]), or tested in memory.

use crate::error::{CachebustError, CachebustResult};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Filesystem interface the engine depends on
pub trait AssetFs: Send + Sync {
    /// Read raw bytes
    fn read_bytes(&self, path: &Path) -> CachebustResult<Vec<u8>>;

    /// Read a UTF-8 text file
    fn read_text(&self, path: &Path) -> CachebustResult<String>;

    /// Write a text file, creating parent directories as needed
    fn write_text(&self, path: &Path, contents: &str) -> CachebustResult<()>;

    /// Copy a file, creating parent directories of `to` as needed
    fn copy_file(&self, from: &Path, to: &Path) -> CachebustResult<()>;

    /// Force-delete a file; a missing file is not an error
    fn remove_file(&self, path: &Path) -> CachebustResult<()>;

    /// Recursively delete a directory; a missing directory is not an error
    fn remove_dir_all(&self, path: &Path) -> CachebustResult<()>;

    /// Whether a file exists at `path`
    fn exists(&self, path: &Path) -> bool;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    fn ensure_parent(path: &Path) -> CachebustResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CachebustError::io(format!("creating directory {}", parent.display()), e)
            })?;
        }
        Ok(())
    }
}

impl AssetFs for LocalFs {
    fn read_bytes(&self, path: &Path) -> CachebustResult<Vec<u8>> {
        fs::read(path).map_err(|e| CachebustError::io(format!("reading {}", path.display()), e))
    }

    fn read_text(&self, path: &Path) -> CachebustResult<String> {
        fs::read_to_string(path)
            .map_err(|e| CachebustError::io(format!("reading {}", path.display()), e))
    }

    fn write_text(&self, path: &Path, contents: &str) -> CachebustResult<()> {
        Self::ensure_parent(path)?;
        fs::write(path, contents)
            .map_err(|e| CachebustError::io(format!("writing {}", path.display()), e))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> CachebustResult<()> {
        Self::ensure_parent(to)?;
        fs::copy(from, to).map_err(|e| {
            CachebustError::io(
                format!("copying {} to {}", from.display(), to.display()),
                e,
            )
        })?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> CachebustResult<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(CachebustError::io(
                format!("deleting {}", path.display()),
                e,
            )),
            _ => Ok(()),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> CachebustResult<()> {
        match fs::remove_dir_all(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(CachebustError::io(
                format!("removing directory {}", path.display()),
                e,
            )),
            _ => Ok(()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Read-only wrapper: reads go through, mutations are logged and skipped
pub struct DryRunFs<'a> {
    inner: &'a dyn AssetFs,
}

impl<'a> DryRunFs<'a> {
    pub fn new(inner: &'a dyn AssetFs) -> Self {
        Self { inner }
    }
}

impl AssetFs for DryRunFs<'_> {
    fn read_bytes(&self, path: &Path) -> CachebustResult<Vec<u8>> {
        self.inner.read_bytes(path)
    }

    fn read_text(&self, path: &Path) -> CachebustResult<String> {
        self.inner.read_text(path)
    }

    fn write_text(&self, path: &Path, _contents: &str) -> CachebustResult<()> {
        info!("[dry-run] would write {}", path.display());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> CachebustResult<()> {
        info!("[dry-run] would copy {} to {}", from.display(), to.display());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> CachebustResult<()> {
        info!("[dry-run] would delete {}", path.display());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> CachebustResult<()> {
        info!("[dry-run] would remove directory {}", path.display());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryFs;

#[cfg(test)]
mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// In-memory filesystem for engine tests
    #[derive(Debug, Default)]
    pub(crate) struct MemoryFs {
        files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    }

    impl MemoryFs {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
            self.put(path, contents);
            self
        }

        pub(crate) fn put(&self, path: impl AsRef<Path>, contents: &str) {
            self.files
                .lock()
                .unwrap()
                .insert(path.as_ref().to_path_buf(), contents.as_bytes().to_vec());
        }

        pub(crate) fn text(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files
                .lock()
                .unwrap()
                .get(path.as_ref())
                .map(|b| String::from_utf8_lossy(b).into_owned())
        }

        pub(crate) fn paths(&self) -> Vec<PathBuf> {
            self.files.lock().unwrap().keys().cloned().collect()
        }

        fn missing(path: &Path) -> CachebustError {
            CachebustError::io(
                format!("reading {}", path.display()),
                io::Error::new(io::ErrorKind::NotFound, "no such file"),
            )
        }
    }

    impl AssetFs for MemoryFs {
        fn read_bytes(&self, path: &Path) -> CachebustResult<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| Self::missing(path))
        }

        fn read_text(&self, path: &Path) -> CachebustResult<String> {
            let bytes = self.read_bytes(path)?;
            String::from_utf8(bytes).map_err(|e| {
                CachebustError::io(
                    format!("reading {}", path.display()),
                    io::Error::new(io::ErrorKind::InvalidData, e),
                )
            })
        }

        fn write_text(&self, path: &Path, contents: &str) -> CachebustResult<()> {
            self.put(path, contents);
            Ok(())
        }

        fn copy_file(&self, from: &Path, to: &Path) -> CachebustResult<()> {
            let bytes = self.read_bytes(from)?;
            self.files.lock().unwrap().insert(to.to_path_buf(), bytes);
            Ok(())
        }

        fn remove_file(&self, path: &Path) -> CachebustResult<()> {
            self.files.lock().unwrap().remove(path);
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> CachebustResult<()> {
            self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }
}
