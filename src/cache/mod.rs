//! Flat-file cache of compiled outputs.
//!
//! Each asset maps to exactly one file, `destination/<name>.js`. The file's
//! mtime is the cache timestamp used by the freshness policy.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::asset::AssetName;
use crate::freshness::Stamp;

/// Cache I/O failures, tagged with the offending path.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read cache file `{0}`")]
    Read(PathBuf, #[source] io::Error),

    #[error("failed to write cache file `{0}`")]
    Write(PathBuf, #[source] io::Error),
}

/// Cache rooted at the destination directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute location of the cached output for `name`.
    pub fn entry_path(&self, name: &AssetName) -> PathBuf {
        name.target_path(&self.root)
    }

    pub fn stamp(&self, name: &AssetName) -> Stamp {
        Stamp::of(&self.entry_path(name))
    }

    /// Read cached output as raw bytes. Prebuilt files need not be UTF-8.
    pub fn read(&self, name: &AssetName) -> Result<Vec<u8>, CacheError> {
        let path = self.entry_path(name);
        fs::read(&path).map_err(|err| CacheError::Read(path, err))
    }

    /// Replace cached output with `content`.
    ///
    /// The write truncates any previous file; a crash mid-write can leave a
    /// partial file behind.
    pub fn write(&self, name: &AssetName, content: &[u8]) -> Result<(), CacheError> {
        let path = self.entry_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| CacheError::Write(path.clone(), err))?;
        }
        fs::write(&path, content).map_err(|err| CacheError::Write(path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn name(s: &str) -> AssetName {
        AssetName::parse(s).unwrap()
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());

        store.write(&name("app"), b"first").unwrap();
        store.write(&name("app"), b"2nd").unwrap();

        assert_eq!(store.read(&name("app.coffee")).unwrap(), b"2nd");
        assert!(store.stamp(&name("app")).exists());
    }

    #[test]
    fn test_write_creates_destination() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path().join("nested").join("out"));

        store.write(&name("app"), b"x").unwrap();
        assert!(dir.path().join("nested/out/app.js").is_file());
    }

    #[test]
    fn test_read_missing_reports_path() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());

        let err = store.read(&name("ghost")).unwrap_err();
        assert!(matches!(err, CacheError::Read(ref p, _) if p.ends_with("ghost.js")));
        assert_eq!(store.stamp(&name("ghost")), Stamp::Absent);
    }
}
