//! Mtime-based file stamps.

use std::path::Path;
use std::time::SystemTime;

/// Existence and modification time of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    /// No regular file at the path.
    Absent,
    /// File exists; `None` when the platform cannot report an mtime.
    Present(Option<SystemTime>),
}

impl Stamp {
    /// Stat a path. Directories and other non-files count as absent.
    pub fn of(path: &Path) -> Self {
        match path.metadata() {
            Ok(meta) if meta.is_file() => Self::Present(meta.modified().ok()),
            _ => Self::Absent,
        }
    }

    pub const fn exists(self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub const fn mtime(self) -> Option<SystemTime> {
        match self {
            Self::Present(time) => time,
            Self::Absent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_stamp_of_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Stamp::of(&dir.path().join("nope.js")), Stamp::Absent);
    }

    #[test]
    fn test_stamp_of_directory_is_absent() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Stamp::of(dir.path()), Stamp::Absent);
    }

    #[test]
    fn test_stamp_of_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.js");
        fs::write(&path, "x").unwrap();

        let stamp = Stamp::of(&path);
        assert!(stamp.exists());
        assert_eq!(stamp.mtime(), fs::metadata(&path).unwrap().modified().ok());
    }
}
