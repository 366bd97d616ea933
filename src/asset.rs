//! Logical asset names.
//!
//! An asset name is extension-agnostic: `app`, `app.coffee` and `app.js`
//! all refer to the same source/output pair.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Extension of CoffeeScript sources.
pub const SOURCE_EXT: &str = "coffee";

/// Extension of compiled JavaScript outputs.
pub const TARGET_EXT: &str = "js";

/// Reasons an asset name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetNameError {
    #[error("asset name is empty")]
    Empty,

    #[error("asset name `{0}` contains a parent-directory sequence")]
    Traversal(String),

    #[error("asset name `{0}` must be a relative path")]
    NotRelative(String),
}

/// A validated, extension-stripped asset name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetName(String);

impl AssetName {
    /// Parse a requested name, stripping one trailing `.coffee` or `.js`.
    pub fn parse(raw: &str) -> Result<Self, AssetNameError> {
        if raw.contains("..") {
            return Err(AssetNameError::Traversal(raw.to_string()));
        }

        let base = strip_known_ext(raw);
        if base.is_empty() {
            return Err(AssetNameError::Empty);
        }
        // Joined onto a root, so only plain segments may appear
        if !Path::new(base)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(AssetNameError::NotRelative(raw.to_string()));
        }

        Ok(Self(base.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `root/<name>.coffee`
    pub fn source_path(&self, root: &Path) -> PathBuf {
        root.join(format!("{}.{SOURCE_EXT}", self.0))
    }

    /// `root/<name>.js`
    pub fn target_path(&self, root: &Path) -> PathBuf {
        root.join(format!("{}.{TARGET_EXT}", self.0))
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn strip_known_ext(raw: &str) -> &str {
    [SOURCE_EXT, TARGET_EXT]
        .iter()
        .find_map(|ext| raw.strip_suffix(ext)?.strip_suffix('.'))
        .unwrap_or(raw)
}
