//! Compile policy modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// When to run the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompileMode {
    /// Recompile on every request that has a source.
    Always,
    /// Recompile when the cache is missing or older than the source.
    #[default]
    Auto,
    /// Only ever serve what is already in the destination directory.
    Never,
}

impl CompileMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Auto => "auto",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for CompileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized mode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown compile mode `{0}` (expected always, auto or never)")]
pub struct UnknownMode(pub String);

impl FromStr for CompileMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}
