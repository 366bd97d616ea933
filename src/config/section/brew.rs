//! `[brew]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [brew]
//! source = "coffeescripts"      # CoffeeScript sources
//! destination = "javascripts"   # Compiled output (the cache)
//! path = "/javascripts"         # URL prefix served by the middleware
//! compile = "auto"              # always | auto | never
//! compiler = ["coffee", "--stdio", "--print"]
//! ```
//!
//! Keep `destination` out of any directory your web server serves blindly,
//! or the cached copy will shadow recompilation in development.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compiler::DEFAULT_COMMAND;
use crate::config::ConfigError;
use crate::freshness::CompileMode;

/// URL prefix used when none is configured.
pub const DEFAULT_URL_PREFIX: &str = "/javascripts";

/// Raw brewing options, as written in config or passed to
/// [`Brewer::reconfigure`](crate::Brewer::reconfigure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrewOptions {
    /// Directory holding `.coffee` sources.
    pub source: PathBuf,

    /// Directory receiving compiled `.js` files.
    pub destination: PathBuf,

    /// URL prefix; a leading `/` is added if missing.
    pub path: String,

    /// Compile policy. Unset means `auto`, or `never` without a compiler.
    pub compile: Option<CompileMode>,

    /// Compiler command: reads source on stdin, writes output to stdout.
    pub compiler: Vec<String>,
}

impl Default for BrewOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from("coffeescripts"),
            destination: PathBuf::from("javascripts"),
            path: DEFAULT_URL_PREFIX.to_string(),
            compile: None,
            compiler: DEFAULT_COMMAND.iter().map(ToString::to_string).collect(),
        }
    }
}

impl BrewOptions {
    /// Set the compile mode from its textual form.
    pub fn set_compile_str(&mut self, mode: &str) -> Result<(), ConfigError> {
        self.compile = Some(mode.parse()?);
        Ok(())
    }

    /// Resolve relative roots against `root`.
    pub fn normalize(&mut self, root: &Path) {
        self.source = root.join(&self.source);
        self.destination = root.join(&self.destination);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compiler.first().is_none_or(|c| c.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "[brew] compiler must name a command".into(),
            ));
        }
        if self.path.contains("..") {
            return Err(ConfigError::Validation(format!(
                "[brew] path `{}` must not contain `..`",
                self.path
            )));
        }
        Ok(())
    }

    /// Produce the effective settings.
    ///
    /// Without a compiler the mode is always `Never`.
    pub fn resolve(&self, compiler_available: bool) -> BrewSettings {
        let compile = if compiler_available {
            self.compile.unwrap_or_default()
        } else {
            CompileMode::Never
        };

        BrewSettings {
            source: self.source.clone(),
            destination: self.destination.clone(),
            url_prefix: normalize_prefix(&self.path),
            compile,
        }
    }
}

/// Effective settings a brewer runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrewSettings {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Always starts with `/`.
    pub url_prefix: String,
    pub compile: CompileMode,
}

fn normalize_prefix(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
