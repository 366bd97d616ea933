//! Configuration management for `cruller.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [brew] and [serve]
//! ├── error          # ConfigError
//! ├── util           # config file discovery
//! └── mod.rs         # Config (this file)
//! ```
//!
//! The config file is optional: without one every section takes its
//! defaults and relative paths resolve against the current directory.

mod error;
pub mod section;
mod util;

pub use crate::freshness::CompileMode;
pub use error::ConfigError;
pub use section::{BrewOptions, BrewSettings, ServeConfig};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::Path,
};
use util::find_config_file;

/// Root configuration structure representing cruller.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Brewing settings
    #[serde(default)]
    pub brew: BrewOptions,

    /// HTTP host settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl Config {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file, applies CLI overrides,
    /// then resolves paths against the config file's directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cwd, &cli.config);

        let mut config = match &config_path {
            Some(path) => {
                crate::debug!("config"; "using {}", path.display());
                Self::from_path(path)?
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", cli.config.display());
                Self::default()
            }
        };

        let root = config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or(cwd, Path::to_path_buf);

        config.apply_cli(cli)?;
        config.finalize(&root);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "ignoring unknown fields in {}: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply global and command-specific CLI overrides.
    fn apply_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.brew.source, cli.source.as_ref());
        Self::update_option(&mut self.brew.destination, cli.destination.as_ref());
        if let Some(mode) = &cli.compile {
            self.brew.set_compile_str(mode)?;
        }

        if let Commands::Serve {
            interface,
            port,
            path,
            root,
            fall_through,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.brew.path, path.as_ref());
            Self::update_option(&mut self.serve.root, root.as_ref());
            Self::update_option(&mut self.serve.fall_through, fall_through.as_ref());
        }
        Ok(())
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve relative paths against `root`.
    fn finalize(&mut self, root: &Path) {
        self.brew.normalize(root);
        self.serve.normalize(root);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.brew.validate()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (parsed, ignored) = Config::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
