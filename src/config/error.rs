//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::freshness::UnknownMode;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    InvalidMode(#[from] UnknownMode),

    #[error("Config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("cruller.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("cruller.toml"));

        let mode_err = ConfigError::from(UnknownMode("hourly".into()));
        assert!(format!("{mode_err}").contains("hourly"));
    }
}
