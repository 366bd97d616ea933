//! `cruller brew`: print one asset.

use std::io::{Write, stdout};

use anyhow::{Result, bail};

use crate::{config::Config, debug};

/// Brew `name` and write the output to stdout.
pub fn brew_one(config: &Config, name: &str) -> Result<()> {
    let brewer = super::open_brewer(config);

    match brewer.brew(name)? {
        Some(output) => {
            debug!("brew"; "{}: {} bytes", name, output.len());
            let mut out = stdout().lock();
            out.write_all(&output)?;
            out.flush()?;
            Ok(())
        }
        None => bail!(
            "no source or cached output for `{name}` (compile = {})",
            brewer.settings().compile
        ),
    }
}
