//! `cruller build`: precompile every source.
//!
//! Useful before deploying with `compile = "never"`: the destination is
//! filled once, and the server only ever reads it.

use anyhow::{Context, Result, bail};

use crate::{config::Config, log};

pub fn build_all(config: &Config) -> Result<()> {
    let brewer = super::open_brewer(config);
    let settings = brewer.settings();

    log!("build"; "{} -> {} (compile = {})",
        settings.source.display(), settings.destination.display(), settings.compile);

    let report = brewer
        .brew_all()
        .with_context(|| format!("Failed to scan {}", settings.source.display()))?;

    for name in &report.skipped {
        log!("build"; "skipped {} (no cached output)", name);
    }
    for (name, err) in &report.failed {
        log!("error"; "{}: {}", name, super::error_chain(err));
    }

    log!("build"; "{} brewed, {} skipped, {} failed",
        report.brewed.len(), report.skipped.len(), report.failed.len());

    if !report.is_success() {
        bail!("{} asset(s) failed to compile", report.failed.len());
    }
    Ok(())
}
