//! Command-line interface module.

mod args;
pub mod brew;
pub mod build;
pub mod serve;

pub use args::{Cli, Commands};

use crate::{Brewer, CommandCompiler, config::Config, debug};

/// Build the brewer for a loaded configuration.
///
/// The compiler command is looked up on `PATH` once, here; if it's missing
/// the brewer runs in `never` mode for its whole lifetime.
pub fn open_brewer(config: &Config) -> Brewer<CommandCompiler> {
    let compiler = CommandCompiler::detect(&config.brew.compiler);
    if let Some(compiler) = &compiler {
        debug!("brew"; "using compiler {}", compiler.program().display());
    }
    Brewer::new(&config.brew, compiler)
}

/// Render an error and its sources as `outer: inner: root`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
