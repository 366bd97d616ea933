//! Source-to-target compilers.
//!
//! The brewer only needs a [`Compiler`]; [`CommandCompiler`] is the stock
//! implementation that shells out to the `coffee` executable.

mod command;

pub use command::{CommandCompiler, DEFAULT_COMMAND};

use thiserror::Error;

use crate::utils::exec::ExecError;

/// Compilation failures.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The compiler ran and rejected the source (syntax error etc).
    #[error("compilation failed: {0}")]
    Rejected(String),

    /// The compiler could not be run at all.
    #[error(transparent)]
    Exec(ExecError),

    #[error("compiler produced non UTF-8 output")]
    InvalidOutput(#[source] std::string::FromUtf8Error),
}

impl From<ExecError> for CompileError {
    fn from(err: ExecError) -> Self {
        match err {
            ExecError::Failed { stderr, .. } if !stderr.is_empty() => Self::Rejected(stderr),
            other => Self::Exec(other),
        }
    }
}

/// Turns source text into compiled output.
///
/// Implementations must be deterministic enough that concurrent
/// recompilation of the same source writes the same bytes.
pub trait Compiler: Send + Sync {
    fn compile(&self, source: &str) -> Result<String, CompileError>;
}

impl<C: Compiler + ?Sized> Compiler for Box<C> {
    fn compile(&self, source: &str) -> Result<String, CompileError> {
        (**self).compile(source)
    }
}
