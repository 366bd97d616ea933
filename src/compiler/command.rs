//! Compiler backed by an external command.

use std::path::PathBuf;

use super::{CompileError, Compiler};
use crate::utils::exec::Cmd;

/// Default invocation: read CoffeeScript on stdin, print JavaScript.
pub const DEFAULT_COMMAND: [&str; 3] = ["coffee", "--stdio", "--print"];

/// Pipes source through `program args...` and returns its stdout.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandCompiler {
    /// Resolve `command[0]` on `PATH`.
    ///
    /// Returns `None` when the command is empty or the executable can't be
    /// found, which callers treat as "no compiler available".
    pub fn detect<S: AsRef<str>>(command: &[S]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        let program = which::which(program.as_ref()).ok()?;
        Some(Self {
            program,
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
        })
    }

    pub fn program(&self) -> &std::path::Path {
        &self.program
    }
}

impl Compiler for CommandCompiler {
    fn compile(&self, source: &str) -> Result<String, CompileError> {
        let output = Cmd::new(&self.program)
            .args(&self.args)
            .stdin(source)
            .run()?;
        String::from_utf8(output.stdout).map_err(CompileError::InvalidOutput)
    }
}
