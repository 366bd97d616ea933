//! External command execution.
//!
//! Provides a Builder-based API for running a command with optional stdin
//! piping and capturing its output.
//!
//! # Examples
//!
//! ```ignore
//! use cruller::utils::exec::Cmd;
//!
//! let output = Cmd::new("coffee")
//!     .args(["--stdio", "--print"])
//!     .stdin(source)
//!     .run()?;
//! ```

use std::{
    ffi::{OsStr, OsString},
    io::{self, Write},
    process::{Command, ExitStatus, Output, Stdio},
    thread,
};

use thiserror::Error;

/// Failures while running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn `{0}`")]
    Spawn(String, #[source] io::Error),

    #[error("failed to wait for `{0}`")]
    Wait(String, #[source] io::Error),

    #[error("command `{program}` failed with {status}{}", format_stderr(.stderr))]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{stderr}")
    }
}

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Debug, Default, Clone)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    stdin_data: Option<Vec<u8>>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref();
        if !arg.is_empty() {
            self.args.push(arg.to_owned());
        }
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Set stdin data to pipe to the process.
    pub fn stdin<D: AsRef<[u8]>>(mut self, data: D) -> Self {
        self.stdin_data = Some(data.as_ref().to_vec());
        self
    }

    /// Get the program name for error messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Execute the command, failing on a non-zero exit status.
    pub fn run(self) -> Result<Output, ExecError> {
        let name = self.program_name();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(if self.stdin_data.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| ExecError::Spawn(name.clone(), e))?;

        // stdin is written while stdout drains, or a large input can block.
        let output = thread::scope(|scope| {
            if let (Some(mut stdin), Some(data)) = (child.stdin.take(), self.stdin_data.as_deref())
            {
                scope.spawn(move || {
                    // A child that exits early closes the pipe; its status reports why.
                    let _ = stdin.write_all(data);
                });
            }
            child.wait_with_output()
        })
        .map_err(|e| ExecError::Wait(name.clone(), e))?;

        if !output.status.success() {
            return Err(ExecError::Failed {
                program: name,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }
}

// ============================================================================
// Tests
// ============================================================================
