//! Logging utilities with colored output.
//!
//! # Example
//!
//! ```ignore
//! log!("brew"; "compiled {}", name);
//! debug!("fresh"; "{}: cache is newer than source", name);
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream};
use std::{
    io::{self, IsTerminal, Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
///
/// Goes to stderr, leaving stdout to command output such as `cruller brew`.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let err = stderr();
    let clear = err.is_terminal();
    write_line(&mut err.lock(), clear, &prefix, message).ok();
}

fn write_line(out: &mut impl Write, clear: bool, prefix: &str, message: &str) -> io::Result<()> {
    if clear {
        execute!(out, Clear(ClearType::UntilNewLine))?;
    }
    writeln!(out, "{prefix} {message}")?;
    out.flush()
}

/// Apply color to a module prefix based on module type
///
/// Honors `--color` through owo-colors' global override.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let paint = |text: &String| match module_lower {
        "serve" => text.bright_blue().bold().to_string(),
        "brew" | "build" => text.bright_green().bold().to_string(),
        "error" => text.bright_red().bold().to_string(),
        _ => text.bright_yellow().bold().to_string(),
    };
    prefix.if_supports_color(Stream::Stderr, paint).to_string()
}
