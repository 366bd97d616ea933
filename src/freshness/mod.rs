//! Freshness detection: decide whether a cached output can be reused.
//!
//! Sources and outputs are compared by modification time. The comparison
//! is gated by a [`CompileMode`] chosen in configuration.

mod mode;
pub mod mtime;
mod policy;

pub use mode::{CompileMode, UnknownMode};
pub use mtime::Stamp;
pub use policy::{Decision, decide};
