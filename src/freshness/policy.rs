//! The recompile-or-reuse decision.

use super::{CompileMode, Stamp};

/// Outcome of a freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the compiler and overwrite the cache.
    Recompile,
    /// Serve the cached output as-is.
    UseCache,
    /// Neither a usable source nor a cache exists.
    Missing,
}

/// Decide what to do with an asset given its source and cache stamps.
///
/// Rules are applied in order:
///
/// 1. `Never` serves the cache (or nothing) and never compiles.
/// 2. Without a source, serve the cache if there is one. This lets prebuilt
///    files such as vendored libraries live beside compiled output.
/// 3. `Always` recompiles.
/// 4. `Auto` recompiles when the cache is absent or older than the source.
///    An unreadable mtime on either side counts as stale.
pub fn decide(mode: CompileMode, source: Stamp, cache: Stamp) -> Decision {
    let cached = if cache.exists() {
        Decision::UseCache
    } else {
        Decision::Missing
    };

    if mode == CompileMode::Never || !source.exists() {
        return cached;
    }

    match mode {
        CompileMode::Always => Decision::Recompile,
        CompileMode::Auto => match (source.mtime(), cache) {
            (_, Stamp::Absent) => Decision::Recompile,
            (Some(src), Stamp::Present(Some(out))) if out >= src => Decision::UseCache,
            _ => Decision::Recompile,
        },
        CompileMode::Never => cached,
    }
}
