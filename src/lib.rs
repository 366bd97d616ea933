//! Cruller - brew CoffeeScript into cached JavaScript and serve it over HTTP.
//!
//! ```text
//! request ─► router::Middleware ─► brew::Brewer ─► freshness::decide
//!                   │                    │                 │
//!                   ▼                    ▼                 ▼
//!             downstream          compiler::Compiler   cache::CacheStore
//! ```

pub mod asset;
pub mod brew;
pub mod cache;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod freshness;
pub mod logger;
pub mod router;
pub mod utils;

pub use asset::AssetName;
pub use brew::{BrewError, Brewer, BuildReport};
pub use compiler::{CommandCompiler, CompileError, Compiler};
pub use config::{BrewOptions, BrewSettings, CompileMode};
pub use router::{Handler, Middleware, Request, Response};
