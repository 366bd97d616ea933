//! Configuration section definitions.
//!
//! Each module corresponds to a section in `cruller.toml`:
//!
//! | Module  | TOML Section | Purpose                                 |
//! |---------|--------------|-----------------------------------------|
//! | `brew`  | `[brew]`     | Source/destination roots, compile mode  |
//! | `serve` | `[serve]`    | HTTP host for the middleware            |

mod brew;
mod serve;

pub use brew::{BrewOptions, BrewSettings, DEFAULT_URL_PREFIX};
pub use serve::ServeConfig;
