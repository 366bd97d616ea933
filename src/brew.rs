//! Brewing: compile-or-reuse for a single asset.
//!
//! A [`Brewer`] owns its settings and an optional compiler. Settings live
//! behind an [`ArcSwap`] so a shared brewer can be reconfigured while
//! requests read a consistent snapshot; the last `reconfigure` wins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use rayon::prelude::*;
use thiserror::Error;

use crate::asset::{AssetName, AssetNameError, SOURCE_EXT};
use crate::cache::{CacheError, CacheStore};
use crate::compiler::{CompileError, Compiler};
use crate::config::{BrewOptions, BrewSettings, CompileMode};
use crate::freshness::{Decision, Stamp, decide};
use crate::{debug, log};

/// Brewing failures. A missing asset is not an error (`Ok(None)`).
#[derive(Debug, Error)]
pub enum BrewError {
    #[error("invalid asset name")]
    InvalidName(#[from] AssetNameError),

    #[error("failed to read source `{0}`")]
    Source(PathBuf, #[source] std::io::Error),

    #[error("failed to compile `{asset}`")]
    Compile {
        asset: String,
        #[source]
        source: CompileError,
    },

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Orchestrates freshness checks, the cache and the compiler.
pub struct Brewer<C> {
    settings: ArcSwap<BrewSettings>,
    compiler: Option<C>,
}

impl<C: Compiler> Brewer<C> {
    /// Build a brewer. `compiler: None` pins the mode to `never`.
    pub fn new(options: &BrewOptions, compiler: Option<C>) -> Self {
        if compiler.is_none() {
            log!("warning"; "no CoffeeScript compiler available, serving cached output only");
        }
        let settings = Self::resolve(options, compiler.is_some());
        Self {
            settings: ArcSwap::from_pointee(settings),
            compiler,
        }
    }

    /// Replace the settings. Takes effect for the next `brew` call.
    pub fn reconfigure(&self, options: &BrewOptions) {
        let settings = Self::resolve(options, self.compiler.is_some());
        self.settings.store(Arc::new(settings));
    }

    fn resolve(options: &BrewOptions, compiler_available: bool) -> BrewSettings {
        if !compiler_available && options.compile.is_some_and(|m| m != CompileMode::Never) {
            debug!("brew"; "compile = {:?} ignored without a compiler", options.compile);
        }
        options.resolve(compiler_available)
    }

    /// Current settings snapshot.
    pub fn settings(&self) -> Arc<BrewSettings> {
        self.settings.load_full()
    }

    /// Produce the current compiled output for `name`.
    ///
    /// `name` may carry a `.coffee` or `.js` extension. Returns `Ok(None)`
    /// when neither a source nor a cached output exists (or, in `never`
    /// mode, when there's no cached output).
    pub fn brew(&self, name: &str) -> Result<Option<Vec<u8>>, BrewError> {
        let name = AssetName::parse(name)?;
        let settings = self.settings.load();
        let store = CacheStore::new(&settings.destination);

        let source = name.source_path(&settings.source);
        let decision = decide(settings.compile, Stamp::of(&source), store.stamp(&name));
        debug!("brew"; "{name}: {decision:?} ({})", settings.compile);

        match decision {
            Decision::Missing => Ok(None),
            Decision::UseCache => store.read(&name).map(Some).map_err(Into::into),
            Decision::Recompile => self.recompile(&name, &source, &store).map(Some),
        }
    }

    fn recompile(
        &self,
        name: &AssetName,
        source: &Path,
        store: &CacheStore,
    ) -> Result<Vec<u8>, BrewError> {
        // `decide` never answers Recompile in never mode, which is forced
        // whenever the compiler is absent.
        let Some(compiler) = &self.compiler else {
            return store.read(name).map_err(Into::into);
        };

        let text = fs::read_to_string(source)
            .map_err(|err| BrewError::Source(source.to_path_buf(), err))?;
        let output = compiler
            .compile(&text)
            .map_err(|err| BrewError::Compile {
                asset: name.to_string(),
                source: err,
            })?;

        store.write(name, output.as_bytes())?;
        debug!("brew"; "compiled {} -> {}", name, store.entry_path(name).display());
        Ok(output.into_bytes())
    }

    /// Brew every `.coffee` file directly under the source root.
    ///
    /// Subdirectories are skipped; they aren't addressable by URL either.
    pub fn brew_all(&self) -> Result<BuildReport, BrewError> {
        let settings = self.settings();
        let entries = fs::read_dir(&settings.source)
            .map_err(|err| BrewError::Source(settings.source.clone(), err))?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == SOURCE_EXT))
            .filter_map(|path| Some(path.file_stem()?.to_str()?.to_string()))
            .collect();
        names.sort();

        let results: Vec<_> = names
            .into_par_iter()
            .map(|name| {
                let result = self.brew(&name);
                (name, result)
            })
            .collect();

        let mut report = BuildReport::default();
        for (name, result) in results {
            match result {
                Ok(Some(_)) => report.brewed.push(name),
                Ok(None) => report.skipped.push(name),
                Err(err) => report.failed.push((name, err)),
            }
        }
        Ok(report)
    }
}

/// Outcome of [`Brewer::brew_all`], sorted by asset name.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Assets with output available after the run.
    pub brewed: Vec<String>,
    /// Sources with no output (only possible in `never` mode).
    pub skipped: Vec<String>,
    pub failed: Vec<(String, BrewError)>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
