//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Cruller: brew CoffeeScript into cached JavaScript
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: cruller.toml)
    #[arg(short = 'C', long, global = true, default_value = "cruller.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// CoffeeScript source directory
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Compiled JavaScript directory
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub destination: Option<PathBuf>,

    /// When to compile: always, auto (by modification time) or never
    #[arg(long, global = true, value_name = "MODE")]
    pub compile: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the compiled output for one asset
    #[command(visible_alias = "b")]
    Brew {
        /// Asset name, with or without `.coffee`/`.js`
        name: String,
    },

    /// Compile every source into the destination directory
    Build,

    /// Serve compiled assets over HTTP
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// URL prefix for compiled assets
        #[arg(long)]
        path: Option<String>,

        /// Directory of static files served for everything else
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        root: Option<PathBuf>,

        /// Hand missing assets to the static file handler instead of 404
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        fall_through: Option<bool>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_brew() {
        let cli = Cli::parse_from(["cruller", "-v", "brew", "app.coffee"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Brew { ref name } if name == "app.coffee"));
        assert_eq!(cli.config, PathBuf::from("cruller.toml"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cruller", "build", "--compile", "never", "-d", "out"]);
        assert_eq!(cli.compile.as_deref(), Some("never"));
        assert_eq!(cli.destination, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_fall_through_flag() {
        let cli = Cli::parse_from(["cruller", "serve", "--fall-through"]);
        assert!(matches!(
            cli.command,
            Commands::Serve { fall_through: Some(true), .. }
        ));
    }
}
