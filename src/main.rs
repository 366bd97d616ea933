//! Cruller - brew CoffeeScript into cached JavaScript.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cruller::cli::{self, Cli, Commands};
use cruller::config::Config;

fn main() -> Result<()> {
    cli::serve::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Config::load(&cli)?;

    match &cli.command {
        Commands::Brew { name } => cli::brew::brew_one(&config, name),
        Commands::Build => cli::build::build_all(&config),
        Commands::Serve { .. } => cli::serve::serve(&config),
    }
}
