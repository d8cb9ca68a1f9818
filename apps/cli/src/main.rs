//! Corona theme build CLI.
//!
//! Concatenates the theme's CSS fragments into `theme.css` and optionally
//! copies the result into an Obsidian vault.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
