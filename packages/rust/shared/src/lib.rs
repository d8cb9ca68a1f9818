//! Shared types, error model, and configuration for the Corona theme builder.
//!
//! This crate is the foundation depended on by the other workspace crates.
//! It provides:
//! - [`CoronaError`]: the unified error type
//! - Domain types ([`BuildReport`], [`MirrorOutcome`]) and the reference theme lists
//! - Configuration ([`ThemeConfig`], [`BuildOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    BuildOptions, CONFIG_FILE_NAME, ThemeConfig, config_file_path, expand_home, init_config,
    load_config, load_config_from,
};
pub use error::{CoronaError, Result};
pub use types::{
    BuildReport, DEFAULT_FONT_IMPORTS, DEFAULT_FRAGMENTS, DEST_MANIFEST_FILE, DEST_THEME_FILE,
    MirrorOutcome, THEME_HEADER, format_kb,
};
