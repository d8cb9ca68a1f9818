//! Build configuration for the Corona theme.
//!
//! Project config lives at `<root>/corona.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoronaError, Result};
use crate::types::{DEFAULT_FONT_IMPORTS, DEFAULT_FRAGMENTS, THEME_HEADER};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "corona.toml";

// ---------------------------------------------------------------------------
// Config file (matching corona.toml schema)
// ---------------------------------------------------------------------------

/// Project config, deserialized from TOML. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Directory holding the fragments, relative to the project root.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Combined style sheet, relative to the project root.
    #[serde(default = "default_output")]
    pub output: String,

    /// Manifest copied next to the theme, relative to the project root.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Where `--copy` mirrors the build. `~/` expands to the home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_directory: Option<String>,

    /// Fail instead of skipping when a fragment is missing.
    #[serde(default)]
    pub strict: bool,

    /// First line of the built style sheet.
    #[serde(default = "default_header")]
    pub header: String,

    /// Fragments in concatenation order.
    #[serde(default = "default_fragments")]
    pub fragments: Vec<String>,

    /// `@import` lines placed before any fragment.
    #[serde(default = "default_font_imports")]
    pub font_imports: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output: default_output(),
            manifest: default_manifest(),
            destination_directory: None,
            strict: false,
            header: default_header(),
            fragments: default_fragments(),
            font_imports: default_font_imports(),
        }
    }
}

fn default_source_dir() -> String {
    "css".into()
}
fn default_output() -> String {
    "theme.css".into()
}
fn default_manifest() -> String {
    "manifest.json".into()
}
fn default_header() -> String {
    THEME_HEADER.into()
}
fn default_fragments() -> Vec<String> {
    DEFAULT_FRAGMENTS.iter().map(|s| s.to_string()).collect()
}
fn default_font_imports() -> Vec<String> {
    DEFAULT_FONT_IMPORTS.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Build options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime build configuration with every path resolved.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory the fragments are read from.
    pub source_dir: PathBuf,
    /// Combined style sheet.
    pub output_path: PathBuf,
    /// Manifest mirrored alongside the theme.
    pub manifest_path: PathBuf,
    /// Mirror target, if one is configured.
    pub destination_dir: Option<PathBuf>,
    /// Fail on missing fragments.
    pub strict: bool,
    /// Whether the copy step should run.
    pub copy: bool,
    /// Header comment.
    pub header: String,
    /// Fragments in concatenation order.
    pub fragments: Vec<String>,
    /// Font import lines.
    pub font_imports: Vec<String>,
}

impl BuildOptions {
    /// Resolve a config against a project root. Relative paths are joined
    /// onto `root`; `copy` starts out false.
    pub fn resolve(config: &ThemeConfig, root: &Path) -> Result<Self> {
        let destination_dir = config
            .destination_directory
            .as_deref()
            .map(expand_home)
            .transpose()?;

        Ok(Self {
            source_dir: root.join(&config.source_dir),
            output_path: root.join(&config.output),
            manifest_path: root.join(&config.manifest),
            destination_dir,
            strict: config.strict,
            copy: false,
            header: config.header.clone(),
            fragments: config.fragments.clone(),
            font_imports: config.font_imports.clone(),
        })
    }
}

/// Expand a leading `~/` (or a bare `~`) to the user's home directory.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(path)),
    };

    let home = dirs::home_dir()
        .ok_or_else(|| CoronaError::config("could not determine home directory"))?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file for a project root.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load `<root>/corona.toml`. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<ThemeConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(ThemeConfig::default());
    }

    load_config_from(&path)
}

/// Load the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<ThemeConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CoronaError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| CoronaError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default `corona.toml` into `root`. Refuses to overwrite.
/// Returns the path to the created file.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = config_file_path(root);
    if path.exists() {
        return Err(CoronaError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&ThemeConfig::default())
        .map_err(|e| CoronaError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CoronaError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
