//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use corona_core::mirror::should_mirror;
use corona_core::pipeline::{BuildReporter, run_build};
use corona_shared::{
    BuildOptions, CONFIG_FILE_NAME, ThemeConfig, format_kb, init_config, load_config,
    load_config_from,
};
use tracing::debug;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Build the Corona theme from its CSS fragments.
#[derive(Parser)]
#[command(
    name = "corona-build",
    version,
    about = "Concatenate the Corona CSS fragments into theme.css.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root; relative config paths resolve against it.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (defaults to <root>/corona.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Copy theme.css and manifest.json into the destination directory.
    #[arg(long)]
    pub copy: bool,

    /// Destination directory, overriding `destination_directory`.
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Fail if any fragment is missing instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Script name set by the package runner; `build` implies --copy.
    #[arg(long, env = "npm_lifecycle_event", hide = true)]
    pub lifecycle_event: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Subcommands. Without one, the theme is built.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a corona.toml with the default fragment list.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Operator messages go through [`ConsoleReporter`], so diagnostics stay
/// quiet unless asked for.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "corona=error",
        1 => "corona=info",
        2 => "corona=debug",
        _ => "corona=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let root = project_root(&cli)?;

    match &cli.command {
        None => cmd_build(&cli, &root),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(&root),
            ConfigAction::Show => cmd_config_show(&cli, &root),
        },
    }
}

/// `--root`, else the directory holding `--config`, else the working directory.
fn project_root(cli: &Cli) -> Result<PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(root.clone());
    }

    let config_dir = cli
        .config
        .as_deref()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = config_dir {
        return Ok(dir.to_path_buf());
    }

    std::env::current_dir().map_err(|e| eyre!("cannot determine working directory: {e}"))
}

fn load(cli: &Cli, root: &Path) -> Result<ThemeConfig> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(root)?,
    };
    Ok(config)
}

fn cmd_build(cli: &Cli, root: &Path) -> Result<()> {
    let config = load(cli, root)?;
    let mut opts = BuildOptions::resolve(&config, root)?;

    if let Some(dest) = &cli.dest {
        opts.destination_dir = Some(dest.clone());
    }
    opts.strict |= cli.strict;
    opts.copy = should_mirror(cli.copy, cli.lifecycle_event.as_deref());

    debug!(
        root = %root.display(),
        copy = opts.copy,
        strict = opts.strict,
        "building theme"
    );

    run_build(&opts, &ConsoleReporter)?;
    Ok(())
}

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(cli: &Cli, root: &Path) -> Result<()> {
    let config = load(cli, root)?;
    let source = cli
        .config
        .clone()
        .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
    println!("# {}", source.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Console reporter
// ---------------------------------------------------------------------------

/// Prints build progress the way the theme's authors expect to read it.
struct ConsoleReporter;

impl BuildReporter for ConsoleReporter {
    fn fragment_missing(&self, name: &str) {
        eprintln!("  warning: {name} not found, skipping");
    }

    fn built(&self, path: &Path, bytes: usize) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("  built → {name} ({} KB)", format_kb(bytes));
    }

    fn copied(&self, dir: &Path) {
        println!("  copied → {}/", dir.display());
    }

    fn copy_failed(&self, reason: &str) {
        eprintln!("  warning: could not copy to vault — {reason}");
    }
}
