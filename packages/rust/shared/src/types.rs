//! Core domain types and reference theme contents.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Reference theme contents
// ---------------------------------------------------------------------------

/// Comment placed on the first line of every built style sheet.
pub const THEME_HEADER: &str = "/* Corona Theme — Built output. Do not edit directly. */";

/// Fragments in concatenation order.
///
/// Later fragments consume custom properties declared by earlier ones
/// (palette before colour decisions, colour decisions before components),
/// so this order must be kept by hand when files are added.
pub const DEFAULT_FRAGMENTS: &[&str] = &[
    "variables.css",
    "color-choices.css",
    "color-decisions-light.css",
    "color-decisions-dark.css",
    "typography.css",
    "editor.css",
    "sidebar.css",
    "tabs.css",
    "status-bar.css",
    "modals.css",
    "search.css",
    "elements.css",
    "graph.css",
    "scrollbar.css",
    "caret.css",
];

/// Font imports placed between the header and the first fragment.
pub const DEFAULT_FONT_IMPORTS: &[&str] = &[
    "@import url('https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700;800&display=swap');",
    "@import url('https://fonts.googleapis.com/css2?family=Source+Code+Pro:wght@300;400;500;600;700&display=swap');",
    "@import url('https://fonts.googleapis.com/css2?family=Playfair+Display:ital,wght@0,400..900;1,400..900&display=swap');",
];

/// File name of the theme inside the destination directory.
pub const DEST_THEME_FILE: &str = "theme.css";

/// File name of the manifest inside the destination directory.
pub const DEST_MANIFEST_FILE: &str = "manifest.json";

// ---------------------------------------------------------------------------
// Build report
// ---------------------------------------------------------------------------

/// What happened to the optional copy into the destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Neither `--copy` nor the lifecycle signal was present.
    NotRequested,
    /// Theme and manifest were both copied into `dir`.
    Copied { dir: PathBuf },
    /// The copy was attempted and failed; the build itself still succeeded.
    Failed { reason: String },
}

/// Outcome of one build invocation.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Path the combined style sheet was written to.
    pub output_path: PathBuf,
    /// Size of the written style sheet in bytes.
    pub bytes: usize,
    /// Fragments that were read, in output order.
    pub included: Vec<String>,
    /// Fragments that were absent and skipped.
    pub skipped: Vec<String>,
    /// Result of the optional copy step.
    pub mirror: MirrorOutcome,
}

/// Format a byte count as kilobytes with one decimal place (`12.3`).
/// Ties round up.
pub fn format_kb(bytes: usize) -> String {
    let tenths = (bytes * 10 + 512) / 1024;
    format!("{}.{}", tenths / 10, tenths % 10)
}
