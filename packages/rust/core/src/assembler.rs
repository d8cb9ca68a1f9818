//! Theme style sheet assembler.
//!
//! Reads the fragments in list order, joins them behind the header and the
//! font imports, then writes the combined style sheet to disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use corona_shared::{BuildOptions, CoronaError, Result};

use crate::pipeline::BuildReporter;

/// Output from a successful assembly.
#[derive(Debug, Clone)]
pub struct AssembleResult {
    /// Path the style sheet was written to.
    pub output_path: PathBuf,
    /// Size of the written style sheet in bytes.
    pub bytes: usize,
    /// Fragments that were read, in output order.
    pub included: Vec<String>,
    /// Fragments that were absent and skipped.
    pub skipped: Vec<String>,
}

/// Fragment contents collected from the source directory.
#[derive(Debug, Default)]
pub struct FragmentSet {
    /// `(name, content)` for every fragment found, in list order.
    pub found: Vec<(String, String)>,
    /// Names of fragments that do not exist.
    pub missing: Vec<String>,
}

/// Build the theme: read fragments, assemble, write `output_path`.
///
/// A missing fragment is reported and skipped unless `strict` is set, in
/// which case every missing name is collected and nothing is written.
/// Any other read or write failure aborts the build.
#[instrument(skip_all, fields(source = %opts.source_dir.display(), fragments = opts.fragments.len()))]
pub fn build(opts: &BuildOptions, reporter: &dyn BuildReporter) -> Result<AssembleResult> {
    let set = read_fragments(&opts.source_dir, &opts.fragments, reporter)?;

    if opts.strict && !set.missing.is_empty() {
        return Err(CoronaError::MissingFragments { names: set.missing });
    }

    let contents: Vec<&str> = set.found.iter().map(|(_, c)| c.as_str()).collect();
    let css = assemble_parts(&opts.header, &opts.font_imports, &contents);

    std::fs::write(&opts.output_path, &css)
        .map_err(|e| CoronaError::io(&opts.output_path, e))?;

    info!(
        path = %opts.output_path.display(),
        bytes = css.len(),
        skipped = set.missing.len(),
        "theme written"
    );
    reporter.built(&opts.output_path, css.len());

    Ok(AssembleResult {
        output_path: opts.output_path.clone(),
        bytes: css.len(),
        included: set.found.into_iter().map(|(name, _)| name).collect(),
        skipped: set.missing,
    })
}

/// Read each fragment from `source_dir`, strictly in list order.
///
/// Absent files are reported through `reporter` and recorded in
/// [`FragmentSet::missing`]. Invalid UTF-8 is replaced with U+FFFD; any
/// other read failure is an error.
pub fn read_fragments(
    source_dir: &Path,
    names: &[String],
    reporter: &dyn BuildReporter,
) -> Result<FragmentSet> {
    let mut set = FragmentSet::default();

    for name in names {
        let path = source_dir.join(name);
        match std::fs::read(&path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes).into_owned();
                debug!(fragment = %name, bytes = content.len(), "read fragment");
                set.found.push((name.clone(), content));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(fragment = %name, "fragment not found, skipping");
                reporter.fragment_missing(name);
                set.missing.push(name.clone());
            }
            Err(e) => return Err(CoronaError::io(path, e)),
        }
    }

    Ok(set)
}

/// Join header, blank line, font imports, blank line and fragment contents
/// with `\n`. Fragment text is emitted untouched.
pub fn assemble_parts<S: AsRef<str>>(header: &str, font_imports: &[S], fragments: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(font_imports.len() + fragments.len() + 3);
    parts.push(header);
    parts.push("");
    parts.extend(font_imports.iter().map(|s| s.as_ref()));
    parts.push("");
    parts.extend_from_slice(fragments);
    parts.join("\n")
}
