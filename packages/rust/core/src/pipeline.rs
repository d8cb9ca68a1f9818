//! End-to-end build: fragments → theme.css → optional copy.

use std::path::Path;

use tracing::{info, instrument};

use corona_shared::{BuildOptions, BuildReport, Result};

use crate::{assembler, mirror};

/// Receives operator-facing events while a build runs.
pub trait BuildReporter {
    /// A fragment in the list does not exist and was skipped.
    fn fragment_missing(&self, name: &str);
    /// The theme was written.
    fn built(&self, path: &Path, bytes: usize);
    /// Theme and manifest were copied into `dir`.
    fn copied(&self, dir: &Path);
    /// The copy step failed with `reason`.
    fn copy_failed(&self, reason: &str);
}

/// No-op reporter for headless/test usage.
pub struct SilentReporter;

impl BuildReporter for SilentReporter {
    fn fragment_missing(&self, _name: &str) {}
    fn built(&self, _path: &Path, _bytes: usize) {}
    fn copied(&self, _dir: &Path) {}
    fn copy_failed(&self, _reason: &str) {}
}

/// Run the full build.
///
/// 1. Read fragments in order, skipping missing ones
/// 2. Write the combined style sheet
/// 3. Copy theme and manifest if `opts.copy` is set
///
/// Only the first two steps can fail; copy errors are carried in
/// [`BuildReport::mirror`].
#[instrument(skip_all, fields(output = %opts.output_path.display()))]
pub fn run_build(opts: &BuildOptions, reporter: &dyn BuildReporter) -> Result<BuildReport> {
    let assembled = assembler::build(opts, reporter)?;
    let mirror = mirror::maybe_copy(opts, reporter);

    info!(
        bytes = assembled.bytes,
        included = assembled.included.len(),
        skipped = assembled.skipped.len(),
        "build complete"
    );

    Ok(BuildReport {
        output_path: assembled.output_path,
        bytes: assembled.bytes,
        included: assembled.included,
        skipped: assembled.skipped,
        mirror,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use corona_shared::{MirrorOutcome, ThemeConfig};
    use std::cell::RefCell;

    #[derive(Default)]
    struct EventLog(RefCell<Vec<String>>);

    impl BuildReporter for EventLog {
        fn fragment_missing(&self, name: &str) {
            self.0.borrow_mut().push(format!("missing {name}"));
        }
        fn built(&self, _path: &Path, _bytes: usize) {
            self.0.borrow_mut().push("built".into());
        }
        fn copied(&self, _dir: &Path) {
            self.0.borrow_mut().push("copied".into());
        }
        fn copy_failed(&self, _reason: &str) {
            self.0.borrow_mut().push("copy failed".into());
        }
    }

    fn project(root: &Path, dest: &Path) -> BuildOptions {
        let config = ThemeConfig {
            fragments: vec!["variables.css".into(), "editor.css".into()],
            destination_directory: Some(dest.to_string_lossy().into_owned()),
            ..ThemeConfig::default()
        };
        let opts = BuildOptions::resolve(&config, root).unwrap();
        std::fs::create_dir_all(&opts.source_dir).unwrap();
        std::fs::write(opts.source_dir.join("variables.css"), ":root{--a:1}").unwrap();
        std::fs::write(&opts.manifest_path, "{}").unwrap();
        opts
    }

    #[test]
    fn events_arrive_in_pipeline_order() {
        let root = tempfile::tempdir().unwrap();
        let vault = tempfile::tempdir().unwrap();
        let mut opts = project(root.path(), vault.path());
        opts.copy = true;

        let log = EventLog::default();
        let report = run_build(&opts, &log).expect("build");

        assert_eq!(*log.0.borrow(), vec!["missing editor.css", "built", "copied"]);
        assert_eq!(report.skipped, vec!["editor.css"]);
        assert_eq!(report.included, vec!["variables.css"]);
        assert!(matches!(report.mirror, MirrorOutcome::Copied { .. }));
    }

    #[test]
    fn copy_failure_still_succeeds() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("nowhere");
        let mut opts = project(root.path(), &missing);
        opts.copy = true;

        let log = EventLog::default();
        let report = run_build(&opts, &log).expect("build must succeed");

        assert!(report.bytes > 0);
        assert!(opts.output_path.exists());
        assert!(matches!(report.mirror, MirrorOutcome::Failed { .. }));
        assert_eq!(log.0.borrow().last().map(String::as_str), Some("copy failed"));
    }

    #[test]
    fn no_trigger_writes_only_local_output() {
        let root = tempfile::tempdir().unwrap();
        let vault = tempfile::tempdir().unwrap();
        let opts = project(root.path(), vault.path());

        let report = run_build(&opts, &SilentReporter).expect("build");

        assert_eq!(report.mirror, MirrorOutcome::NotRequested);
        assert_eq!(std::fs::read_dir(vault.path()).unwrap().count(), 0);
    }
}
