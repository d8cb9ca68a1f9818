//! Optional copy of the built theme into an external theme directory.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use corona_shared::{
    BuildOptions, CoronaError, DEST_MANIFEST_FILE, DEST_THEME_FILE, MirrorOutcome, Result,
};

use crate::pipeline::BuildReporter;

/// Value of `npm_lifecycle_event` that implies `--copy`.
pub const LIFECYCLE_BUILD: &str = "build";

/// Whether the copy step runs: an explicit flag or the `build` lifecycle
/// event, either one is enough.
pub fn should_mirror(copy_flag: bool, lifecycle_event: Option<&str>) -> bool {
    copy_flag || lifecycle_event == Some(LIFECYCLE_BUILD)
}

/// Copy the theme and then the manifest into `dest`.
///
/// The destination is neither created nor validated. Returns `dest` on
/// success; any failure becomes [`CoronaError::Copy`] carrying the
/// underlying message.
pub fn mirror(output_path: &Path, manifest_path: &Path, dest: Option<&Path>) -> Result<PathBuf> {
    let dest = dest.ok_or_else(|| {
        CoronaError::Copy("no destination_directory configured".to_string())
    })?;

    copy_file(output_path, &dest.join(DEST_THEME_FILE))?;
    copy_file(manifest_path, &dest.join(DEST_MANIFEST_FILE))?;

    Ok(dest.to_path_buf())
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    std::fs::copy(from, to).map_err(|e| {
        CoronaError::Copy(format!("{e}, copy '{}' -> '{}'", from.display(), to.display()))
    })?;
    Ok(())
}

/// Run the copy step if `opts.copy` is set, reporting either outcome.
///
/// Never fails: a copy error is downgraded to [`MirrorOutcome::Failed`].
#[instrument(skip_all, fields(copy = opts.copy))]
pub fn maybe_copy(opts: &BuildOptions, reporter: &dyn BuildReporter) -> MirrorOutcome {
    if !opts.copy {
        return MirrorOutcome::NotRequested;
    }

    match mirror(
        &opts.output_path,
        &opts.manifest_path,
        opts.destination_dir.as_deref(),
    ) {
        Ok(dir) => {
            info!(dir = %dir.display(), "theme copied");
            reporter.copied(&dir);
            MirrorOutcome::Copied { dir }
        }
        Err(e) => {
            let reason = e.to_string();
            warn!(%reason, "could not copy theme");
            reporter.copy_failed(&reason);
            MirrorOutcome::Failed { reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SilentReporter;
    use corona_shared::ThemeConfig;

    fn make_options(root: &Path, dest: Option<&Path>) -> BuildOptions {
        let config = ThemeConfig {
            destination_directory: dest.map(|d| d.to_string_lossy().into_owned()),
            ..ThemeConfig::default()
        };
        let mut opts = BuildOptions::resolve(&config, root).unwrap();
        opts.copy = true;
        std::fs::write(&opts.output_path, ":root{}").unwrap();
        std::fs::write(&opts.manifest_path, r#"{"name":"Corona"}"#).unwrap();
        opts
    }

    #[test]
    fn trigger_is_flag_or_build_lifecycle() {
        assert!(!should_mirror(false, None));
        assert!(!should_mirror(false, Some("test")));
        assert!(should_mirror(true, None));
        assert!(should_mirror(false, Some("build")));
        assert!(should_mirror(true, Some("build")));
    }

    #[test]
    fn copies_theme_and_manifest() {
        let project = tempfile::tempdir().unwrap();
        let vault = tempfile::tempdir().unwrap();
        let opts = make_options(project.path(), Some(vault.path()));

        let outcome = maybe_copy(&opts, &SilentReporter);

        assert_eq!(
            outcome,
            MirrorOutcome::Copied {
                dir: vault.path().to_path_buf()
            }
        );
        assert_eq!(
            std::fs::read_to_string(vault.path().join("theme.css")).unwrap(),
            ":root{}"
        );
        assert_eq!(
            std::fs::read_to_string(vault.path().join("manifest.json")).unwrap(),
            r#"{"name":"Corona"}"#
        );
    }

    #[test]
    fn absent_destination_is_a_failure_not_an_error() {
        let project = tempfile::tempdir().unwrap();
        let dest = project.path().join("missing-vault");
        let opts = make_options(project.path(), Some(&dest));

        let outcome = maybe_copy(&opts, &SilentReporter);

        match outcome {
            MirrorOutcome::Failed { reason } => assert!(reason.contains("missing-vault")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!dest.exists());
    }

    #[test]
    fn missing_manifest_is_a_copy_failure() {
        let project = tempfile::tempdir().unwrap();
        let vault = tempfile::tempdir().unwrap();
        let opts = make_options(project.path(), Some(vault.path()));
        std::fs::remove_file(&opts.manifest_path).unwrap();

        let outcome = maybe_copy(&opts, &SilentReporter);

        assert!(matches!(outcome, MirrorOutcome::Failed { .. }));
        // The theme was copied before the manifest failed.
        assert!(vault.path().join("theme.css").exists());
    }

    #[test]
    fn unconfigured_destination_fails() {
        let project = tempfile::tempdir().unwrap();
        let opts = make_options(project.path(), None);

        match maybe_copy(&opts, &SilentReporter) {
            MirrorOutcome::Failed { reason } => {
                assert!(reason.contains("destination_directory"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn not_requested_leaves_destination_untouched() {
        let project = tempfile::tempdir().unwrap();
        let vault = tempfile::tempdir().unwrap();
        let mut opts = make_options(project.path(), Some(vault.path()));
        opts.copy = false;

        assert_eq!(maybe_copy(&opts, &SilentReporter), MirrorOutcome::NotRequested);
        assert_eq!(std::fs::read_dir(vault.path()).unwrap().count(), 0);
    }
}
