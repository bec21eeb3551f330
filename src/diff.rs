//! Net line changes across every file edited during the session.
//!
//! Each file's first-seen original (see [`crate::transcript`]) is compared
//! with what is on disk now using the system `diff`, so intermediate edits
//! cancel out.

use std::ops::AddAssign;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::platform::CommandRunner;
use crate::transcript::{self, FileOriginals};

/// Added/removed line counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffTotals {
    pub added: u64,
    pub removed: u64,
}

impl AddAssign for DiffTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.added = self.added.saturating_add(rhs.added);
        self.removed = self.removed.saturating_add(rhs.removed);
    }
}

/// Compute net added/removed lines for the session recorded at
/// `transcript_path`. Never fails; unreadable inputs contribute nothing.
pub fn net_diff(runner: &dyn CommandRunner, transcript_path: &Path) -> DiffTotals {
    match transcript::load_originals(transcript_path) {
        Ok(originals) => accumulate(runner, &originals),
        Err(e) => {
            tracing::warn!(path = %transcript_path.display(), error = %e, "could not read transcript");
            DiffTotals::default()
        }
    }
}

/// Sum the diff of every recorded original against the current file.
///
/// Files that can't be compared are skipped. The scratch directory used to
/// hold originals is removed before returning.
pub fn accumulate(runner: &dyn CommandRunner, originals: &FileOriginals) -> DiffTotals {
    let mut totals = DiffTotals::default();
    if originals.is_empty() {
        return totals;
    }

    tracing::debug!(files = originals.len(), "comparing edited files");
    let scratch = match tempfile::Builder::new().prefix("statusline-").tempdir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            tracing::warn!(error = %e, "could not create scratch directory");
            None
        }
    };
    let scratch_path = scratch.as_ref().map(|d| d.path());

    for (path, original) in originals.iter() {
        match file_contribution(runner, scratch_path, Path::new(path), original) {
            Ok(delta) => totals += delta,
            Err(e) => tracing::debug!(path, error = %format!("{e:#}"), "skipping file"),
        }
    }

    if let Some(dir) = scratch {
        let dir_path = dir.path().to_path_buf();
        if let Err(e) = dir.close() {
            tracing::warn!(path = %dir_path.display(), error = %e, "could not remove scratch directory");
        }
    }

    totals
}

/// Lines added/removed for one file since `original` was recorded.
fn file_contribution(
    runner: &dyn CommandRunner,
    scratch: Option<&Path>,
    path: &Path,
    original: &str,
) -> Result<DiffTotals> {
    let exists = path
        .try_exists()
        .with_context(|| format!("cannot stat {}", path.display()))?;
    if !exists {
        return Ok(DiffTotals {
            added: 0,
            removed: count_non_empty_lines(original),
        });
    }

    let scratch = scratch.context("no scratch directory")?;
    let original_path = scratch.join("original");
    std::fs::write(&original_path, original)
        .with_context(|| format!("failed to write {}", original_path.display()))?;

    let original_arg = original_path.to_str().context("scratch path is not UTF-8")?;
    let current_arg = path.to_str().context("file path is not UTF-8")?;
    let output = runner
        .run("diff", &["--", original_arg, current_arg], None)
        .context("failed to run diff")?;

    // 0 = identical, 1 = differences found, anything else is trouble.
    match output.status {
        Some(0) | Some(1) => Ok(count_markers(&output.stdout)),
        other => bail!("diff exited with {:?}", other),
    }
}

/// Count normal-format `diff` output lines: `>` only in the current file,
/// `<` only in the original.
pub fn count_markers(diff_output: &str) -> DiffTotals {
    let mut totals = DiffTotals::default();
    for line in diff_output.lines() {
        if line.starts_with('>') {
            totals.added += 1;
        } else if line.starts_with('<') {
            totals.removed += 1;
        }
    }
    totals
}

fn count_non_empty_lines(text: &str) -> u64 {
    text.lines().filter(|l| !l.is_empty()).count() as u64
}
