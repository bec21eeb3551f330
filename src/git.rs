use std::path::Path;

use crate::platform::CommandRunner;

/// Shown in place of a branch name when none can be determined.
pub const NO_GIT: &str = "no-git";

/// Return the current branch of the repository containing `cwd`.
///
/// Never fails: a missing `git`, a directory outside any repository, a
/// non-zero exit or a detached HEAD (empty output) all yield [`NO_GIT`].
pub fn current_branch(runner: &dyn CommandRunner, cwd: &Path) -> String {
    let output = match runner.run("git", &["branch", "--show-current"], Some(cwd)) {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(cwd = %cwd.display(), error = %e, "git could not be started");
            return NO_GIT.to_string();
        }
    };

    if !output.success() {
        tracing::debug!(cwd = %cwd.display(), status = ?output.status, "git branch query failed");
        return NO_GIT.to_string();
    }

    let branch = output.stdout.trim();
    if branch.is_empty() {
        tracing::debug!(cwd = %cwd.display(), "no current branch (detached HEAD?)");
        return NO_GIT.to_string();
    }

    branch.to_string()
}
