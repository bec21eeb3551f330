use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;

use crate::cli::logging;
use crate::diff::{self, DiffTotals};
use crate::gauge::TokenGauge;
use crate::git;
use crate::platform::{CommandRunner, SystemRunner};
use crate::session::{self, SessionInput};

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Escape sequences for each segment (xterm 256-color palette).
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub branch: &'static str,
    pub added: &'static str,
    pub removed: &'static str,
    pub model: &'static str,
    pub tokens: &'static str,
    pub reset: &'static str,
}

pub const PALETTE: Palette = Palette {
    branch: "\x1b[38;5;111m",  // blue
    added: "\x1b[38;5;151m",   // green
    removed: "\x1b[38;5;211m", // pink
    model: "\x1b[38;5;183m",   // mauve
    tokens: "\x1b[38;5;216m",  // peach
    reset: "\x1b[0m",
};

const SEPARATOR: &str = " | ";

// ---------------------------------------------------------------------------
// Clap Args
// ---------------------------------------------------------------------------

#[derive(ClapArgs)]
pub struct Args {
    /// Diagnostics on stderr: off, error, warn, info, debug, trace
    #[arg(long)]
    pub log_level: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Read the session from stdin and print the status line.
///
/// Only unreadable or invalid session input is an error; everything else
/// degrades to a default value in the rendered line.
pub fn run(args: Args) -> Result<()> {
    logging::init(args.log_level.as_deref());

    let session =
        session::read_from(std::io::stdin().lock()).context("could not read session input")?;
    let line = build_line(&SystemRunner, &session);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", line).context("failed to write status line")?;
    stdout.flush().context("failed to write status line")?;
    Ok(())
}

/// Gather branch, diff and token information for `session` and render it.
pub fn build_line(runner: &dyn CommandRunner, session: &SessionInput) -> String {
    let branch = git::current_branch(runner, Path::new(&session.cwd));
    let totals = diff::net_diff(runner, Path::new(&session.transcript_path));
    let gauge = TokenGauge::from_context(session.context_window.as_ref());

    tracing::debug!(
        %branch,
        added = totals.added,
        removed = totals.removed,
        gauge = gauge.is_some(),
        "rendering status line"
    );
    render(&branch, totals, &session.model.display_name, gauge.as_ref())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, PALETTE.reset)
}

/// Compose the final line:
/// `<branch> | +<added> -<removed> | <model> | <gauge>`.
///
/// Without a gauge the last segment is empty but the separator stays.
pub fn render(
    branch: &str,
    totals: DiffTotals,
    model: &str,
    gauge: Option<&TokenGauge>,
) -> String {
    let diff_segment = format!(
        "{} {}",
        paint(PALETTE.added, &format!("+{}", totals.added)),
        paint(PALETTE.removed, &format!("-{}", totals.removed)),
    );
    let token_segment = gauge
        .map(|g| paint(PALETTE.tokens, &g.to_string()))
        .unwrap_or_default();

    [
        paint(PALETTE.branch, branch),
        diff_segment,
        paint(PALETTE.model, model),
        token_segment,
    ]
    .join(SEPARATOR)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
