pub mod logging;
pub mod output;
pub mod statusline;

use clap::Parser;

/// Render a one-line session summary (branch, net diff, model, context
/// usage) from the session JSON on stdin
#[derive(Parser)]
#[command(name = "statusline", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub statusline: statusline::Args,
}
