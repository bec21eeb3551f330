mod cli;
mod diff;
mod error;
mod gauge;
mod git;
mod platform;
mod session;
mod transcript;

use clap::Parser;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::statusline::run(cli.statusline) {
        cli::output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
