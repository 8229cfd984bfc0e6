//! logsift - Terminal Log Triage
//!
//! Opens an interactive session for each file given on the command line, one after another.

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};
use logsift::render::{TerminalEvents, TerminalScreen};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("logsift")
        .version(logsift::VERSION)
        .about("Split log files into ERROR / INFO / WARN views in the terminal")
        .long_about(
            "logsift classifies every line of each given log file by its ERROR, INFO or WARN \
             marker and opens a full-screen view per file. Keys: 1 all, 2 errors, 3 info, \
             4 warnings, q/Enter/Esc next file.",
        )
        .arg(
            Arg::new("files")
                .help("Log files to inspect, viewed one after another")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append)
                .num_args(0..)
                .index(1),
        )
        .get_matches();

    let paths: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default();

    let summary = logsift::run_paths(&paths, |path| {
        (
            TerminalScreen::new(path.display().to_string()),
            TerminalEvents::new(),
        )
    })
    .await?;

    log::info!(
        "viewed {} file(s), skipped {}",
        summary.viewed.len(),
        summary.skipped.len()
    );

    Ok(())
}
