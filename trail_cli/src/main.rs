mod cli;
mod error_fmt;
mod logging;
mod record;

use clap::Parser;

use crate::cli::{Cli, Commands, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(err) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        std::process::exit(exit_code_for_error(&err));
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    color_eyre::install()?;
    let cfg = record::load_config(&cli.config)?;
    logging::init(cli.json, &cli.log_level, &cfg.logging)?;
    tracing::debug!(config = ?cli.config, "config loaded");

    match cli.cmd {
        Commands::Fit { input, output } => {
            record::run_fit(&cfg, &input, output.as_deref(), cli.json)
        }
        Commands::Locate { input, at } => record::run_locate(&cfg, &input, &at, cli.json),
        Commands::Replay { input, fps } => record::run_replay(&cfg, &input, fps),
        Commands::Scrub { input, value } => record::run_scrub(&cfg, &input, value, cli.json),
        Commands::SelfCheck => record::self_check(&cfg, cli.json),
    }
}
