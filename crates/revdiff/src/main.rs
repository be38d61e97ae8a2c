use clap::Parser;
use std::process::ExitCode;
use tracing::Level;

mod cli;
mod commands;
mod config;
mod render;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match commands::run_command(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("revdiff: {:#}", err);
            ExitCode::from(2)
        }
    }
}
