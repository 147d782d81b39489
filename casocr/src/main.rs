//! casocr command-line tool

mod cli;
mod commands;
mod error;
mod interactive;

use clap::Parser;
use cli::{Cli, Command};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Train { paths, fresh } => commands::train(&cli, paths, *fresh),
        Command::TrainInteractive { dir, fresh } => commands::train_interactive(&cli, dir, *fresh),
        Command::Recognize { paths } => commands::recognize(&cli, paths),
        Command::DebugInk { input, output } => commands::debug_ink(&cli, input, output),
        Command::Inspect => commands::inspect(&cli),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
