mod cli;
mod commands;
mod config;
mod error;
mod paths;

use std::fs::{self, File};
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{LevelFilter, WriteLogger};

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(cli.log_level.unwrap_or_else(|| config.log_level()));

    match commands::run(cli.command, &config).await {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if stdout.write_all(output.as_bytes()).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to `latest.log` in the cache directory. Logging is best effort: when
/// the file cannot be created the program runs without it.
fn init_logging(level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = File::create(&path) else {
        return;
    };
    if WriteLogger::init(level, simplelog::Config::default(), file).is_ok() {
        log::debug!("Logging to {}", path.display());
    }
}
