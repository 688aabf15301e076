pub mod artifact;
pub mod cli;
pub mod config;
pub mod deployment_manager;
pub mod error;
pub mod runner;
pub mod target;

use clap::Parser;
use cli::deploy as _deploy;
pub use cli::CLI;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

pub fn run() -> ExitCode {
    let cli = CLI::parse();
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();
    _deploy(&cli)
}
