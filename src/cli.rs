use crate::config::Config;
use crate::deployment_manager::DeploymentManager;
use crate::error::DeployResult;
use crate::runner::{CommandRunner, ProcessRunner};
use crate::target::{parse_selection, Selection, Target};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(about = "Deploy the web app to DigitalOcean, Heroku, Elastic Beanstalk or local Docker")]
pub struct CLI {
    #[arg(
        short,
        long,
        value_enum,
        help = "Deployment target; omit to pick from the interactive menu"
    )]
    pub target: Option<Target>,
    #[arg(
        short = 'e',
        long = "env-file",
        default_value = ".env",
        help = "Path to .env file"
    )]
    pub env_file: String,
    #[arg(long, default_value = ".", help = "Directory to write config artifacts into")]
    pub workdir: String,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase verbosity (-v, -vv, etc.)")]
    pub verbose: u8,
}

// Main application logic
pub fn deploy(cli: &CLI) -> ExitCode {
    // Resolve configuration first; a missing credential fails before any
    // target logic, including the menu.
    let config = match Config::from_env(&cli.env_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            println!();
            Config::show_configuration_help();
            return ExitCode::FAILURE;
        }
    };

    let selection = match cli.target {
        Some(target) => Selection::Deploy(target),
        None => match prompt_selection() {
            Ok(selection) => selection,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let manager = DeploymentManager::new(ProcessRunner, PathBuf::from(&cli.workdir));
    match run_selection(selection, &config, &manager) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Deployment failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Dispatch the chosen selection. Exit is a clean no-op: nothing is
/// written and no external command runs.
pub fn run_selection<R: CommandRunner>(
    selection: Selection,
    config: &Config,
    manager: &DeploymentManager<R>,
) -> DeployResult<()> {
    match selection {
        Selection::Exit => {
            println!("Nothing to do, goodbye.");
            Ok(())
        }
        Selection::Deploy(target) => manager.deploy(target, config),
    }
}

fn prompt_selection() -> DeployResult<Selection> {
    println!("Where should the app be deployed?");
    for (index, target) in Target::MENU.iter().enumerate() {
        println!("  {}) {}", index + 1, target.display_name());
    }
    println!("  5) Exit");
    print!("> ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    parse_selection(&line)
}
