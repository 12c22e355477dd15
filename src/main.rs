use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use file_collector::cli::{Args, Commands};
use file_collector::collectors::collector;
use file_collector::config::{load_or_default, CollectorConfig};

fn main() -> ExitCode {
    // Parse arguments
    let args = Args::parse();

    // Initialize logging
    let logging = initialize_logging(args.debug).is_ok();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if logging {
                error!("{:#}", e);
            } else {
                eprintln!("{:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging on stderr, keeping stdout for the verbose file report
fn initialize_logging(debug: bool) -> Result<()> {
    let log_level = if debug { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    // Handle subcommands
    if let Some(cmd) = &args.command {
        return handle_subcommand(cmd);
    }

    let config = load_or_default(args.config.as_deref()).context("Failed to load configuration")?;
    let settings = config.resolve(args.overrides())?;

    collector::collect(settings)?;
    Ok(())
}

/// Handle subcommands (init-config)
fn handle_subcommand(cmd: &Commands) -> Result<()> {
    match cmd {
        Commands::InitConfig { path } => {
            info!("Creating default configuration file at {}", path.display());
            write_default_config(path)?;
            info!("Configuration created successfully");
            Ok(())
        }
    }
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Refusing to overwrite existing file {}", path.display());
    }
    CollectorConfig::template()
        .save_to_yaml_file(path)
        .context("Failed to write configuration file")?;
    Ok(())
}
