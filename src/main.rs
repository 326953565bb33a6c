//! Transparency CLI entry point.

use anyhow::Result;
use clap::Parser;

use transparency_engine::cli::commands::{calculate, cycles, suggest, validate_config};
use transparency_engine::cli::{handle_error, Cli, Commands, EXIT_FAILURE};
use transparency_engine::domain::models::Config;
use transparency_engine::infrastructure::config::ConfigLoader;
use transparency_engine::infrastructure::logging::LoggerImpl;

fn load_config(cli: &Cli) -> Result<(Config, String)> {
    match &cli.config {
        Some(path) => Ok((ConfigLoader::load_from_file(path)?, path.display().to_string())),
        None => Ok((ConfigLoader::load()?, ".transparency/ + environment".to_string())),
    }
}

fn main() {
    let cli = Cli::parse();

    let (config, source) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(err) => std::process::exit(handle_error(&err, cli.json)),
    };

    let logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Failed to initialize logging: {err:#}");
            std::process::exit(EXIT_FAILURE);
        }
    };

    let result = match cli.command {
        Commands::Calculate(args) => calculate::execute(args, &config, cli.json),
        Commands::Cycles(args) => cycles::execute(args, &config, cli.json),
        Commands::Suggest(args) => suggest::execute(args, &config, cli.json),
        Commands::ValidateConfig => validate_config::execute(&config, &source, cli.json),
    };

    if let Err(err) = result {
        let code = handle_error(&err, cli.json);
        drop(logger);
        std::process::exit(code);
    }
}
