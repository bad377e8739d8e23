//! Flightcheck CLI - consistency checks for airport movement logs.

mod cli;
mod commands;
mod logging;
mod presenter;

use clap::Parser;
use cli::{Cli, Commands};
use logging::LogConfig;

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format.into());
    if let Err(e) = logging::init_logging(&log_config) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Movements {
            file,
            departures,
            input,
            output,
        } => commands::movements::run(file, departures, input, output),

        Commands::Report {
            file,
            input,
            output,
        } => commands::report::run(file, input, output),

        Commands::Rules { json } => commands::rules::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
