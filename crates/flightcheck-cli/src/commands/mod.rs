//! CLI command implementations.

pub mod movements;
pub mod report;
pub mod rules;

use std::fs;
use std::path::Path;

use colored::Colorize;
use flightcheck::input::parse_delimiter;
use flightcheck::{FlightcheckConfig, Report};

use crate::cli::{InputArgs, OutputArgs};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Build the library configuration from input flags.
fn config_from(input: &InputArgs) -> flightcheck::Result<FlightcheckConfig> {
    let mut config = FlightcheckConfig {
        max_rows: input.max_rows,
        ..Default::default()
    };
    if let Some(delimiter) = &input.delimiter {
        config.parser.delimiter = Some(parse_delimiter(delimiter)?);
    }
    config.parser.validate()?;
    if config.max_rows == Some(0) {
        return Err(flightcheck::FlightcheckError::Config(
            "--max-rows must be greater than zero".to_string(),
        ));
    }
    Ok(config)
}

fn ensure_exists(path: &Path) -> CommandResult {
    if !path.exists() {
        return Err(format!(
            "File not found: {}\nProvide a valid movement export.",
            path.display()
        )
        .into());
    }
    Ok(())
}

/// Write or print the report as requested.
fn emit(report: &Report, output: &OutputArgs) -> CommandResult {
    if let Some(path) = &output.output {
        write_json(report, path)?;
        if !output.json {
            crate::presenter::print_report(report);
        }
        eprintln!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    } else if output.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        crate::presenter::print_report(report);
    }
    Ok(())
}

fn write_json(report: &Report, path: &Path) -> CommandResult {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "report written");
    Ok(())
}
