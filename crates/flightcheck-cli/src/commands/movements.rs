//! Movements command - check a movement log.

use std::path::PathBuf;

use colored::Colorize;
use flightcheck::Flightcheck;

use super::{CommandResult, config_from, emit, ensure_exists};
use crate::cli::{InputArgs, OutputArgs};

pub fn run(
    file: PathBuf,
    departures: Option<PathBuf>,
    input: InputArgs,
    output: OutputArgs,
) -> CommandResult {
    ensure_exists(&file)?;
    if let Some(dep) = &departures {
        ensure_exists(dep)?;
    }

    if !output.json {
        println!(
            "{} {}",
            "Checking".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let flightcheck = Flightcheck::with_config(config_from(&input)?);
    let report = flightcheck.check_movements(&file, departures.as_deref())?;

    emit(&report, &output)
}
