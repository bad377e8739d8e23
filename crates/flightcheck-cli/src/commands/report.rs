//! Report command - check a movement report.

use std::path::PathBuf;

use colored::Colorize;
use flightcheck::Flightcheck;

use super::{CommandResult, config_from, emit, ensure_exists};
use crate::cli::{InputArgs, OutputArgs};

pub fn run(file: PathBuf, input: InputArgs, output: OutputArgs) -> CommandResult {
    ensure_exists(&file)?;

    if !output.json {
        println!(
            "{} {}",
            "Checking report".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let flightcheck = Flightcheck::with_config(config_from(&input)?);
    let report = flightcheck.check_report(&file)?;

    emit(&report, &output)
}
