//! Main Flightcheck struct and public API.

use std::path::Path;

use crate::error::Result;
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::normalize::Normalizer;
use crate::report::{Report, ReportSection, aggregate};
use crate::schema::DatasetRole;
use crate::validation::RuleEngine;

/// Configuration for a Flightcheck run.
#[derive(Debug, Clone, Default)]
pub struct FlightcheckConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Maximum rows to check per file (None = all).
    pub max_rows: Option<usize>,
}

/// Loads movement exports and runs the rule catalogue over them.
pub struct Flightcheck {
    parser: Parser,
    normalizer: Normalizer,
    engine: RuleEngine,
}

impl Flightcheck {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(FlightcheckConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: FlightcheckConfig) -> Self {
        let mut parser_config = config.parser;
        if config.max_rows.is_some() {
            parser_config.max_rows = config.max_rows;
        }

        Self {
            parser: Parser::with_config(parser_config),
            normalizer: Normalizer::new(),
            engine: RuleEngine::new(),
        }
    }

    /// The rule catalogue in use.
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Check a movement log.
    ///
    /// Arrivals come from the plain columns of `path`. Departures come from
    /// `departures` when given, otherwise from the `Assoc. ` columns of the
    /// same file.
    pub fn check_movements(
        &self,
        path: impl AsRef<Path>,
        departures: Option<&Path>,
    ) -> Result<Report> {
        let (table, source) = self.parser.parse_file(path)?;

        let arrival = self
            .check_flights(DatasetRole::Arrival, &table)
            .with_source(source.clone());

        let departure = match departures {
            Some(dep_path) => {
                let (dep_table, dep_source) = self.parser.parse_file(dep_path)?;
                self.check_flights(DatasetRole::Departure, &dep_table)
                    .with_source(dep_source)
            }
            None => {
                let view = table.associated_view();
                if view.column_count() == 0 {
                    tracing::warn!(
                        file = %source.file,
                        "no associated columns found; departure section is empty"
                    );
                }
                self.check_flights(DatasetRole::Departure, &view)
                    .with_source(source)
            }
        };

        let report = aggregate([arrival, departure]);
        log_summary("movements", &report);
        Ok(report)
    }

    /// Check already-loaded arrival and departure tables.
    pub fn check_tables(&self, arrivals: &DataTable, departures: &DataTable) -> Report {
        aggregate([
            self.check_flights(DatasetRole::Arrival, arrivals),
            self.check_flights(DatasetRole::Departure, departures),
        ])
    }

    /// Normalize one table and run the rule set for `role` over it.
    pub fn check_flights(&self, role: DatasetRole, table: &DataTable) -> ReportSection {
        let flights = self.normalizer.normalize(table);
        let groups = self.engine.evaluate_flights(role, &flights);
        ReportSection::flights(role, &flights, groups)
    }

    /// Check a movement report file.
    pub fn check_report(&self, path: impl AsRef<Path>) -> Result<Report> {
        let (table, source) = self.parser.parse_file(path)?;
        let report = aggregate([self.check_report_table(&table).with_source(source)]);
        log_summary("movement report", &report);
        Ok(report)
    }

    /// Normalize a movement report table and run the report rules over it.
    pub fn check_report_table(&self, table: &DataTable) -> ReportSection {
        let records = self.normalizer.normalize_report(table);
        let groups = self.engine.evaluate_report(&records);
        ReportSection::movement_report(&records, groups)
    }

    /// Load a file without checking it.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        self.parser.parse_file(path)
    }
}

impl Default for Flightcheck {
    fn default() -> Self {
        Self::new()
    }
}

fn log_summary(kind: &str, report: &Report) {
    for section in &report.sections {
        tracing::info!(
            check = kind,
            section = %section.name,
            records = section.total_records,
            operated = section.operated_count.unwrap_or(0),
            violations = section.violation_count(),
            "section checked"
        );
    }
}
