//! Result aggregator: labeled sections of violation groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::SourceMetadata;
use crate::normalize::NormalizedFlights;
use crate::schema::{DatasetRole, ReportRecord};
use crate::validation::ViolationGroup;

pub const SECTION_ARRIVAL: &str = "arrival";
pub const SECTION_DEPARTURE: &str = "departure";
pub const SECTION_MOVEMENT_REPORT: &str = "movement-report";

/// Violation groups of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section key: `arrival`, `departure` or `movement-report`.
    pub name: String,
    /// Heading for display.
    pub title: String,
    /// Records checked (after dropping rows without a key).
    pub total_records: usize,
    /// Records inside the recent window, for movement logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_records: Option<usize>,
    /// Operated (`OPE`) records, for movement logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operated_count: Option<usize>,
    /// Source the records came from, when loaded from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// One group per rule, in catalogue order.
    pub groups: Vec<ViolationGroup>,
}

impl ReportSection {
    /// Section for one leg of a movement log.
    pub fn flights(
        role: DatasetRole,
        flights: &NormalizedFlights,
        groups: Vec<ViolationGroup>,
    ) -> Self {
        let name = match role {
            DatasetRole::Arrival => SECTION_ARRIVAL,
            DatasetRole::Departure => SECTION_DEPARTURE,
        };
        Self {
            name: name.to_string(),
            title: role.label().to_string(),
            total_records: flights.full.len(),
            recent_records: Some(flights.recent.len()),
            operated_count: Some(flights.full.iter().filter(|r| r.is_operated()).count()),
            source: None,
            groups,
        }
    }

    /// Section for the movement report.
    pub fn movement_report(records: &[ReportRecord], groups: Vec<ViolationGroup>) -> Self {
        Self {
            name: SECTION_MOVEMENT_REPORT.to_string(),
            title: "Movement report".to_string(),
            total_records: records.len(),
            recent_records: None,
            operated_count: None,
            source: None,
            groups,
        }
    }

    /// Attach the source metadata.
    pub fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = Some(source);
        self
    }

    /// Find a group by rule id.
    pub fn group(&self, rule: &str) -> Option<&ViolationGroup> {
        self.groups.iter().find(|g| g.rule == rule)
    }

    /// Total flagged rows across the section's groups.
    pub fn violation_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Whether no rule flagged anything.
    pub fn is_clear(&self) -> bool {
        self.groups.iter().all(|g| g.is_empty())
    }
}

/// Counts across a whole report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_groups: usize,
    pub groups_with_violations: usize,
    pub total_violations: usize,
    pub highlighted_rows: usize,
}

/// Assembled result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub sections: Vec<ReportSection>,
    pub summary: ReportSummary,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Find a section by name.
    pub fn section(&self, name: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Whether every section is clear.
    pub fn is_clear(&self) -> bool {
        self.sections.iter().all(|s| s.is_clear())
    }
}

/// Assemble sections into a report, keeping their order and row order.
pub fn aggregate(sections: impl IntoIterator<Item = ReportSection>) -> Report {
    let sections: Vec<ReportSection> = sections.into_iter().collect();

    let groups = sections.iter().flat_map(|s| s.groups.iter());
    let summary = groups.fold(ReportSummary::default(), |mut acc, group| {
        acc.total_groups += 1;
        if !group.is_empty() {
            acc.groups_with_violations += 1;
        }
        acc.total_violations += group.count;
        acc.highlighted_rows += group.highlighted_count();
        acc
    });

    tracing::info!(
        sections = sections.len(),
        groups = summary.total_groups,
        violations = summary.total_violations,
        "report assembled"
    );

    Report {
        sections,
        summary,
        generated_at: Utc::now(),
    }
}
