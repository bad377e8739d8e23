//! Violation groups: the output of one rule.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::rule::RuleDescriptor;

/// Display value of a missing associated flight identifier.
pub const MISSING_ASSOCIATED: &str = "–";

/// What a row's `highlighted` flag means for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    /// The two compared instants are identical.
    SameInstant,
    /// The associated flight id is a real value rather than missing.
    AssociatedPresent,
}

impl HighlightKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            HighlightKind::SameInstant => "Same instant",
            HighlightKind::AssociatedPresent => "Associated flight present",
        }
    }
}

/// One flagged record, projected onto the rule's display columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRow {
    /// Zero-based row index in the source table.
    pub source_row: usize,
    /// Display column → formatted value, in display order.
    pub values: IndexMap<String, String>,
    /// Row-level emphasis; meaning given by the group's `highlight`.
    #[serde(default)]
    pub highlighted: bool,
}

impl ViolationRow {
    /// Get a projected value by display column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

/// Every record a rule flagged, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationGroup {
    /// Stable rule id, e.g. `arrival.station`.
    pub rule: String,
    /// Human-readable heading.
    pub label: String,
    /// Display columns, in order.
    pub columns: Vec<String>,
    /// Flagged records in input order.
    pub rows: Vec<ViolationRow>,
    /// Number of flagged records.
    pub count: usize,
    /// Meaning of the per-row highlight flag, for rules that set it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightKind>,
    /// Group-level notice raised when at least one row is highlighted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ViolationGroup {
    /// Create an empty group with the given display columns.
    pub fn new(descriptor: &RuleDescriptor, columns: &[&str]) -> Self {
        Self {
            rule: descriptor.id.clone(),
            label: descriptor.label.clone(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            count: 0,
            highlight: None,
            warning: None,
        }
    }

    /// Declare what the per-row highlight flag means.
    pub fn with_highlight(mut self, kind: HighlightKind) -> Self {
        self.highlight = Some(kind);
        self
    }

    /// Append a row; `values` line up with the group's columns.
    pub fn push_row(&mut self, source_row: usize, values: Vec<String>, highlighted: bool) {
        debug_assert_eq!(values.len(), self.columns.len());
        let values = self.columns.iter().cloned().zip(values).collect();
        self.rows.push(ViolationRow {
            source_row,
            values,
            highlighted,
        });
        self.count = self.rows.len();
    }

    /// Attach `message` as the group warning when any row is highlighted.
    pub fn warn_if_highlighted(mut self, message: impl Into<String>) -> Self {
        if self.has_highlighted_rows() {
            self.warning = Some(message.into());
        }
        self
    }

    /// Whether the rule flagged nothing.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any row carries the highlight flag.
    pub fn has_highlighted_rows(&self) -> bool {
        self.rows.iter().any(|r| r.highlighted)
    }

    /// Number of highlighted rows.
    pub fn highlighted_count(&self) -> usize {
        self.rows.iter().filter(|r| r.highlighted).count()
    }
}
