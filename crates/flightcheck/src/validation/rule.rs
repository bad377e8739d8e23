//! The rule trait and rule metadata.

use serde::{Deserialize, Serialize};

use super::violation::ViolationGroup;

/// Which slice of a movement log a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordWindow {
    /// Records dated on or after the recent-window cutoff.
    Recent,
    /// Every record with a flight identifier.
    Full,
}

/// Identity and documentation of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    /// Stable id, `<dataset>.<check>`.
    pub id: String,
    /// Heading shown above the rule's results.
    pub label: String,
    /// One-sentence statement of the condition flagged.
    pub description: String,
    pub window: RecordWindow,
}

impl RuleDescriptor {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        window: RecordWindow,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            window,
        }
    }
}

/// A consistency check over one dataset.
///
/// Rules are pure: they read an immutable slice and return a fresh group.
/// Finding nothing is a normal outcome and yields an empty group.
pub trait Rule<R>: Send + Sync {
    /// Describe the rule.
    fn descriptor(&self) -> RuleDescriptor;

    /// Flag the records that violate the rule, in input order.
    fn evaluate(&self, records: &[R]) -> ViolationGroup;
}
