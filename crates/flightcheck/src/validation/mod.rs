//! Rule engine for flagging inconsistent movement records.

mod display;
mod engine;
mod flight_rules;
mod report_rules;
mod rule;
mod violation;

pub use engine::{FlightRuleSet, ReportRuleSet, RuleEngine};
pub use flight_rules::{
    AssociatedFlightRule, CommercialCategoryRule, COMMERCIAL_FORBIDDEN, EventOrderRule,
    GENERAL_AVIATION_FORBIDDEN_EXTRA, MILITARY_FORBIDDEN_EXTRA, NON_COMMERCIAL_FORBIDDEN,
    NonCommercialCategoryRule, RegistrationRule, ScheduleDivergenceRule, StandHeldRule,
    StationRule, is_forbidden_category,
};
pub use report_rules::ChocksTouchDateRule;
pub use rule::{RecordWindow, Rule, RuleDescriptor};
pub use violation::{HighlightKind, MISSING_ASSOCIATED, ViolationGroup, ViolationRow};
