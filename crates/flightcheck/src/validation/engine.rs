//! Rule catalogues and the engine that runs them.

use super::flight_rules::{
    AssociatedFlightRule, CommercialCategoryRule, EventOrderRule, NonCommercialCategoryRule,
    RegistrationRule, ScheduleDivergenceRule, StandHeldRule, StationRule,
};
use super::report_rules::ChocksTouchDateRule;
use super::rule::{RecordWindow, Rule, RuleDescriptor};
use super::violation::ViolationGroup;
use crate::normalize::NormalizedFlights;
use crate::schema::{DatasetRole, FlightRecord, ReportRecord};

/// Ordered flight-rule catalogue for one leg.
pub struct FlightRuleSet {
    role: DatasetRole,
    rules: Vec<Box<dyn Rule<FlightRecord>>>,
}

impl FlightRuleSet {
    /// The full catalogue for `role`, in display order.
    pub fn for_role(role: DatasetRole) -> Self {
        Self {
            role,
            rules: vec![
                Box::new(ScheduleDivergenceRule { role }),
                Box::new(StationRule { role }),
                Box::new(StandHeldRule { role }),
                Box::new(CommercialCategoryRule { role }),
                Box::new(EventOrderRule { role }),
                Box::new(RegistrationRule { role }),
                Box::new(NonCommercialCategoryRule { role }),
                Box::new(AssociatedFlightRule { role }),
            ],
        }
    }

    pub fn role(&self) -> DatasetRole {
        self.role
    }

    /// Descriptors of every rule, in catalogue order.
    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        self.rules.iter().map(|r| r.descriptor()).collect()
    }

    /// Run every rule against the window it reads.
    pub fn evaluate(&self, flights: &NormalizedFlights) -> Vec<ViolationGroup> {
        self.rules
            .iter()
            .map(|rule| {
                let descriptor = rule.descriptor();
                let records = match descriptor.window {
                    RecordWindow::Recent => &flights.recent,
                    RecordWindow::Full => &flights.full,
                };
                let group = rule.evaluate(records);
                tracing::debug!(
                    rule = %descriptor.id,
                    checked = records.len(),
                    flagged = group.count,
                    "rule evaluated"
                );
                group
            })
            .collect()
    }
}

/// Ordered movement-report rule catalogue.
pub struct ReportRuleSet {
    rules: Vec<Box<dyn Rule<ReportRecord>>>,
}

impl ReportRuleSet {
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(ChocksTouchDateRule)],
        }
    }

    /// Descriptors of every rule, in catalogue order.
    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        self.rules.iter().map(|r| r.descriptor()).collect()
    }

    /// Run every rule against the report records.
    pub fn evaluate(&self, records: &[ReportRecord]) -> Vec<ViolationGroup> {
        self.rules
            .iter()
            .map(|rule| {
                let group = rule.evaluate(records);
                tracing::debug!(
                    rule = %group.rule,
                    checked = records.len(),
                    flagged = group.count,
                    "rule evaluated"
                );
                group
            })
            .collect()
    }
}

impl Default for ReportRuleSet {
    fn default() -> Self {
        Self::new()
    }
}

/// All rule catalogues: arrival, departure and movement report.
pub struct RuleEngine {
    arrival: FlightRuleSet,
    departure: FlightRuleSet,
    report: ReportRuleSet,
}

impl RuleEngine {
    /// Create an engine with the full rule catalogue.
    pub fn new() -> Self {
        Self {
            arrival: FlightRuleSet::for_role(DatasetRole::Arrival),
            departure: FlightRuleSet::for_role(DatasetRole::Departure),
            report: ReportRuleSet::new(),
        }
    }

    /// The flight catalogue of a leg.
    pub fn flight_rules(&self, role: DatasetRole) -> &FlightRuleSet {
        match role {
            DatasetRole::Arrival => &self.arrival,
            DatasetRole::Departure => &self.departure,
        }
    }

    /// The movement-report catalogue.
    pub fn report_rules(&self) -> &ReportRuleSet {
        &self.report
    }

    /// Evaluate one leg's records.
    pub fn evaluate_flights(
        &self,
        role: DatasetRole,
        flights: &NormalizedFlights,
    ) -> Vec<ViolationGroup> {
        self.flight_rules(role).evaluate(flights)
    }

    /// Evaluate movement-report records.
    pub fn evaluate_report(&self, records: &[ReportRecord]) -> Vec<ViolationGroup> {
        self.report.evaluate(records)
    }

    /// Descriptors of every rule across all catalogues.
    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        let mut all = self.arrival.descriptors();
        all.extend(self.departure.descriptors());
        all.extend(self.report.descriptors());
        all
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
