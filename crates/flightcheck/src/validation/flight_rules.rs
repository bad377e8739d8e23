//! Consistency rules over arrival and departure movement logs.
//!
//! One rule set serves both legs; [`DatasetRole`] supplies the constants that
//! differ (expected station, which timestamps are compared). Every rule only
//! considers operated (`OPE`) movements.

use chrono::NaiveDateTime;

use super::display;
use super::rule::{RecordWindow, Rule, RuleDescriptor};
use super::violation::{HighlightKind, MISSING_ASSOCIATED, ViolationGroup};
use crate::classify::{FlightClass, classify};
use crate::normalize::recent_cutoff;
use crate::schema::{DatasetRole, FlightRecord};

/// Service categories commercial flights may not carry.
pub const COMMERCIAL_FORBIDDEN: &[&str] = &["D", "E", "K", "N", "T", "W"];

/// Service categories no `ZZZ-` movement may carry.
pub const NON_COMMERCIAL_FORBIDDEN: &[&str] = &[
    "A", "B", "C", "E", "F", "G", "H", "J", "L", "M", "N", "O", "P", "Q", "R", "S", "U", "V",
    "X", "Y", "Z",
];

/// Additional categories forbidden for general aviation.
pub const GENERAL_AVIATION_FORBIDDEN_EXTRA: &[&str] = &["W"];

/// Additional categories forbidden for military movements.
pub const MILITARY_FORBIDDEN_EXTRA: &[&str] = &["D", "K", "T"];

/// Whether `category` is forbidden for a flight of class `class`.
pub fn is_forbidden_category(class: &FlightClass, category: &str) -> bool {
    let category = category.trim();
    match class {
        FlightClass::Commercial => COMMERCIAL_FORBIDDEN.contains(&category),
        FlightClass::GeneralAviation(_) => {
            NON_COMMERCIAL_FORBIDDEN.contains(&category)
                || GENERAL_AVIATION_FORBIDDEN_EXTRA.contains(&category)
        }
        FlightClass::Military(_) => {
            NON_COMMERCIAL_FORBIDDEN.contains(&category)
                || MILITARY_FORBIDDEN_EXTRA.contains(&category)
        }
    }
}

const DATE: &str = "Date";
const FLIGHT: &str = "Flight";
const STATUS: &str = "Status";

fn status(record: &FlightRecord) -> String {
    display::text(record.status.as_deref())
}

fn date(record: &FlightRecord) -> String {
    display::date(record.date)
}

/// Operated movements whose identifier is a `ZZZ-` movement, with their class.
fn operated_non_commercial(
    records: &[FlightRecord],
) -> impl Iterator<Item = (&FlightRecord, FlightClass)> {
    records
        .iter()
        .filter(|r| r.is_operated())
        .map(|r| (r, classify(&r.flight_id)))
        .filter(|(_, class)| class.is_non_commercial())
}

/// Scheduled time differs from the recorded block time.
///
/// Arrivals compare against AIBT, departures against AOBT. Reads only the
/// recent window.
pub struct ScheduleDivergenceRule {
    pub role: DatasetRole,
}

impl ScheduleDivergenceRule {
    fn block_time(&self, record: &FlightRecord) -> Option<NaiveDateTime> {
        match self.role {
            DatasetRole::Arrival => record.actual_in_block_time,
            DatasetRole::Departure => record.actual_off_block_time,
        }
    }

    fn block_column(&self) -> &'static str {
        match self.role {
            DatasetRole::Arrival => "AIBT",
            DatasetRole::Departure => "AOBT",
        }
    }
}

impl Rule<FlightRecord> for ScheduleDivergenceRule {
    fn descriptor(&self) -> RuleDescriptor {
        let since = display::date(Some(recent_cutoff()));
        RuleDescriptor::new(
            format!("{}.schedule", self.role.key()),
            format!("Scheduled time differs from {} since {}", self.block_column(), since),
            format!(
                "Operated movement whose ETime and {} are both recorded and differ",
                self.block_column()
            ),
            RecordWindow::Recent,
        )
    }

    fn evaluate(&self, records: &[FlightRecord]) -> ViolationGroup {
        let descriptor = self.descriptor();
        let mut group =
            ViolationGroup::new(&descriptor, &[DATE, FLIGHT, "ETime", self.block_column(), STATUS]);

        for record in records.iter().filter(|r| r.is_operated()) {
            let (Some(scheduled), Some(block)) = (record.scheduled_time, self.block_time(record))
            else {
                continue;
            };
            if scheduled != block {
                group.push_row(
                    record.source_row,
                    vec![
                        date(record),
                        record.flight_id.clone(),
                        display::clock(Some(scheduled)),
                        display::clock(Some(block)),
                        status(record),
                    ],
                    false,
                );
            }
        }

        group
    }
}

/// Station code differs from the one expected for the leg.
pub struct StationRule {
    pub role: DatasetRole,
}

impl Rule<FlightRecord> for StationRule {
    fn descriptor(&self) -> RuleDescriptor {
        let expected = self.role.expected_station();
        RuleDescriptor::new(
            format!("{}.station", self.role.key()),
            format!("Operated flights with station other than {}", expected),
            format!("Operated movement with a station code other than {}", expected),
            RecordWindow::Full,
        )
    }

    fn evaluate(&self, records: &[FlightRecord]) -> ViolationGroup {
        let descriptor = self.descriptor();
        let expected = self.role.expected_station();
        let mut group = ViolationGroup::new(&descriptor, &[DATE, FLIGHT, STATUS, "Station"]);

        for record in records.iter().filter(|r| r.is_operated()) {
            match record.station.as_deref() {
                Some(station) if station != expected => group.push_row(
                    record.source_row,
                    vec![
                        date(record),
                        record.flight_id.clone(),
                        status(record),
                        station.to_string(),
                    ],
                    false,
                ),
                _ => {}
            }
        }

        group
    }
}

/// Stand left on the `HOLD` placeholder.
pub struct StandHeldRule {
    pub role: DatasetRole,
}

impl Rule<FlightRecord> for StandHeldRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            format!("{}.stand_hold", self.role.key()),
            "Stand on HOLD",
            "Operated movement whose stand is the HOLD placeholder",
            RecordWindow::Full,
        )
    }

    fn evaluate(&self, records: &[FlightRecord]) -> ViolationGroup {
        let descriptor = self.descriptor();
        let mut group = ViolationGroup::new(&descriptor, &[DATE, FLIGHT, STATUS, "Stand"]);

        for record in records.iter().filter(|r| r.is_operated()) {
            match record.stand.as_deref() {
                Some(stand) if stand.eq_ignore_ascii_case("HOLD") => group.push_row(
                    record.source_row,
                    vec![
                        date(record),
                        record.flight_id.clone(),
                        status(record),
                        stand.to_string(),
                    ],
                    false,
                ),
                _ => {}
            }
        }

        group
    }
}

/// Commercial flight carrying a category reserved for other operations.
pub struct CommercialCategoryRule {
    pub role: DatasetRole,
}

impl Rule<FlightRecord> for CommercialCategoryRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            format!("{}.commercial_category", self.role.key()),
            "Forbidden category on commercial flights",
            format!(
                "Operated commercial flight with service category in {{{}}}",
                COMMERCIAL_FORBIDDEN.join(",")
            ),
            RecordWindow::Full,
        )
    }

    fn evaluate(&self, records: &[FlightRecord]) -> ViolationGroup {
        let descriptor = self.descriptor();
        let mut group = ViolationGroup::new(&descriptor, &[DATE, FLIGHT, "Category"]);

        for record in records.iter().filter(|r| r.is_operated()) {
            let class = classify(&record.flight_id);
            if class.is_non_commercial() {
                continue;
            }
            match record.service_category.as_deref() {
                Some(category) if is_forbidden_category(&class, category) => group.push_row(
                    record.source_row,
                    vec![date(record), record.flight_id.clone(), category.to_string()],
                    false,
                ),
                _ => {}
            }
        }

        group
    }
}

/// Recorded events out of order.
///
/// Arrivals: chocks-on (AIBT) at or before touchdown (ALDT), checked only
/// once a final scheduled time exists. Departures: takeoff (ATOT) at or
/// before off-block (AOBT). Equal instants are highlighted.
pub struct EventOrderRule {
    pub role: DatasetRole,
}

impl EventOrderRule {
    /// The (earlier-expected, later-expected) instants, when comparable.
    fn instants(&self, record: &FlightRecord) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match self.role {
            DatasetRole::Arrival => {
                record.final_scheduled_time?;
                Some((record.actual_landing_time?, record.actual_in_block_time?))
            }
            DatasetRole::Departure => {
                Some((record.actual_off_block_time?, record.actual_takeoff_time?))
            }
        }
    }

    fn warning(&self) -> &'static str {
        match self.role {
            DatasetRole::Arrival => "Landing equals chocks-on: adjustment required",
            DatasetRole::Departure => "Off-block equals takeoff: adjustment required",
        }
    }
}

impl Rule<FlightRecord> for EventOrderRule {
    fn descriptor(&self) -> RuleDescriptor {
        let (label, description) = match self.role {
            DatasetRole::Arrival => (
                "Chocks-on at or before landing (AIBT ≤ ALDT)",
                "Operated arrival with F.ETime, AIBT and ALDT recorded and AIBT not after ALDT",
            ),
            DatasetRole::Departure => (
                "Takeoff at or before off-block (ATOT ≤ AOBT)",
                "Operated departure with ATOT and AOBT recorded and ATOT not after AOBT",
            ),
        };
        RuleDescriptor::new(
            format!("{}.event_order", self.role.key()),
            label,
            description,
            RecordWindow::Full,
        )
    }

    fn evaluate(&self, records: &[FlightRecord]) -> ViolationGroup {
        let descriptor = self.descriptor();
        let columns: &[&str] = match self.role {
            DatasetRole::Arrival => &[DATE, FLIGHT, "Chocks-on (AIBT)", "Landing (ALDT)"],
            DatasetRole::Departure => &[DATE, FLIGHT, "Off-block (AOBT)", "Takeoff (ATOT)"],
        };
        let mut group =
            ViolationGroup::new(&descriptor, columns).with_highlight(HighlightKind::SameInstant);

        for record in records.iter().filter(|r| r.is_operated()) {
            let Some((earlier, later)) = self.instants(record) else {
                continue;
            };
            if later > earlier {
                continue;
            }
            let values = match self.role {
                DatasetRole::Arrival => vec![
                    date(record),
                    record.flight_id.clone(),
                    display::clock(Some(later)),
                    display::clock(Some(earlier)),
                ],
                DatasetRole::Departure => vec![
                    date(record),
                    record.flight_id.clone(),
                    display::clock(Some(earlier)),
                    display::clock(Some(later)),
                ],
            };
            group.push_row(record.source_row, values, later == earlier);
        }

        group.warn_if_highlighted(self.warning())
    }
}

/// Registration embedded in a `ZZZ-` identifier differs from the logged one.
pub struct RegistrationRule {
    pub role: DatasetRole,
}

impl Rule<FlightRecord> for RegistrationRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            format!("{}.registration", self.role.key()),
            "Registration differs from flight identifier",
            "Operated ZZZ- movement whose identifier suffix is not the logged registration",
            RecordWindow::Full,
        )
    }

    fn evaluate(&self, records: &[FlightRecord]) -> ViolationGroup {
        let descriptor = self.descriptor();
        let mut group =
            ViolationGroup::new(&descriptor, &[DATE, FLIGHT, "Registration", "Category"]);

        for (record, class) in operated_non_commercial(records) {
            if class.registration() != record.registration.as_deref() {
                group.push_row(
                    record.source_row,
                    vec![
                        date(record),
                        record.flight_id.clone(),
                        display::text(record.registration.as_deref()),
                        display::text(record.service_category.as_deref()),
                    ],
                    false,
                );
            }
        }

        group
    }
}

/// `ZZZ-` movement carrying a category forbidden for its class.
pub struct NonCommercialCategoryRule {
    pub role: DatasetRole,
}

impl Rule<FlightRecord> for NonCommercialCategoryRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            format!("{}.non_commercial_category", self.role.key()),
            "Forbidden category on non-scheduled flights (ZZZ-)",
            "Operated general-aviation or military movement with a category forbidden for its class",
            RecordWindow::Full,
        )
    }

    fn evaluate(&self, records: &[FlightRecord]) -> ViolationGroup {
        let descriptor = self.descriptor();
        let mut group = ViolationGroup::new(&descriptor, &[DATE, FLIGHT, "Category"]);

        for (record, class) in operated_non_commercial(records) {
            match record.service_category.as_deref() {
                Some(category) if is_forbidden_category(&class, category) => group.push_row(
                    record.source_row,
                    vec![date(record), record.flight_id.clone(), category.to_string()],
                    false,
                ),
                _ => {}
            }
        }

        group
    }
}

/// `ZZZ-` movement not associated with itself.
///
/// Rows whose associated id is a real, different value are highlighted;
/// rows where it is simply missing show a dash.
pub struct AssociatedFlightRule {
    pub role: DatasetRole,
}

impl Rule<FlightRecord> for AssociatedFlightRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            format!("{}.associated", self.role.key()),
            "Associated flight differs from flight identifier",
            "Operated ZZZ- movement whose associated flight id is missing or different",
            RecordWindow::Full,
        )
    }

    fn evaluate(&self, records: &[FlightRecord]) -> ViolationGroup {
        let descriptor = self.descriptor();
        let mut group =
            ViolationGroup::new(&descriptor, &[DATE, FLIGHT, "Stand", "Associated flight"])
                .with_highlight(HighlightKind::AssociatedPresent);

        for (record, _) in operated_non_commercial(records) {
            let associated = record.associated_flight_id.as_deref();
            if associated == Some(record.flight_id.as_str()) {
                continue;
            }
            group.push_row(
                record.source_row,
                vec![
                    date(record),
                    record.flight_id.clone(),
                    display::text(record.stand.as_deref()),
                    associated.unwrap_or(MISSING_ASSOCIATED).to_string(),
                ],
                associated.is_some(),
            );
        }

        group
    }
}
