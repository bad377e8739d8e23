//! Consistency rules over the environmental-impact movement report.

use super::display;
use super::rule::{RecordWindow, Rule, RuleDescriptor};
use super::violation::ViolationGroup;
use crate::schema::ReportRecord;

/// Chocks date and runway-contact date fall on different calendar days.
pub struct ChocksTouchDateRule;

impl ChocksTouchDateRule {
    fn event(label: &str, date: &str, time: &str) -> String {
        format!("{} {} – {}", label, date, time)
    }
}

impl Rule<ReportRecord> for ChocksTouchDateRule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(
            "movement_report.chocks_touch_date",
            "Chocks date differs from touch date",
            "Report row with chocks and touch dates both recorded on different days",
            RecordWindow::Full,
        )
    }

    fn evaluate(&self, records: &[ReportRecord]) -> ViolationGroup {
        let descriptor = self.descriptor();
        let mut group = ViolationGroup::new(
            &descriptor,
            &[
                "Date",
                "Movement",
                "Registration",
                "Operator",
                "Flight number",
                "Chocks",
                "Landing or takeoff",
            ],
        );

        for record in records {
            let (Some(blocked), Some(touch)) = (record.blocked_date, record.touch_date) else {
                continue;
            };
            if blocked == touch {
                continue;
            }

            let movement = record.movement_type.map(|m| m.label()).unwrap_or("Touch");
            group.push_row(
                record.source_row,
                vec![
                    display::date(record.scheduled_date),
                    display::text(record.movement_type.map(|m| m.label())),
                    display::text(record.aircraft_registration.as_deref()),
                    display::text(record.operator.as_deref()),
                    display::text(record.flight_number.as_deref()),
                    Self::event(
                        "Chocks",
                        &display::date(Some(blocked)),
                        &display::time_or_logged(
                            record.blocked_time,
                            record.blocked_time_text.as_deref(),
                        ),
                    ),
                    Self::event(
                        movement,
                        &display::date(Some(touch)),
                        &display::time_or_logged(
                            record.touch_time,
                            record.touch_time_text.as_deref(),
                        ),
                    ),
                ],
                false,
            );
        }

        group
    }
}
