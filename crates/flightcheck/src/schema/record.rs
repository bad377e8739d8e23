//! Typed movement records.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::types::{MovementType, OPERATED_STATUS};

/// One row of an arrival or departure movement log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Zero-based row index in the source table.
    pub source_row: usize,
    pub flight_id: String,
    /// Primary operation date.
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
    pub station: Option<String>,
    pub stand: Option<String>,
    pub service_category: Option<String>,
    pub scheduled_time: Option<NaiveDateTime>,
    pub final_scheduled_time: Option<NaiveDateTime>,
    /// AIBT.
    pub actual_in_block_time: Option<NaiveDateTime>,
    /// ALDT.
    pub actual_landing_time: Option<NaiveDateTime>,
    /// AOBT.
    pub actual_off_block_time: Option<NaiveDateTime>,
    /// ATOT.
    pub actual_takeoff_time: Option<NaiveDateTime>,
    pub registration: Option<String>,
    pub associated_flight_id: Option<String>,
}

impl FlightRecord {
    /// Create a record with only the required key set.
    pub fn new(flight_id: impl Into<String>) -> Self {
        Self {
            source_row: 0,
            flight_id: flight_id.into(),
            date: None,
            status: None,
            station: None,
            stand: None,
            service_category: None,
            scheduled_time: None,
            final_scheduled_time: None,
            actual_in_block_time: None,
            actual_landing_time: None,
            actual_off_block_time: None,
            actual_takeoff_time: None,
            registration: None,
            associated_flight_id: None,
        }
    }

    /// Whether the movement actually operated.
    pub fn is_operated(&self) -> bool {
        self.status.as_deref() == Some(OPERATED_STATUS)
    }
}

/// One row of the environmental-impact movement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Zero-based row index in the source table.
    pub source_row: usize,
    pub movement_type: Option<MovementType>,
    pub scheduled_date: Option<NaiveDate>,
    /// Chocks date.
    pub blocked_date: Option<NaiveDate>,
    /// Chocks time.
    pub blocked_time: Option<NaiveTime>,
    /// Chocks time as logged, kept for display when it is not a clock time.
    pub blocked_time_text: Option<String>,
    /// Runway contact date.
    pub touch_date: Option<NaiveDate>,
    /// Runway contact time.
    pub touch_time: Option<NaiveTime>,
    /// Runway contact time as logged.
    pub touch_time_text: Option<String>,
    pub aircraft_registration: Option<String>,
    pub operator: Option<String>,
    pub flight_number: Option<String>,
}

impl ReportRecord {
    /// Create an empty report record.
    pub fn new() -> Self {
        Self {
            source_row: 0,
            movement_type: None,
            scheduled_date: None,
            blocked_date: None,
            blocked_time: None,
            blocked_time_text: None,
            touch_date: None,
            touch_time: None,
            touch_time_text: None,
            aircraft_registration: None,
            operator: None,
            flight_number: None,
        }
    }
}

impl Default for ReportRecord {
    fn default() -> Self {
        Self::new()
    }
}
