//! Source column names and per-table column resolution.
//!
//! Column lookup by name happens exactly once per table here; records carry
//! typed fields afterwards. An absent column resolves to `None` and every
//! field read from it is missing.

use crate::input::DataTable;

/// Column headers of the arrival/departure movement log.
pub mod flight_column {
    pub const FLIGHT_ID: &str = "Id.Vuelo";
    pub const DATE: &str = "Data";
    /// Alternate header some exports use for [`DATE`].
    pub const DATE_ALIAS: &str = "Fecha";
    pub const STATUS: &str = "Sit.";
    pub const STATION: &str = "Est.";
    pub const STAND: &str = "Stand";
    pub const SERVICE_CATEGORY: &str = "Sv.";
    pub const SCHEDULED_TIME: &str = "ETime";
    pub const FINAL_SCHEDULED_TIME: &str = "F.ETime";
    pub const AIBT: &str = "AIBT";
    pub const ALDT: &str = "ALDT";
    pub const AOBT: &str = "AOBT";
    pub const ATOT: &str = "ATOT";
    pub const REGISTRATION: &str = "Registro";
    pub const ASSOCIATED_FLIGHT_ID: &str = "Id.Asociado";
}

/// Column headers of the environmental-impact movement report.
pub mod report_column {
    pub const MOVEMENT_TYPE: &str = "MOVIMENTO_TIPO";
    pub const SCHEDULED_DATE: &str = "PREVISTO_DATA";
    pub const BLOCKED_DATE: &str = "CALCO_DATA";
    pub const BLOCKED_TIME: &str = "CALCO_HORARIO";
    pub const TOUCH_DATE: &str = "TOQUE_DATA";
    pub const TOUCH_TIME: &str = "TOQUE_HORARIO";
    pub const AIRCRAFT_REGISTRATION: &str = "AERONAVE_MARCAS";
    pub const OPERATOR: &str = "AERONAVE_OPERADOR";
    pub const FLIGHT_NUMBER: &str = "VOO_NUMERO";
}

/// Resolved column positions of a movement log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightColumns {
    pub flight_id: Option<usize>,
    pub date: Option<usize>,
    pub status: Option<usize>,
    pub station: Option<usize>,
    pub stand: Option<usize>,
    pub service_category: Option<usize>,
    pub scheduled_time: Option<usize>,
    pub final_scheduled_time: Option<usize>,
    pub actual_in_block_time: Option<usize>,
    pub actual_landing_time: Option<usize>,
    pub actual_off_block_time: Option<usize>,
    pub actual_takeoff_time: Option<usize>,
    pub registration: Option<usize>,
    pub associated_flight_id: Option<usize>,
}

impl FlightColumns {
    /// Resolve column positions against a table's headers.
    pub fn resolve(table: &DataTable) -> Self {
        use self::flight_column as c;

        Self {
            flight_id: table.column_index(c::FLIGHT_ID),
            date: table
                .column_index(c::DATE)
                .or_else(|| table.column_index(c::DATE_ALIAS)),
            status: table.column_index(c::STATUS),
            station: table.column_index(c::STATION),
            stand: table.column_index(c::STAND),
            service_category: table.column_index(c::SERVICE_CATEGORY),
            scheduled_time: table.column_index(c::SCHEDULED_TIME),
            final_scheduled_time: table.column_index(c::FINAL_SCHEDULED_TIME),
            actual_in_block_time: table.column_index(c::AIBT),
            actual_landing_time: table.column_index(c::ALDT),
            actual_off_block_time: table.column_index(c::AOBT),
            actual_takeoff_time: table.column_index(c::ATOT),
            registration: table.column_index(c::REGISTRATION),
            associated_flight_id: table.column_index(c::ASSOCIATED_FLIGHT_ID),
        }
    }

    /// Names of expected columns the table does not carry.
    pub fn missing(&self) -> Vec<&'static str> {
        use self::flight_column as c;

        [
            (self.flight_id, c::FLIGHT_ID),
            (self.date, c::DATE),
            (self.status, c::STATUS),
            (self.station, c::STATION),
            (self.stand, c::STAND),
            (self.service_category, c::SERVICE_CATEGORY),
            (self.scheduled_time, c::SCHEDULED_TIME),
            (self.final_scheduled_time, c::FINAL_SCHEDULED_TIME),
            (self.actual_in_block_time, c::AIBT),
            (self.actual_landing_time, c::ALDT),
            (self.actual_off_block_time, c::AOBT),
            (self.actual_takeoff_time, c::ATOT),
            (self.registration, c::REGISTRATION),
            (self.associated_flight_id, c::ASSOCIATED_FLIGHT_ID),
        ]
        .into_iter()
        .filter_map(|(idx, name)| idx.is_none().then_some(name))
        .collect()
    }
}

/// Resolved column positions of a movement report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportColumns {
    pub movement_type: Option<usize>,
    pub scheduled_date: Option<usize>,
    pub blocked_date: Option<usize>,
    pub blocked_time: Option<usize>,
    pub touch_date: Option<usize>,
    pub touch_time: Option<usize>,
    pub aircraft_registration: Option<usize>,
    pub operator: Option<usize>,
    pub flight_number: Option<usize>,
}

impl ReportColumns {
    /// Resolve column positions against a table's headers.
    pub fn resolve(table: &DataTable) -> Self {
        use self::report_column as c;

        Self {
            movement_type: table.column_index(c::MOVEMENT_TYPE),
            scheduled_date: table.column_index(c::SCHEDULED_DATE),
            blocked_date: table.column_index(c::BLOCKED_DATE),
            blocked_time: table.column_index(c::BLOCKED_TIME),
            touch_date: table.column_index(c::TOUCH_DATE),
            touch_time: table.column_index(c::TOUCH_TIME),
            aircraft_registration: table.column_index(c::AIRCRAFT_REGISTRATION),
            operator: table.column_index(c::OPERATOR),
            flight_number: table.column_index(c::FLIGHT_NUMBER),
        }
    }

    /// Names of expected columns the table does not carry.
    pub fn missing(&self) -> Vec<&'static str> {
        use self::report_column as c;

        [
            (self.movement_type, c::MOVEMENT_TYPE),
            (self.scheduled_date, c::SCHEDULED_DATE),
            (self.blocked_date, c::BLOCKED_DATE),
            (self.blocked_time, c::BLOCKED_TIME),
            (self.touch_date, c::TOUCH_DATE),
            (self.touch_time, c::TOUCH_TIME),
            (self.aircraft_registration, c::AIRCRAFT_REGISTRATION),
            (self.operator, c::OPERATOR),
            (self.flight_number, c::FLIGHT_NUMBER),
        ]
        .into_iter()
        .filter_map(|(idx, name)| idx.is_none().then_some(name))
        .collect()
    }
}
