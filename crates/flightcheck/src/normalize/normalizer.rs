//! Record normalizer: raw table rows to typed records.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::timestamp::{parse_date, parse_time, parse_timestamp};
use crate::input::DataTable;
use crate::schema::{FlightColumns, FlightRecord, MovementType, ReportColumns, ReportRecord};

/// First operation date of the recent window, as `(year, month, day)`.
pub const RECENT_CUTOFF: (i32, u32, u32) = (2024, 2, 1);

/// First operation date of the recent window.
pub fn recent_cutoff() -> NaiveDate {
    let (y, m, d) = RECENT_CUTOFF;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

static WHOLE_FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.0+$").unwrap());
static NUMBER_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]").unwrap());

/// Strip spreadsheet artifacts from a flight number.
///
/// Thousands separators and whitespace are removed and a float rendering
/// such as `1234.0` is read back as `1234`.
pub fn clean_flight_number(raw: &str) -> Option<String> {
    if DataTable::is_null_value(raw) {
        return None;
    }
    let trimmed = raw.trim();
    let unfloated = WHOLE_FLOAT.replace(trimmed, "$1");
    let cleaned = NUMBER_SEPARATORS.replace_all(&unfloated, "").into_owned();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Normalized movement records of one dataset.
#[derive(Debug, Clone, Default)]
pub struct NormalizedFlights {
    /// Records dated on or after the cutoff.
    pub recent: Vec<FlightRecord>,
    /// Every record with a flight identifier.
    pub full: Vec<FlightRecord>,
}

/// Converts loaded tables into typed records.
pub struct Normalizer {
    cutoff: NaiveDate,
}

impl Normalizer {
    /// Create a normalizer with the fixed recent-window cutoff.
    pub fn new() -> Self {
        Self {
            cutoff: recent_cutoff(),
        }
    }

    /// The recent-window cutoff in effect.
    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    /// Normalize a movement log into the recent and full record sets.
    pub fn normalize(&self, table: &DataTable) -> NormalizedFlights {
        let columns = FlightColumns::resolve(table);
        let missing = columns.missing();
        if columns.flight_id.is_none() {
            tracing::warn!("movement table has no flight identifier column; every row is dropped");
        } else if !missing.is_empty() {
            tracing::debug!(?missing, "movement table lacks columns; dependent rules match nothing");
        }

        let full: Vec<FlightRecord> = table
            .rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| flight_record(idx, row, &columns))
            .collect();

        let recent: Vec<FlightRecord> = full
            .iter()
            .filter(|r| r.date.is_some_and(|d| d >= self.cutoff))
            .cloned()
            .collect();

        tracing::debug!(
            rows = table.row_count(),
            kept = full.len(),
            dropped = table.row_count() - full.len(),
            recent = recent.len(),
            "normalized movement table"
        );

        NormalizedFlights { recent, full }
    }

    /// Normalize a movement report table.
    pub fn normalize_report(&self, table: &DataTable) -> Vec<ReportRecord> {
        let columns = ReportColumns::resolve(table);
        let missing = columns.missing();
        if !missing.is_empty() {
            tracing::debug!(?missing, "report table lacks columns; dependent rules match nothing");
        }

        let records: Vec<ReportRecord> = table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| report_record(idx, row, &columns))
            .collect();

        tracing::debug!(rows = records.len(), "normalized report table");
        records
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell(row: &[String], index: Option<usize>) -> Option<&str> {
    let value = row.get(index?)?;
    if DataTable::is_null_value(value) {
        None
    } else {
        Some(value.trim())
    }
}

fn text(row: &[String], index: Option<usize>) -> Option<String> {
    cell(row, index).map(str::to_string)
}

fn flight_record(source_row: usize, row: &[String], columns: &FlightColumns) -> Option<FlightRecord> {
    let flight_id = text(row, columns.flight_id)?;
    let date = cell(row, columns.date).and_then(parse_date);
    let stamp = |index: Option<usize>| cell(row, index).and_then(|v| parse_timestamp(v, date));

    Some(FlightRecord {
        source_row,
        flight_id,
        date,
        status: text(row, columns.status),
        station: text(row, columns.station),
        stand: text(row, columns.stand),
        service_category: text(row, columns.service_category),
        scheduled_time: stamp(columns.scheduled_time),
        final_scheduled_time: stamp(columns.final_scheduled_time),
        actual_in_block_time: stamp(columns.actual_in_block_time),
        actual_landing_time: stamp(columns.actual_landing_time),
        actual_off_block_time: stamp(columns.actual_off_block_time),
        actual_takeoff_time: stamp(columns.actual_takeoff_time),
        registration: text(row, columns.registration),
        associated_flight_id: text(row, columns.associated_flight_id),
    })
}

fn report_record(source_row: usize, row: &[String], columns: &ReportColumns) -> ReportRecord {
    ReportRecord {
        source_row,
        movement_type: cell(row, columns.movement_type).and_then(MovementType::from_code),
        scheduled_date: cell(row, columns.scheduled_date).and_then(parse_date),
        blocked_date: cell(row, columns.blocked_date).and_then(parse_date),
        blocked_time: cell(row, columns.blocked_time).and_then(parse_time),
        blocked_time_text: text(row, columns.blocked_time),
        touch_date: cell(row, columns.touch_date).and_then(parse_date),
        touch_time: cell(row, columns.touch_time).and_then(parse_time),
        touch_time_text: text(row, columns.touch_time),
        aircraft_registration: text(row, columns.aircraft_registration),
        operator: text(row, columns.operator),
        flight_number: cell(row, columns.flight_number).and_then(clean_flight_number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b';',
        )
    }

    #[test]
    fn test_rows_without_flight_id_are_dropped() {
        let table = make_table(
            vec!["Id.Vuelo", "Data", "Sit."],
            vec![
                vec!["AA10", "01/03/2024", "OPE"],
                vec!["", "01/03/2024", "OPE"],
                vec!["nan", "01/03/2024", "OPE"],
            ],
        );

        let normalized = Normalizer::new().normalize(&table);

        assert_eq!(normalized.full.len(), 1);
        assert_eq!(normalized.full[0].flight_id, "AA10");
        assert_eq!(normalized.full[0].source_row, 0);
    }

    #[test]
    fn test_recent_window_cutoff() {
        let table = make_table(
            vec!["Id.Vuelo", "Fecha"],
            vec![
                vec!["AA10", "31/01/2024"],
                vec!["AA11", "01/02/2024"],
                vec!["AA12", "not a date"],
                vec!["AA13", "15/03/2024"],
            ],
        );

        let normalized = Normalizer::new().normalize(&table);
        let recent: Vec<&str> = normalized.recent.iter().map(|r| r.flight_id.as_str()).collect();

        assert_eq!(normalized.full.len(), 4);
        assert_eq!(recent, vec!["AA11", "AA13"]);
    }

    #[test]
    fn test_missing_columns_become_none() {
        let table = make_table(vec!["Id.Vuelo"], vec![vec!["ZZZ-PTABC"]]);
        let normalized = Normalizer::new().normalize(&table);
        let record = &normalized.full[0];

        assert!(record.status.is_none());
        assert!(record.actual_in_block_time.is_none());
        assert!(normalized.recent.is_empty());
    }

    #[test]
    fn test_time_only_cells_anchor_to_date() {
        let table = make_table(
            vec!["Id.Vuelo", "Data", "AIBT", "ALDT"],
            vec![vec!["AA10", "01/03/2024", "10:05", "garbage"]],
        );

        let record = &Normalizer::new().normalize(&table).full[0];

        assert_eq!(
            record.actual_in_block_time,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(10, 5, 0)
        );
        assert!(record.actual_landing_time.is_none());
    }

    #[test]
    fn test_input_table_is_untouched() {
        let table = make_table(vec!["Id.Vuelo", "Fecha"], vec![vec![" AA10 ", "01/03/2024"]]);
        let before = table.clone();
        let normalized = Normalizer::new().normalize(&table);

        assert_eq!(normalized.full[0].flight_id, "AA10");
        assert_eq!(table.headers, before.headers);
        assert_eq!(table.rows, before.rows);
    }

    #[test]
    fn test_normalize_report() {
        let table = make_table(
            vec![
                "MOVIMENTO_TIPO",
                "CALCO_DATA",
                "CALCO_HORARIO",
                "TOQUE_DATA",
                "VOO_NUMERO",
            ],
            vec![vec!["P", "2024-03-01", "23:55:00", "2024-03-02", "1,234"]],
        );

        let records = Normalizer::new().normalize_report(&table);
        let record = &records[0];

        assert_eq!(record.movement_type, Some(MovementType::Landing));
        assert_eq!(record.blocked_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(
            record.blocked_time,
            chrono::NaiveTime::from_hms_opt(23, 55, 0)
        );
        assert_eq!(record.blocked_time_text.as_deref(), Some("23:55:00"));
        assert!(record.touch_time.is_none());
        assert_eq!(record.flight_number.as_deref(), Some("1234"));
    }

    #[test]
    fn test_normalize_report_keeps_unreadable_time_text() {
        let table = make_table(
            vec!["CALCO_HORARIO", "TOQUE_HORARIO"],
            vec![vec!["2355", ""]],
        );

        let record = &Normalizer::new().normalize_report(&table)[0];

        assert!(record.blocked_time.is_none());
        assert_eq!(record.blocked_time_text.as_deref(), Some("2355"));
        assert!(record.touch_time_text.is_none());
    }

    #[test]
    fn test_clean_flight_number() {
        assert_eq!(clean_flight_number("1234.0").as_deref(), Some("1234"));
        assert_eq!(clean_flight_number(" 1,234 ").as_deref(), Some("1234"));
        assert_eq!(clean_flight_number("AD 4021").as_deref(), Some("AD4021"));
        assert_eq!(clean_flight_number("nan"), None);
    }
}
