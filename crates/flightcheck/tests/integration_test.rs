//! Integration tests for Flightcheck.

use std::io::Write;
use tempfile::NamedTempFile;

use flightcheck::report::{SECTION_ARRIVAL, SECTION_DEPARTURE, SECTION_MOVEMENT_REPORT};
use flightcheck::validation::MISSING_ASSOCIATED;
use flightcheck::{Flightcheck, FlightcheckConfig, FlightcheckError, Report};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn flagged<'a>(report: &'a Report, section: &str, rule: &str) -> Vec<&'a str> {
    report
        .section(section)
        .and_then(|s| s.group(rule))
        .map(|g| {
            g.rows
                .iter()
                .filter_map(|r| r.get("Flight"))
                .collect()
        })
        .unwrap_or_default()
}

const MOVEMENTS_HEADER: &str = "Id.Vuelo;Data;Sit.;Est.;Stand;Sv.;ETime;F.ETime;AIBT;ALDT;Registro;Id.Asociado;\
Assoc. Id.Vuelo;Assoc. Data;Assoc. Sit.;Assoc. Est.;Assoc. Stand;Assoc. Sv.;Assoc. ETime;Assoc. AOBT;Assoc. ATOT;Assoc. Registro;Assoc. Id.Asociado";

fn movements(rows: &[&str]) -> NamedTempFile {
    let mut content = String::from(MOVEMENTS_HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    create_test_file(&content)
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_source_metadata_is_attached() {
    let file = movements(&["AA1;01/03/2024;OPE;IBK;;;;;;;;;;;;;;;;;;;"]);

    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .expect("Check failed");

    let arrival = report.section(SECTION_ARRIVAL).unwrap();
    let source = arrival.source.as_ref().unwrap();
    assert_eq!(source.row_count, 1);
    assert_eq!(source.format, "csv-semicolon");
    assert!(source.hash.starts_with("sha256:"));
}

#[test]
fn test_missing_file_is_an_error() {
    let result = Flightcheck::new().check_movements("/nonexistent/movements.csv", None);
    assert!(matches!(result, Err(FlightcheckError::Io { .. })));
}

#[test]
fn test_header_only_file_is_all_clear() {
    let file = movements(&[]);

    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .expect("Check failed");

    assert!(report.is_clear());
    assert_eq!(report.summary.total_groups, 16);
    for section in &report.sections {
        assert_eq!(section.total_records, 0);
        assert_eq!(section.operated_count, Some(0));
    }
}

#[test]
fn test_plain_header_only_file_is_all_clear() {
    let file = create_test_file("Id.Vuelo;Data;Sit.;Est.\n");

    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .expect("Check failed");

    assert!(report.is_clear());
    assert_eq!(report.section(SECTION_ARRIVAL).unwrap().total_records, 0);
}

#[test]
fn test_empty_file_is_an_error() {
    let file = create_test_file("");
    let result = Flightcheck::new().check_movements(file.path(), None);
    assert!(matches!(result, Err(FlightcheckError::EmptyData(_))));
}

#[test]
fn test_max_rows_limits_checked_records() {
    let file = movements(&[
        "AA1;01/03/2024;OPE;GRU;;;;;;;;;;;;;;;;;;;",
        "AA2;01/03/2024;OPE;GRU;;;;;;;;;;;;;;;;;;;",
    ]);
    let config = FlightcheckConfig {
        max_rows: Some(1),
        ..Default::default()
    };

    let report = Flightcheck::with_config(config)
        .check_movements(file.path(), None)
        .unwrap();

    assert_eq!(flagged(&report, SECTION_ARRIVAL, "arrival.station"), vec!["AA1"]);
}

// =============================================================================
// Movement log scenarios
// =============================================================================

#[test]
fn test_clean_movement_log_is_clear() {
    let file = movements(&[
        "AA1;01/03/2024;OPE;IBK;12;A;10:00;10:00;10:00;09:52;;;AA2;01/03/2024;OPE;AIR;12;A;11:00;11:00;11:12;;",
    ]);

    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .unwrap();

    assert!(report.is_clear(), "unexpected violations: {:?}", report.summary);
    assert_eq!(report.sections.len(), 2);
    assert_eq!(report.summary.total_groups, 16);
    assert_eq!(report.section(SECTION_ARRIVAL).unwrap().operated_count, Some(1));
    assert_eq!(report.section(SECTION_DEPARTURE).unwrap().operated_count, Some(1));
}

#[test]
fn test_departures_come_from_associated_columns() {
    let file = movements(&[
        "AA1;01/03/2024;OPE;IBK;;;;;;;;;AA2;01/03/2024;OPE;GRU;HOLD;;;;;;",
    ]);

    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .unwrap();

    assert!(flagged(&report, SECTION_ARRIVAL, "arrival.station").is_empty());
    assert_eq!(flagged(&report, SECTION_DEPARTURE, "departure.station"), vec!["AA2"]);
    assert_eq!(flagged(&report, SECTION_DEPARTURE, "departure.stand_hold"), vec!["AA2"]);
}

#[test]
fn test_separate_departures_file() {
    let arrivals = movements(&["AA1;01/03/2024;OPE;IBK;;;;;;;;;;;;;;;;;;;"]);
    let departures = create_test_file(
        "Id.Vuelo;Data;Sit.;Est.;Sv.\n\
         AA9;01/03/2024;OPE;AIR;E\n",
    );

    let report = Flightcheck::new()
        .check_movements(arrivals.path(), Some(departures.path()))
        .unwrap();

    let departure = report.section(SECTION_DEPARTURE).unwrap();
    assert_eq!(departure.total_records, 1);
    assert_eq!(
        flagged(&report, SECTION_DEPARTURE, "departure.commercial_category"),
        vec!["AA9"]
    );
}

#[test]
fn test_rows_without_flight_id_never_appear() {
    let file = movements(&[
        ";01/03/2024;OPE;GRU;HOLD;E;;;;;;;;;;;;;;;;;",
        "AA1;01/03/2024;OPE;GRU;;;;;;;;;;;;;;;;;;;",
    ]);

    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .unwrap();

    let arrival = report.section(SECTION_ARRIVAL).unwrap();
    assert_eq!(arrival.total_records, 1);
    assert_eq!(arrival.violation_count(), 1);
    assert_eq!(flagged(&report, SECTION_ARRIVAL, "arrival.station"), vec!["AA1"]);
}

#[test]
fn test_recent_window_only_limits_schedule_rule() {
    let file = movements(&[
        "AA1;15/01/2024;OPE;GRU;;;10:00;;10:20;;;;;;;;;;;;;;",
        "AA2;01/03/2024;OPE;IBK;;;10:00;;10:20;;;;;;;;;;;;;;",
    ]);

    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .unwrap();

    let arrival = report.section(SECTION_ARRIVAL).unwrap();
    assert_eq!(arrival.recent_records, Some(1));
    assert_eq!(flagged(&report, SECTION_ARRIVAL, "arrival.schedule"), vec!["AA2"]);
    assert_eq!(flagged(&report, SECTION_ARRIVAL, "arrival.station"), vec!["AA1"]);
}

#[test]
fn test_commercial_category_scenarios() {
    let file = movements(&[
        "AA1;01/03/2024;OPE;IBK;;E;;;;;;;;;;;;;;;;;",
        "AA2;01/03/2024;OPE;IBK;;A;;;;;;;;;;;;;;;;;",
        "AA3;01/03/2024;CAN;IBK;;E;;;;;;;;;;;;;;;;;",
    ]);

    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .unwrap();

    assert_eq!(
        flagged(&report, SECTION_ARRIVAL, "arrival.commercial_category"),
        vec!["AA1"]
    );
}

#[test]
fn test_event_order_highlights_equal_instants() {
    let file = movements(&[
        "AA1;01/03/2024;OPE;IBK;;;;09:50;10:00;10:00;;;;;;;;;;;;;",
        "AA2;01/03/2024;OPE;IBK;;;;09:50;10:05;10:00;;;;;;;;;;;;;",
        "AA3;01/03/2024;OPE;IBK;;;;09:50;09:55;10:00;;;;;;;;;;;;;",
        "AA4;01/03/2024;OPE;IBK;;;;;09:55;10:00;;;;;;;;;;;;;",
    ]);

    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .unwrap();

    let group = report
        .section(SECTION_ARRIVAL)
        .and_then(|s| s.group("arrival.event_order"))
        .unwrap();

    let rows: Vec<(&str, bool)> = group
        .rows
        .iter()
        .map(|r| (r.get("Flight").unwrap(), r.highlighted))
        .collect();
    assert_eq!(rows, vec![("AA1", true), ("AA3", false)]);
    assert!(group.warning.is_some());
}

#[test]
fn test_non_scheduled_rules() {
    let file = movements(&[
        "ZZZ-PT-ABC;01/03/2024;OPE;IBK;30;W;;;;;PT-ABC;ZZZ-PT-ABC;;;;;;;;;;;",
        "ZZZ-FAB123;01/03/2024;OPE;IBK;31;W;;;;;FAB999;;;;;;;;;;;;",
        "ZZZ-PT-XYZ;01/03/2024;OPE;IBK;32;D;;;;;PT-XYZ;ZZZ-PT-OTHER;;;;;;;;;;;",
    ]);

    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .unwrap();

    assert_eq!(
        flagged(&report, SECTION_ARRIVAL, "arrival.non_commercial_category"),
        vec!["ZZZ-PT-ABC"]
    );
    assert_eq!(
        flagged(&report, SECTION_ARRIVAL, "arrival.registration"),
        vec!["ZZZ-FAB123"]
    );

    let associated = report
        .section(SECTION_ARRIVAL)
        .and_then(|s| s.group("arrival.associated"))
        .unwrap();
    let rows: Vec<(&str, &str, bool)> = associated
        .rows
        .iter()
        .map(|r| {
            (
                r.get("Flight").unwrap(),
                r.get("Associated flight").unwrap(),
                r.highlighted,
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("ZZZ-FAB123", MISSING_ASSOCIATED, false),
            ("ZZZ-PT-XYZ", "ZZZ-PT-OTHER", true),
        ]
    );
}

#[test]
fn test_checking_twice_is_identical() {
    let file = movements(&[
        "AA1;01/03/2024;OPE;GRU;HOLD;E;10:00;09:50;10:00;10:00;;;AA2;01/03/2024;OPE;GRU;;;;11:00;10:55;;",
    ]);
    let flightcheck = Flightcheck::new();

    let first = flightcheck.check_movements(file.path(), None).unwrap();
    let second = flightcheck.check_movements(file.path(), None).unwrap();

    let groups = |report: &Report| -> Vec<_> {
        report.sections.iter().map(|s| s.groups.clone()).collect()
    };
    assert_eq!(groups(&first), groups(&second));
    assert_eq!(first.summary, second.summary);
}

// =============================================================================
// Movement report
// =============================================================================

#[test]
fn test_movement_report_date_drift() {
    let file = create_test_file(
        "MOVIMENTO_TIPO;PREVISTO_DATA;CALCO_DATA;CALCO_HORARIO;TOQUE_DATA;TOQUE_HORARIO;AERONAVE_MARCAS;AERONAVE_OPERADOR;VOO_NUMERO\n\
         P;01/03/2024;02/03/2024;00:10;01/03/2024;23:58;PRXYZ;ABC;1234.0\n\
         D;01/03/2024;01/03/2024;10:00;01/03/2024;10:15;PRXYZ;ABC;1235\n\
         D;01/03/2024;;10:00;01/03/2024;10:15;PRXYZ;ABC;1236\n",
    );

    let report = Flightcheck::new().check_report(file.path()).unwrap();

    let section = report.section(SECTION_MOVEMENT_REPORT).unwrap();
    assert_eq!(section.total_records, 3);

    let group = section.group("movement_report.chocks_touch_date").unwrap();
    assert_eq!(group.count, 1);
    let row = &group.rows[0];
    assert_eq!(row.get("Flight number"), Some("1234"));
    assert_eq!(row.get("Chocks"), Some("Chocks 02/03/2024 – 00:10"));
    assert_eq!(row.get("Landing or takeoff"), Some("Landing 01/03/2024 – 23:58"));
}

#[test]
fn test_movement_report_with_latin1_operator() {
    let mut content = b"MOVIMENTO_TIPO;PREVISTO_DATA;CALCO_DATA;CALCO_HORARIO;TOQUE_DATA;TOQUE_HORARIO;AERONAVE_MARCAS;AERONAVE_OPERADOR;VOO_NUMERO\n".to_vec();
    content.extend_from_slice(b"P;01/03/2024;02/03/2024;00:10;01/03/2024;23:58;PRXYZ;ABC;1234\n");
    content.extend_from_slice(b"D;01/03/2024;01/03/2024;10:00;01/03/2024;10:15;PRABC;Avia\xe7\xe3o S\xe3o Paulo;1235\n");
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(&content).expect("Failed to write to temp file");

    let report = Flightcheck::new()
        .check_report(file.path())
        .expect("Check failed");

    let section = report.section(SECTION_MOVEMENT_REPORT).unwrap();
    assert_eq!(section.total_records, 2);
    let group = section.group("movement_report.chocks_touch_date").unwrap();
    assert_eq!(group.count, 1);
    assert_eq!(group.rows[0].get("Flight number"), Some("1234"));
}

#[test]
fn test_report_serializes_to_json() {
    let file = movements(&["AA1;01/03/2024;OPE;GRU;;;;;;;;;;;;;;;;;;;"]);
    let report = Flightcheck::new()
        .check_movements(file.path(), None)
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["sections"][0]["name"], "arrival");
    assert_eq!(json["summary"]["total_violations"], 1);
    assert_eq!(json["sections"][0]["groups"][1]["rows"][0]["values"]["Station"], "GRU");
}
