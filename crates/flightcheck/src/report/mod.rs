//! Report assembly from rule results.

mod aggregator;

pub use aggregator::{
    Report, ReportSection, ReportSummary, SECTION_ARRIVAL, SECTION_DEPARTURE,
    SECTION_MOVEMENT_REPORT, aggregate,
};
