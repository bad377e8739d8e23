//! Typed records and the source-column layout they are read from.

mod columns;
mod record;
mod types;

pub use columns::{FlightColumns, ReportColumns, flight_column, report_column};
pub use record::{FlightRecord, ReportRecord};
pub use types::{DatasetRole, MovementType, OPERATED_STATUS};
