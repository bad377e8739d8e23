//! Flightcheck: consistency checks for airport movement logs.
//!
//! Flightcheck loads tabular movement exports, normalizes them into typed
//! flight records and runs a catalogue of rules that flag inconsistent
//! records: schedule divergence, wrong station, held stands, category
//! mismatches, out-of-order events, registration and turnaround mismatches,
//! and chocks/touch date drift in the movement report.
//!
//! # Core Principles
//!
//! - **Read-only**: Input tables are never modified
//! - **Graceful degradation**: Missing columns and unparsable cells mean
//!   "no match", never a failure
//! - **Explicit schema**: Each record is typed once, before any rule runs
//!
//! # Example
//!
//! ```no_run
//! use flightcheck::Flightcheck;
//!
//! let flightcheck = Flightcheck::new();
//! let report = flightcheck.check_movements("movements.csv", None).unwrap();
//!
//! for section in &report.sections {
//!     println!("{}: {} violations", section.title, section.violation_count());
//! }
//! ```

pub mod classify;
pub mod error;
pub mod input;
pub mod normalize;
pub mod report;
pub mod schema;
pub mod validation;

mod flightcheck;

pub use crate::flightcheck::{Flightcheck, FlightcheckConfig};
pub use classify::{FlightClass, classify, extract_registration_suffix};
pub use error::{FlightcheckError, Result};
pub use input::{DataTable, SourceMetadata};
pub use normalize::{NormalizedFlights, Normalizer};
pub use report::{Report, ReportSection, ReportSummary, aggregate};
pub use schema::{DatasetRole, FlightRecord, MovementType, ReportRecord};
pub use validation::{RecordWindow, Rule, RuleDescriptor, RuleEngine, ViolationGroup, ViolationRow};
