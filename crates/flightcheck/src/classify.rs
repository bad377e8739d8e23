//! Flight classification by identifier.
//!
//! Non-scheduled movements are logged under a `ZZZ-` marker followed by the
//! aircraft registration. `ZZZ-P…` registrations are civil (general
//! aviation); any other `ZZZ-` movement is treated as military.

use serde::{Deserialize, Serialize};

/// Identifier prefix of non-scheduled movements.
pub const NON_SCHEDULED_PREFIX: &str = "ZZZ-";

/// Identifier prefix of general-aviation movements.
pub const GENERAL_AVIATION_PREFIX: &str = "ZZZ-P";

/// Operational class of a flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "class", content = "registration", rename_all = "snake_case")]
pub enum FlightClass {
    /// Scheduled or charter flight with a commercial flight code.
    Commercial,
    /// Civil non-scheduled movement, carrying the embedded registration.
    GeneralAviation(String),
    /// Military non-scheduled movement, carrying the embedded registration.
    Military(String),
}

impl FlightClass {
    /// Whether the flight is a `ZZZ-` movement.
    pub fn is_non_commercial(&self) -> bool {
        !matches!(self, FlightClass::Commercial)
    }

    /// Registration parsed from the identifier, if any.
    pub fn registration(&self) -> Option<&str> {
        match self {
            FlightClass::Commercial => None,
            FlightClass::GeneralAviation(r) | FlightClass::Military(r) => Some(r),
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FlightClass::Commercial => "Commercial",
            FlightClass::GeneralAviation(_) => "General aviation",
            FlightClass::Military(_) => "Military",
        }
    }
}

/// Classify a flight by its identifier.
pub fn classify(flight_id: &str) -> FlightClass {
    if !flight_id.starts_with(NON_SCHEDULED_PREFIX) {
        return FlightClass::Commercial;
    }

    let suffix = extract_registration_suffix(flight_id);
    if flight_id.starts_with(GENERAL_AVIATION_PREFIX) {
        FlightClass::GeneralAviation(suffix)
    } else {
        FlightClass::Military(suffix)
    }
}

/// Strip a literal `ZZZ-` prefix, returning the identifier unchanged otherwise.
pub fn extract_registration_suffix(flight_id: &str) -> String {
    flight_id
        .strip_prefix(NON_SCHEDULED_PREFIX)
        .unwrap_or(flight_id)
        .to_string()
}
