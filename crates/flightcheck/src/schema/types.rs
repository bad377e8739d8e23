//! Small enumerations shared by records, rules and reports.

use serde::{Deserialize, Serialize};

/// Status code of a movement that actually operated.
pub const OPERATED_STATUS: &str = "OPE";

/// Which leg of a movement log a record set describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetRole {
    Arrival,
    Departure,
}

impl DatasetRole {
    /// Station code every operated movement of this leg must carry.
    pub fn expected_station(&self) -> &'static str {
        match self {
            DatasetRole::Arrival => "IBK",
            DatasetRole::Departure => "AIR",
        }
    }

    /// Stable prefix used in rule ids and section names.
    pub fn key(&self) -> &'static str {
        match self {
            DatasetRole::Arrival => "arrival",
            DatasetRole::Departure => "departure",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DatasetRole::Arrival => "Arrivals",
            DatasetRole::Departure => "Departures",
        }
    }
}

/// Kind of runway event in the movement report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Code `P`.
    Landing,
    /// Code `D`.
    Takeoff,
}

impl MovementType {
    /// Parse the report's single-letter movement code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "P" => Some(MovementType::Landing),
            "D" => Some(MovementType::Takeoff),
            _ => None,
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            MovementType::Landing => "Landing",
            MovementType::Takeoff => "Takeoff",
        }
    }
}
