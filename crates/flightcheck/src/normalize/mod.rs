//! Raw table to typed record conversion.

mod normalizer;
mod timestamp;

pub use normalizer::{
    NormalizedFlights, RECENT_CUTOFF, Normalizer, clean_flight_number, recent_cutoff,
};
pub use timestamp::{parse_date, parse_time, parse_timestamp};
