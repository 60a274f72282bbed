//! Airport records and the read-only provider that owns them.

use serde::{Deserialize, Serialize};

/// One airport as served by `GET /api/airports`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    /// IATA code, e.g. `"LHR"`.
    pub code: String,
    pub display_name: String,
    pub city: String,
}

impl Airport {
    pub fn new(code: &str, display_name: &str, city: &str) -> Self {
        Self {
            code: code.to_owned(),
            display_name: display_name.to_owned(),
            city: city.to_owned(),
        }
    }
}

/// Built-in airport table: (code, display name, city).
const SAMPLE_AIRPORTS: &[(&str, &str, &str)] = &[
    ("ATL", "Hartsfield-Jackson Atlanta International", "Atlanta"),
    ("PEK", "Beijing Capital International", "Beijing"),
    ("DXB", "Dubai International", "Dubai"),
    ("LAX", "Los Angeles International", "Los Angeles"),
    ("HND", "Tokyo Haneda International", "Tokyo"),
    ("ORD", "O'Hare International", "Chicago"),
    ("LHR", "London Heathrow", "London"),
    ("HKG", "Hong Kong International", "Hong Kong"),
    ("PVG", "Shanghai Pudong International", "Shanghai"),
    ("CDG", "Charles de Gaulle", "Paris"),
    ("DFW", "Dallas/Fort Worth International", "Dallas"),
    ("AMS", "Amsterdam Schiphol", "Amsterdam"),
    ("FRA", "Frankfurt", "Frankfurt"),
    ("IST", "Istanbul", "Istanbul"),
    ("CAN", "Guangzhou Baiyun International", "Guangzhou"),
    ("JFK", "John F. Kennedy International", "New York"),
    ("SIN", "Singapore Changi", "Singapore"),
    ("DEN", "Denver International", "Denver"),
    ("ICN", "Incheon International", "Seoul"),
    ("BKK", "Suvarnabhumi", "Bangkok"),
    ("SFO", "San Francisco International", "San Francisco"),
    ("KUL", "Kuala Lumpur International", "Kuala Lumpur"),
    ("MAD", "Madrid Barajas", "Madrid"),
    ("CTU", "Chengdu Shuangliu International", "Chengdu"),
    ("LAS", "McCarran International", "Las Vegas"),
    ("BCN", "Barcelona El Prat", "Barcelona"),
    ("SEA", "Seattle-Tacoma International", "Seattle"),
];

/// Immutable, ordered collection of airports.
///
/// Built once at startup and shared by `Arc`; there is no way to change the
/// records after construction, so any number of handlers may read it at once.
#[derive(Debug)]
pub struct AirportProvider {
    airports: Vec<Airport>,
}

impl AirportProvider {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self { airports }
    }

    /// The built-in airport table.
    pub fn sample() -> Self {
        Self::new(
            SAMPLE_AIRPORTS.iter()
                .map(|(code, name, city)| Airport::new(code, name, city))
                .collect(),
        )
    }

    /// Every airport, in table order.
    pub fn list(&self) -> &[Airport] {
        &self.airports
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl Default for AirportProvider {
    fn default() -> Self { Self::sample() }
}
