// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Feed layer for airport, route and city data.
//!
//! Parsers take any [`std::io::Read`] so they work the same on files and on
//! in-memory fixtures. A malformed record is logged and skipped; only errors
//! that make the whole feed unreadable are returned.
//!
//! Supported feeds:
//! - `airports.dat` and `routes.dat` from OpenFlights (headerless CSV)
//! - populated places as a GeoJSON `FeatureCollection` of points

mod geojson;
mod openflights;

pub use geojson::parse_cities;
pub use openflights::{parse_airports, parse_routes};

use thiserror::Error;

/// Errors that can occur while reading a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("GeoJSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for field '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Parse a coordinate, rejecting anything outside `limit` degrees.
fn parse_coordinate(field: &'static str, value: &str, limit: f64) -> Result<f64, FeedError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| FeedError::InvalidValue {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_bounds() {
        assert!((parse_coordinate("latitude", " -6.081689 ", 90.0).unwrap() + 6.081_689).abs() < 1e-9);
        assert!(parse_coordinate("latitude", "91.0", 90.0).is_err());
        assert!(parse_coordinate("longitude", "\\N", 180.0).is_err());
    }

    #[test]
    fn test_invalid_value_message() {
        let err = FeedError::InvalidValue {
            field: "altitude",
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for field 'altitude': abc");
    }
}
