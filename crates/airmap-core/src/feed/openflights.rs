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

//! OpenFlights `airports.dat` / `routes.dat` parsers.
//!
//! Airport record format:
//! ```text
//! <id>,<name>,<city>,<country>,<iata>,<icao>,<lat>,<lon>,<altitude>,<tz offset>,<dst>,<tz>,...
//! ```
//!
//! Route record format:
//! ```text
//! <airline>,<airline id>,<source>,<source id>,<dest>,<dest id>,<codeshare>,<stops>,<equipment>
//! ```
//!
//! Missing values are written as `\N`.

use std::io::Read;

use csv::StringRecord;
use log::{info, warn};

use super::{parse_coordinate, FeedError};
use crate::entity::{GeoEntity, RouteRecord};
use crate::geo::Location;

const AIRPORT_ID: usize = 0;
const AIRPORT_NAME: usize = 1;
const AIRPORT_CITY: usize = 2;
const AIRPORT_COUNTRY: usize = 3;
const AIRPORT_IATA: usize = 4;
const AIRPORT_ICAO: usize = 5;
const AIRPORT_LATITUDE: usize = 6;
const AIRPORT_LONGITUDE: usize = 7;
const AIRPORT_ALTITUDE: usize = 8;

const ROUTE_SOURCE_ID: usize = 3;
const ROUTE_DESTINATION_ID: usize = 5;

/// OpenFlights placeholder for a missing value.
const NULL_FIELD: &str = "\\N";

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

fn field<'r>(record: &'r StringRecord, index: usize, name: &'static str) -> Result<&'r str, FeedError> {
    record.get(index).ok_or(FeedError::MissingField(name))
}

/// Optional text field; `\N` and empty values are dropped.
fn optional_field(record: &StringRecord, index: usize) -> Option<&str> {
    record
        .get(index)
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != NULL_FIELD)
}

/// Parse every airport record from an `airports.dat` feed.
///
/// Each airport becomes a [`GeoEntity`] with the properties `name`, `city`,
/// `country`, `code` (IATA), `icao` and `altitude`. The altitude is kept as
/// the feed's text; markers interpret it.
pub fn parse_airports<R: Read>(reader: R) -> Result<Vec<GeoEntity>, FeedError> {
    let mut airports = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in csv_reader(reader).records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable airport record on line {}: {}", line + 1, e);
                skipped += 1;
                continue;
            }
        };

        match airport_from_record(&record) {
            Ok(airport) => airports.push(airport),
            Err(e) => {
                warn!("Skipping airport record on line {}: {}", line + 1, e);
                skipped += 1;
            }
        }
    }

    info!("Parsed {} airports ({} skipped)", airports.len(), skipped);
    Ok(airports)
}

fn airport_from_record(record: &StringRecord) -> Result<GeoEntity, FeedError> {
    let id = field(record, AIRPORT_ID, "id")?.trim();
    if id.is_empty() {
        return Err(FeedError::MissingField("id"));
    }

    let lat = parse_coordinate("latitude", field(record, AIRPORT_LATITUDE, "latitude")?, 90.0)?;
    let lon = parse_coordinate("longitude", field(record, AIRPORT_LONGITUDE, "longitude")?, 180.0)?;
    let altitude = field(record, AIRPORT_ALTITUDE, "altitude")?.trim();

    let mut airport = GeoEntity::new(id, Location::new(lat, lon)).with_property("altitude", altitude);

    for (index, name) in [
        (AIRPORT_NAME, "name"),
        (AIRPORT_CITY, "city"),
        (AIRPORT_COUNTRY, "country"),
        (AIRPORT_IATA, "code"),
        (AIRPORT_ICAO, "icao"),
    ] {
        if let Some(value) = optional_field(record, index) {
            airport.set_property(name, value);
        }
    }

    Ok(airport)
}

/// Parse every route record from a `routes.dat` feed.
///
/// Endpoint ids are kept as text: `\N` and other non-numeric ids are the
/// linker's concern, not the parser's.
pub fn parse_routes<R: Read>(reader: R) -> Result<Vec<RouteRecord>, FeedError> {
    let mut routes = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in csv_reader(reader).records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable route record on line {}: {}", line + 1, e);
                skipped += 1;
                continue;
            }
        };

        match route_from_record(&record) {
            Ok(route) => routes.push(route),
            Err(e) => {
                warn!("Skipping route record on line {}: {}", line + 1, e);
                skipped += 1;
            }
        }
    }

    info!("Parsed {} routes ({} skipped)", routes.len(), skipped);
    Ok(routes)
}

fn route_from_record(record: &StringRecord) -> Result<RouteRecord, FeedError> {
    let source = field(record, ROUTE_SOURCE_ID, "source")?.trim();
    let destination = field(record, ROUTE_DESTINATION_ID, "destination")?.trim();
    Ok(RouteRecord::new(source, destination))
}

#[cfg(test)]
mod tests {
    use super::*;

    const AIRPORTS: &str = r#"1,"Goroka Airport","Goroka","Papua New Guinea","GKA","AYGA",-6.081689834590001,145.391998291,5282,10,"U","Pacific/Port_Moresby","airport","OurAirports"
2,"Madang Airport","Madang","Papua New Guinea","MAG","AYMD",-5.20707988739,145.789001465,20,10,"U","Pacific/Port_Moresby","airport","OurAirports"
3,"Broken Airport","Nowhere","Nowhere","\N","\N",not-a-latitude,145.0,100,10,"U","Pacific/Port_Moresby","airport","OurAirports"
"#;

    const ROUTES: &str = r"2B,410,AER,2965,KZN,2990,,0,CR2
2B,410,ASF,2966,KZN,2990,,0,CR2
2B,410,CEK,2968,\N,\N,,0,CR2
2B,410
";

    #[test]
    fn test_parse_airports() {
        let airports = parse_airports(AIRPORTS.as_bytes()).unwrap();
        assert_eq!(airports.len(), 2);

        let goroka = &airports[0];
        assert_eq!(goroka.id(), "1");
        assert_eq!(goroka.string_property("name"), "Goroka Airport");
        assert_eq!(goroka.string_property("city"), "Goroka");
        assert_eq!(goroka.string_property("country"), "Papua New Guinea");
        assert_eq!(goroka.string_property("code"), "GKA");
        assert_eq!(goroka.integer_property("altitude"), Some(5282));
        assert!((goroka.location().lat - (-6.081_689_834_590_001)).abs() < 1e-9);
        assert!((goroka.location().lon - 145.391_998_291).abs() < 1e-9);
    }

    #[test]
    fn test_parse_airports_skips_bad_coordinates() {
        let airports = parse_airports(AIRPORTS.as_bytes()).unwrap();
        assert!(airports.iter().all(|a| a.id() != "3"));
    }

    #[test]
    fn test_parse_airports_drops_null_fields() {
        let line = "9,\"Nameless\",\\N,\"Iceland\",\\N,\"BIXX\",64.0,-22.0,30,0,\"N\",\"Atlantic/Reykjavik\",\"airport\",\"OurAirports\"\n";
        let airports = parse_airports(line.as_bytes()).unwrap();
        assert_eq!(airports.len(), 1);
        assert!(airports[0].property("city").is_none());
        assert!(airports[0].property("code").is_none());
        assert_eq!(airports[0].string_property("icao"), "BIXX");
    }

    #[test]
    fn test_parse_routes() {
        let routes = parse_routes(ROUTES.as_bytes()).unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].source, "2965");
        assert_eq!(routes[0].destination, "2990");
        assert!(routes[0].locations.is_empty());

        // Null ids are kept for the linker to reject
        assert_eq!(routes[2].destination, "\\N");
    }

    #[test]
    fn test_parse_empty_feed() {
        assert!(parse_airports("".as_bytes()).unwrap().is_empty());
        assert!(parse_routes("".as_bytes()).unwrap().is_empty());
    }
}
