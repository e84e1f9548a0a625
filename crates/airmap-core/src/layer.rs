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

//! The full set of markers shown on the map.
//!
//! Markers are built once from the loaded feeds and live for the rest of the
//! process; interaction only flips their flags.

use std::collections::HashMap;

use log::{info, warn};

use crate::entity::{GeoEntity, RouteRecord};
use crate::geo::Location;
use crate::linker::{link_routes, LinkStats};
use crate::marker::{AirportMarker, CityMarker, Marker, RouteMarker};

/// Airports at or below this altitude are not shown.
pub const MIN_AIRPORT_ALTITUDE: i64 = 4000;

/// Airports farther than this from a focused city are hidden (km).
pub const CITY_FOCUS_RADIUS_KM: f64 = 500.0;

/// Cities farther than this from a focused airport are hidden (km).
pub const AIRPORT_FOCUS_RADIUS_KM: f64 = 1000.0;

/// The numeric knobs of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusThresholds {
    /// Minimum altitude (exclusive) for an airport to get a marker.
    pub min_airport_altitude: i64,
    /// Radius around a focused city inside which airports stay visible.
    pub city_focus_radius_km: f64,
    /// Radius around a focused airport inside which cities stay visible.
    pub airport_focus_radius_km: f64,
}

impl Default for FocusThresholds {
    fn default() -> Self {
        Self {
            min_airport_altitude: MIN_AIRPORT_ALTITUDE,
            city_focus_radius_km: CITY_FOCUS_RADIUS_KM,
            airport_focus_radius_km: AIRPORT_FOCUS_RADIUS_KM,
        }
    }
}

/// Airport, city and route markers in draw and hit-test order.
#[derive(Debug, Clone)]
pub struct MarkerLayer {
    pub(crate) airports: Vec<AirportMarker>,
    pub(crate) cities: Vec<CityMarker>,
    pub(crate) routes: Vec<RouteMarker>,
    thresholds: FocusThresholds,
    link_stats: LinkStats,
}

impl MarkerLayer {
    /// Build every marker from the loaded feeds.
    ///
    /// Routes are linked against all airports that parsed, so a route keeps its
    /// segment even when one of its airports is below the altitude cut. Only
    /// airports above `min_airport_altitude` become markers.
    #[must_use]
    pub fn build(
        airports: Vec<GeoEntity>,
        cities: Vec<GeoEntity>,
        routes: Vec<RouteRecord>,
        thresholds: FocusThresholds,
    ) -> Self {
        let mut airport_locations: HashMap<i64, Location> = HashMap::with_capacity(airports.len());
        let mut airport_markers = Vec::new();
        let mut below_minimum = 0usize;
        let mut malformed = 0usize;

        for entity in airports {
            let id = entity.id().to_string();
            match AirportMarker::new(entity) {
                Ok(marker) => {
                    airport_locations.insert(marker.airport_id(), marker.location());
                    if marker.altitude() > thresholds.min_airport_altitude {
                        airport_markers.push(marker);
                    } else {
                        below_minimum += 1;
                    }
                }
                Err(e) => {
                    warn!("Skipping airport {}: {}", id, e);
                    malformed += 1;
                }
            }
        }

        info!(
            "Built {} airport markers ({} at or below {}, {} malformed)",
            airport_markers.len(),
            below_minimum,
            thresholds.min_airport_altitude,
            malformed
        );

        let city_markers: Vec<CityMarker> = cities.into_iter().map(CityMarker::new).collect();
        info!("Built {} city markers", city_markers.len());

        let (route_markers, link_stats) = link_routes(&airport_locations, routes);

        Self {
            airports: airport_markers,
            cities: city_markers,
            routes: route_markers,
            thresholds,
            link_stats,
        }
    }

    #[must_use]
    pub fn airports(&self) -> &[AirportMarker] {
        &self.airports
    }

    #[must_use]
    pub fn cities(&self) -> &[CityMarker] {
        &self.cities
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteMarker] {
        &self.routes
    }

    #[must_use]
    pub fn thresholds(&self) -> FocusThresholds {
        self.thresholds
    }

    #[must_use]
    pub fn link_stats(&self) -> LinkStats {
        self.link_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_default_thresholds() {
        let thresholds = FocusThresholds::default();
        assert_eq!(thresholds.min_airport_altitude, 4000);
        assert!((thresholds.city_focus_radius_km - 500.0).abs() < f64::EPSILON);
        assert!((thresholds.airport_focus_radius_km - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_low_airports_are_never_markers() {
        let airports = vec![
            testing::airport("1", 0.0, 0.0, 3999),
            testing::airport("2", 1.0, 1.0, 4000),
            testing::airport("3", 2.0, 2.0, 4001),
            testing::airport("4", 3.0, 3.0, -12),
        ];

        let layer = MarkerLayer::build(airports, Vec::new(), Vec::new(), FocusThresholds::default());

        let ids: Vec<i64> = layer.airports().iter().map(AirportMarker::airport_id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_malformed_airports_are_skipped() {
        let airports = vec![
            testing::airport("abc", 0.0, 0.0, 6000),
            GeoEntity::new("5", Location::new(0.0, 0.0)).with_property("altitude", "\\N"),
            testing::airport("6", 0.0, 0.0, 6000),
        ];

        let layer = MarkerLayer::build(airports, Vec::new(), Vec::new(), FocusThresholds::default());
        assert_eq!(layer.airports().len(), 1);
        assert_eq!(layer.airports()[0].airport_id(), 6);
    }

    #[test]
    fn test_custom_minimum_altitude() {
        let thresholds = FocusThresholds {
            min_airport_altitude: 0,
            ..FocusThresholds::default()
        };
        let airports = vec![testing::airport("1", 0.0, 0.0, 20), testing::airport("2", 0.0, 0.0, 0)];

        let layer = MarkerLayer::build(airports, Vec::new(), Vec::new(), thresholds);
        assert_eq!(layer.airports().len(), 1);
        assert_eq!(layer.thresholds(), thresholds);
    }

    #[test]
    fn test_routes_link_against_every_parsed_airport() {
        // A1 is shown, A2 is below the altitude cut
        let airports = vec![
            testing::airport("1", 0.0, 0.0, 6000),
            testing::airport("2", 10.0, 0.0, 3000),
        ];
        let routes = vec![testing::route("1", "2")];

        let layer = MarkerLayer::build(airports, Vec::new(), routes, FocusThresholds::default());

        assert_eq!(layer.airports().len(), 1);
        assert_eq!(layer.routes().len(), 1);
        assert_eq!(
            layer.routes()[0].locations(),
            &[Location::new(0.0, 0.0), Location::new(10.0, 0.0)]
        );
        assert!(layer.routes()[0].is_hidden());
        assert_eq!(layer.link_stats().linked, 1);
    }

    #[test]
    fn test_cities_keep_feed_order() {
        let cities = vec![testing::city("Lima", -12.0, -77.0), testing::city("La Paz", -16.5, -68.1)];
        let layer = MarkerLayer::build(Vec::new(), cities, Vec::new(), FocusThresholds::default());
        let names: Vec<String> = layer.cities().iter().map(CityMarker::name).collect();
        assert_eq!(names, vec!["Lima", "La Paz"]);
    }
}
