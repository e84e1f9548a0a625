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

//! Loading of the airport, route and city feeds from disk.
//!
//! Data sources:
//! - Airports: OpenFlights `airports.dat`
//! - Routes: OpenFlights `routes.dat`
//! - Cities: populated places as GeoJSON points
//!
//! A feed that cannot be read is reported and left empty so the map still
//! opens with whatever did load.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use airmap_core::feed::{parse_airports, parse_cities, parse_routes};
use airmap_core::{FocusThresholds, GeoEntity, MarkerLayer, RouteRecord};
use log::{error, info};

use crate::config::AppConfig;

/// Locations of the three feed files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPaths {
    pub airports: PathBuf,
    pub routes: PathBuf,
    pub cities: PathBuf,
}

impl FeedPaths {
    /// Resolve the feed files named in the configuration
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            airports: config.feed_path(&config.airports_file),
            routes: config.feed_path(&config.routes_file),
            cities: config.feed_path(&config.cities_file),
        }
    }
}

/// Raw records from the feeds, before markers are built
#[derive(Debug, Default)]
pub struct MapData {
    pub airports: Vec<GeoEntity>,
    pub routes: Vec<RouteRecord>,
    pub cities: Vec<GeoEntity>,
}

impl MapData {
    /// Load airports from an OpenFlights file
    pub fn load_airports<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, Box<dyn std::error::Error>> {
        let reader = BufReader::new(File::open(path)?);
        self.airports = parse_airports(reader)?;
        Ok(self.airports.len())
    }

    /// Load routes from an OpenFlights file
    pub fn load_routes<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, Box<dyn std::error::Error>> {
        let reader = BufReader::new(File::open(path)?);
        self.routes = parse_routes(reader)?;
        Ok(self.routes.len())
    }

    /// Load cities from a GeoJSON file
    pub fn load_cities<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, Box<dyn std::error::Error>> {
        let reader = BufReader::new(File::open(path)?);
        self.cities = parse_cities(reader)?;
        Ok(self.cities.len())
    }

    /// Load every feed, collecting a message for each one that failed
    #[must_use]
    pub fn load(paths: &FeedPaths) -> (Self, Vec<String>) {
        let mut data = Self::default();
        let mut failures = Vec::new();

        if let Err(e) = data.load_airports(&paths.airports) {
            failures.push(report("airports", &paths.airports, e.as_ref()));
        }
        if let Err(e) = data.load_routes(&paths.routes) {
            failures.push(report("routes", &paths.routes, e.as_ref()));
        }
        if let Err(e) = data.load_cities(&paths.cities) {
            failures.push(report("cities", &paths.cities, e.as_ref()));
        }

        info!(
            "Loaded {} airports, {} routes, {} cities",
            data.airports.len(),
            data.routes.len(),
            data.cities.len()
        );

        (data, failures)
    }

    /// Build the marker layer, consuming the raw records
    #[must_use]
    pub fn into_layer(self, thresholds: FocusThresholds) -> MarkerLayer {
        MarkerLayer::build(self.airports, self.cities, self.routes, thresholds)
    }
}

fn report(feed: &str, path: &Path, e: &dyn std::error::Error) -> String {
    let message = format!("Failed to load {} from {}: {}", feed, path.display(), e);
    error!("{}", message);
    message
}
