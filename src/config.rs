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

//! Application configuration management.
//!
//! Settings are stored as TOML through `confy` and every field has a serde
//! default, so an old or partial file still loads. The application only reads
//! the file; command-line flags are applied on top of the loaded values.

use std::path::PathBuf;

use airmap_core::{FocusThresholds, AIRPORT_FOCUS_RADIUS_KM, CITY_FOCUS_RADIUS_KM, MIN_AIRPORT_ALTITUDE};
use serde::{Deserialize, Serialize};

use crate::carto_tiles::BasemapStyle;

/// Name under which `confy` stores the configuration
pub const APP_NAME: &str = "airmap-desktop";

const CONFIG_NAME: &str = "config";

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Directory holding the feed files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// OpenFlights airports file, relative to `data_dir` unless absolute
    #[serde(default = "default_airports_file")]
    pub airports_file: PathBuf,

    /// OpenFlights routes file, relative to `data_dir` unless absolute
    #[serde(default = "default_routes_file")]
    pub routes_file: PathBuf,

    /// Populated places GeoJSON, relative to `data_dir` unless absolute
    #[serde(default = "default_cities_file")]
    pub cities_file: PathBuf,

    /// Airports at or below this altitude get no marker
    #[serde(default = "default_min_airport_altitude")]
    pub min_airport_altitude: i64,

    /// Airports farther than this from a clicked city are hidden (km)
    #[serde(default = "default_city_focus_radius_km")]
    pub city_focus_radius_km: f64,

    /// Cities farther than this from a clicked airport are hidden (km)
    #[serde(default = "default_airport_focus_radius_km")]
    pub airport_focus_radius_km: f64,

    /// Initial map zoom level
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// Initial map center latitude
    #[serde(default)]
    pub center_latitude: f64,

    /// Initial map center longitude
    #[serde(default)]
    pub center_longitude: f64,

    /// Carto basemap style
    #[serde(default)]
    pub basemap: BasemapStyle,

    /// Show the "Airport Key" window
    #[serde(default = "default_true")]
    pub show_legend: bool,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_airports_file() -> PathBuf {
    PathBuf::from("airports.dat")
}

fn default_routes_file() -> PathBuf {
    PathBuf::from("routes.dat")
}

fn default_cities_file() -> PathBuf {
    PathBuf::from("citymap.geojson")
}

fn default_min_airport_altitude() -> i64 {
    MIN_AIRPORT_ALTITUDE
}

fn default_city_focus_radius_km() -> f64 {
    CITY_FOCUS_RADIUS_KM
}

fn default_airport_focus_radius_km() -> f64 {
    AIRPORT_FOCUS_RADIUS_KM
}

fn default_zoom() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            data_dir: default_data_dir(),
            airports_file: default_airports_file(),
            routes_file: default_routes_file(),
            cities_file: default_cities_file(),
            min_airport_altitude: MIN_AIRPORT_ALTITUDE,
            city_focus_radius_km: CITY_FOCUS_RADIUS_KM,
            airport_focus_radius_km: AIRPORT_FOCUS_RADIUS_KM,
            default_zoom: default_zoom(),
            center_latitude: 0.0,
            center_longitude: 0.0,
            basemap: BasemapStyle::default(),
            show_legend: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, creating it with defaults on first run
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Marker thresholds for the map layer
    #[must_use]
    pub fn thresholds(&self) -> FocusThresholds {
        FocusThresholds {
            min_airport_altitude: self.min_airport_altitude,
            city_focus_radius_km: self.city_focus_radius_km,
            airport_focus_radius_km: self.airport_focus_radius_km,
        }
    }

    /// Resolve a feed file name against `data_dir`
    #[must_use]
    pub fn feed_path(&self, file: &std::path::Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }
}
