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

//! Geographic primitives and the seam to the host map.

use std::fmt;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// A position on the screen in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another screen point.
    #[must_use]
    pub fn distance(self, other: ScreenPoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Great-circle distance between two locations using the Haversine formula (in km).
#[must_use]
pub fn haversine_distance_km(from: Location, to: Location) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// What the selection logic needs from the host map.
///
/// The host projects locations into the current viewport (pan and zoom are its
/// business) and may override the distance function if it has a better one.
pub trait MapView {
    /// Project a location to a screen point in the current viewport.
    fn project(&self, location: Location) -> ScreenPoint;

    /// Great-circle distance in kilometers.
    fn distance_km(&self, from: Location, to: Location) -> f64 {
        haversine_distance_km(from, to)
    }
}

impl<T: MapView + ?Sized> MapView for &T {
    fn project(&self, location: Location) -> ScreenPoint {
        (**self).project(location)
    }

    fn distance_km(&self, from: Location, to: Location) -> f64 {
        (**self).distance_km(from, to)
    }
}
