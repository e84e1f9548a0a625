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

//! Airport, city and route markers for interactive world maps.
//!
//! This library holds everything about the airport map that does not depend on
//! a GUI toolkit. It is organised in layers that can be used on their own:
//!
//! - **Feed layer**: parsers for the OpenFlights `airports.dat` / `routes.dat`
//!   files and for populated-places GeoJSON
//! - **Marker layer**: airport, city and route markers carrying the
//!   `hovered` / `selected` / `hidden` flags, plus screen-space hit-testing
//! - **Linker**: resolves route endpoint ids to airport locations
//! - **Selection**: hover and click handling that focuses an airport or a city
//!
//! The host map is reached only through the [`MapView`] trait, which projects
//! locations to screen points and measures great-circle distances.
//!
//! # Quick Start
//!
//! ```
//! use airmap_core::{
//!     FocusState, FocusThresholds, GeoEntity, Location, MapView, MarkerLayer, ScreenPoint,
//!     Selection,
//! };
//!
//! struct Flat;
//!
//! impl MapView for Flat {
//!     fn project(&self, location: Location) -> ScreenPoint {
//!         ScreenPoint::new(location.lon as f32 * 10.0, -location.lat as f32 * 10.0)
//!     }
//! }
//!
//! let lhasa = GeoEntity::new("4097", Location::new(29.3, 90.9))
//!     .with_property("name", "Lhasa Gonggar")
//!     .with_property("altitude", "11713");
//!
//! let mut layer = MarkerLayer::build(vec![lhasa], Vec::new(), Vec::new(), FocusThresholds::default());
//! let mut selection = Selection::default();
//!
//! selection.clicked(&mut layer, &Flat, ScreenPoint::new(909.0, -293.0));
//! assert!(matches!(selection.focus, FocusState::AirportFocused(0)));
//! ```

pub mod entity;
pub mod feed;
pub mod geo;
pub mod layer;
pub mod linker;
pub mod marker;
pub mod selection;

pub use entity::{GeoEntity, PropertyValue, RouteRecord};
pub use feed::FeedError;
pub use geo::{haversine_distance_km, Location, MapView, ScreenPoint};
pub use layer::{
    FocusThresholds, MarkerLayer, AIRPORT_FOCUS_RADIUS_KM, CITY_FOCUS_RADIUS_KM,
    MIN_AIRPORT_ALTITUDE,
};
pub use linker::{link_routes, LinkStats};
pub use marker::{AirportMarker, AltitudeBand, CityMarker, Marker, MarkerError, MarkerFlags, RouteMarker};
pub use selection::{FocusState, MarkerRef, Selection};
