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

//! Map markers and their interaction flags.
//!
//! A marker wraps a geo-entity (or, for routes, a list of locations) and
//! carries the three flags the selection logic mutates. Drawing is left to the
//! host toolkit; markers only describe what to draw and answer hit-tests.

mod airport;
mod city;
mod route;

pub use airport::{AirportMarker, AltitudeBand};
pub use city::{CityMarker, TRI_SIZE};
pub use route::RouteMarker;

use thiserror::Error;

use crate::geo::{Location, MapView, ScreenPoint};

/// Errors raised while turning a geo-entity into a marker.
#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("missing required property: {0}")]
    MissingProperty(&'static str),

    #[error("invalid value for property '{property}': {value}")]
    InvalidValue { property: &'static str, value: String },
}

/// Interaction state shared by every marker kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerFlags {
    /// The pointer is over this marker.
    pub hovered: bool,
    /// This marker was clicked and holds the current focus.
    pub selected: bool,
    /// Excluded from drawing and hit-testing.
    pub hidden: bool,
}

/// A point marker that can be hovered and clicked.
pub trait Marker {
    /// Location of the wrapped entity.
    fn location(&self) -> Location;

    fn flags(&self) -> &MarkerFlags;

    fn flags_mut(&mut self) -> &mut MarkerFlags;

    /// Whether `pointer` falls inside the marker's screen footprint.
    ///
    /// This is pure geometry; callers skip hidden markers themselves.
    fn hit_test<V: MapView + ?Sized>(&self, view: &V, pointer: ScreenPoint) -> bool;

    fn is_hidden(&self) -> bool {
        self.flags().hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.flags_mut().hidden = hidden;
    }

    fn is_hovered(&self) -> bool {
        self.flags().hovered
    }

    fn set_hovered(&mut self, hovered: bool) {
        self.flags_mut().hovered = hovered;
    }

    fn is_selected(&self) -> bool {
        self.flags().selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.flags_mut().selected = selected;
    }

    /// Great-circle distance from this marker to `location` in kilometers.
    fn distance_to<V: MapView + ?Sized>(&self, view: &V, location: Location) -> f64 {
        view.distance_km(self.location(), location)
    }
}

/// Index of the first visible marker hit by `pointer`, in list order.
pub(crate) fn first_hit<M: Marker, V: MapView + ?Sized>(
    markers: &[M],
    view: &V,
    pointer: ScreenPoint,
) -> Option<usize> {
    markers
        .iter()
        .position(|marker| !marker.is_hidden() && marker.hit_test(view, pointer))
}
