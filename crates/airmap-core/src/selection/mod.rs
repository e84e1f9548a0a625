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

//! Hover and click handling.
//!
//! Both handlers take the current state and return the next one; nothing is
//! kept behind the caller's back. Airports are always scanned before cities
//! and the first visible marker under the pointer wins.
//!
//! Clicking follows a three-state machine:
//!
//! ```text
//!            click airport                    click city
//!   Idle ─────────────────► AirportFocused    Idle ──────────► CityFocused
//!    ▲                            │             ▲                   │
//!    └──────── any click ─────────┘             └──── any click ────┘
//! ```
//!
//! A click while focused always returns to `Idle`, even on another marker.

use log::debug;

use crate::geo::{Location, MapView, ScreenPoint};
use crate::layer::MarkerLayer;
use crate::marker::{first_hit, Marker, MarkerFlags};

/// Reference to a point marker in a [`MarkerLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRef {
    Airport(usize),
    City(usize),
}

/// Click state of the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusState {
    /// Nothing clicked; every airport and city is visible.
    #[default]
    Idle,
    /// An airport was clicked; its routes and reachable airports are shown.
    AirportFocused(usize),
    /// A city was clicked; only nearby airports are shown.
    CityFocused(usize),
}

impl FocusState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The clicked marker, if any.
    #[must_use]
    pub fn focused(&self) -> Option<MarkerRef> {
        match *self {
            Self::Idle => None,
            Self::AirportFocused(index) => Some(MarkerRef::Airport(index)),
            Self::CityFocused(index) => Some(MarkerRef::City(index)),
        }
    }
}

impl MarkerLayer {
    /// Location of a referenced marker.
    #[must_use]
    pub fn location_of(&self, marker: MarkerRef) -> Option<Location> {
        match marker {
            MarkerRef::Airport(index) => self.airports.get(index).map(Marker::location),
            MarkerRef::City(index) => self.cities.get(index).map(Marker::location),
        }
    }

    /// Flags of a referenced marker.
    #[must_use]
    pub fn flags_of(&self, marker: MarkerRef) -> Option<MarkerFlags> {
        match marker {
            MarkerRef::Airport(index) => self.airports.get(index).map(|m| *m.flags()),
            MarkerRef::City(index) => self.cities.get(index).map(|m| *m.flags()),
        }
    }

    fn flags_of_mut(&mut self, marker: MarkerRef) -> Option<&mut MarkerFlags> {
        match marker {
            MarkerRef::Airport(index) => self.airports.get_mut(index).map(Marker::flags_mut),
            MarkerRef::City(index) => self.cities.get_mut(index).map(Marker::flags_mut),
        }
    }

    /// First visible airport, then first visible city, under `pointer`.
    fn hit<V: MapView + ?Sized>(&self, view: &V, pointer: ScreenPoint) -> Option<MarkerRef> {
        first_hit(&self.airports, view, pointer)
            .map(MarkerRef::Airport)
            .or_else(|| first_hit(&self.cities, view, pointer).map(MarkerRef::City))
    }
}

/// Move the hover to whatever is under `pointer`.
///
/// `previous` is the marker returned by the last call. A `pointer` of `None`
/// (the pointer left the map) clears the hover.
pub fn update_hover<V: MapView + ?Sized>(
    layer: &mut MarkerLayer,
    previous: Option<MarkerRef>,
    view: &V,
    pointer: Option<ScreenPoint>,
) -> Option<MarkerRef> {
    if let Some(flags) = previous.and_then(|marker| layer.flags_of_mut(marker)) {
        flags.hovered = false;
    }

    let hovered = layer.hit(view, pointer?)?;
    if let Some(flags) = layer.flags_of_mut(hovered) {
        flags.hovered = true;
    }
    Some(hovered)
}

/// Apply a click at `pointer` and return the next focus state.
pub fn handle_click<V: MapView + ?Sized>(
    layer: &mut MarkerLayer,
    state: FocusState,
    view: &V,
    pointer: ScreenPoint,
) -> FocusState {
    if !state.is_idle() {
        clear_focus(layer, state);
        return FocusState::Idle;
    }

    match layer.hit(view, pointer) {
        Some(MarkerRef::Airport(index)) => {
            focus_airport(layer, index, view);
            FocusState::AirportFocused(index)
        }
        Some(MarkerRef::City(index)) => {
            focus_city(layer, index, view);
            FocusState::CityFocused(index)
        }
        None => FocusState::Idle,
    }
}

/// Show the airport's routes and reachable airports, and cities within range.
fn focus_airport<V: MapView + ?Sized>(layer: &mut MarkerLayer, index: usize, view: &V) {
    let radius_km = layer.thresholds().airport_focus_radius_km;
    let clicked = &mut layer.airports[index];
    clicked.set_selected(true);
    let origin = clicked.location();

    debug!(
        "Focusing airport {} ({}) at {}",
        clicked.name(),
        clicked.airport_id(),
        origin
    );

    let mut reachable: Vec<Location> = Vec::new();
    for route in layer.routes.iter_mut().filter(|route| route.touches(origin)) {
        route.set_hidden(false);
        reachable.extend(route.far_end());
    }

    for (i, airport) in layer.airports.iter_mut().enumerate() {
        if i != index && !reachable.contains(&airport.location()) {
            airport.set_hidden(true);
        }
    }

    for city in &mut layer.cities {
        if city.distance_to(view, origin) > radius_km {
            city.set_hidden(true);
        }
    }

    debug!("{} destinations reachable", reachable.len());
}

/// Keep only the clicked city and the airports within range of it.
fn focus_city<V: MapView + ?Sized>(layer: &mut MarkerLayer, index: usize, view: &V) {
    let radius_km = layer.thresholds().city_focus_radius_km;
    let clicked = &mut layer.cities[index];
    clicked.set_selected(true);
    let origin = clicked.location();

    debug!("Focusing city {} at {}", clicked.name(), origin);

    for (i, city) in layer.cities.iter_mut().enumerate() {
        if i != index {
            city.set_hidden(true);
        }
    }

    for airport in &mut layer.airports {
        if airport.distance_to(view, origin) > radius_km {
            airport.set_hidden(true);
        }
    }
}

/// Hide every route, show every airport and city, and drop the selection.
fn clear_focus(layer: &mut MarkerLayer, state: FocusState) {
    debug!("Clearing focus {:?}", state);

    for route in &mut layer.routes {
        route.set_hidden(true);
    }
    for airport in &mut layer.airports {
        airport.set_hidden(false);
    }
    for city in &mut layer.cities {
        city.set_hidden(false);
    }

    if let Some(flags) = state.focused().and_then(|marker| layer.flags_of_mut(marker)) {
        flags.selected = false;
    }
}

/// Hover and focus state of one map, for hosts that keep it in one place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub hover: Option<MarkerRef>,
    pub focus: FocusState,
}

impl Selection {
    /// Pointer moved (or left the map when `pointer` is `None`).
    pub fn pointer_moved<V: MapView + ?Sized>(
        &mut self,
        layer: &mut MarkerLayer,
        view: &V,
        pointer: Option<ScreenPoint>,
    ) {
        self.hover = update_hover(layer, self.hover, view, pointer);
    }

    /// Pointer clicked at `pointer`.
    pub fn clicked<V: MapView + ?Sized>(
        &mut self,
        layer: &mut MarkerLayer,
        view: &V,
        pointer: ScreenPoint,
    ) -> FocusState {
        self.focus = handle_click(layer, self.focus, view, pointer);
        self.focus
    }
}
