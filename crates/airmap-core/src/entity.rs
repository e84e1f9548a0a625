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

//! Geo-entities as read from the feeds, before any rendering concerns.

use std::collections::BTreeMap;
use std::fmt;

use crate::geo::Location;

/// A property value from a feed record.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
}

impl PropertyValue {
    /// Interpret the value as an integer.
    ///
    /// Text is trimmed and stripped of double quotes first. Numbers must be
    /// whole to convert.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, reason = "checked for a whole, finite value first")]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Text(text) => strip_quotes(text).trim().parse::<i64>().ok(),
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Feed strings sometimes keep their CSV quotes; they never belong in the UI.
fn strip_quotes(text: &str) -> String {
    text.replace('"', "")
}

/// A record with a location and named properties.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoEntity {
    id: String,
    location: Location,
    properties: BTreeMap<String, PropertyValue>,
}

impl GeoEntity {
    #[must_use]
    pub fn new(id: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            location,
            properties: BTreeMap::new(),
        }
    }

    /// Builder method to add a property
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set_property(name, value);
        self
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Identity, unique within the feed the entity came from.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    /// Display string for a property, empty when the property is missing.
    #[must_use]
    pub fn string_property(&self, name: &str) -> String {
        self.property(name)
            .map(|value| strip_quotes(&value.to_string()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn integer_property(&self, name: &str) -> Option<i64> {
        self.property(name).and_then(PropertyValue::as_integer)
    }
}

/// A route between two airports, keyed by their feed ids.
///
/// `locations` starts empty and is filled by [`crate::link_routes`] once both
/// endpoints resolve to known airports.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub source: String,
    pub destination: String,
    pub locations: Vec<Location>,
}

impl RouteRecord {
    #[must_use]
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            locations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_property_strips_quotes() {
        let entity = GeoEntity::new("1", Location::new(0.0, 0.0)).with_property("name", "\"Goroka\"");
        assert_eq!(entity.string_property("name"), "Goroka");
    }

    #[test]
    fn test_missing_string_property_is_empty() {
        let entity = GeoEntity::new("1", Location::new(0.0, 0.0));
        assert_eq!(entity.string_property("sov0name"), "");
    }

    #[test]
    fn test_integer_property_from_text_and_number() {
        let entity = GeoEntity::new("1", Location::new(0.0, 0.0))
            .with_property("altitude", " 5282 ")
            .with_property("pop_max", 35_676_000.0)
            .with_property("ratio", 0.5)
            .with_property("bad", "N/A");

        assert_eq!(entity.integer_property("altitude"), Some(5282));
        assert_eq!(entity.integer_property("pop_max"), Some(35_676_000));
        assert_eq!(entity.integer_property("ratio"), None);
        assert_eq!(entity.integer_property("bad"), None);
        assert_eq!(entity.integer_property("missing"), None);
    }

    #[test]
    fn test_whole_number_displays_without_fraction() {
        assert_eq!(PropertyValue::Number(1200.0).to_string(), "1200");
        assert_eq!(PropertyValue::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_new_route_has_no_locations() {
        let route = RouteRecord::new("2965", "2990");
        assert!(route.locations.is_empty());
    }
}
