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

//! Populated-places GeoJSON parser.

use std::io::Read;

use log::{info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::FeedError;
use crate::entity::{GeoEntity, PropertyValue};
use crate::geo::Location;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    id: Option<Value>,
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

impl Geometry {
    /// GeoJSON positions are `[longitude, latitude]`.
    fn point(&self) -> Option<Location> {
        if self.kind != "Point" {
            return None;
        }
        let position = self.coordinates.as_array()?;
        let lon = position.first()?.as_f64()?;
        let lat = position.get(1)?.as_f64()?;
        ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon))
            .then(|| Location::new(lat, lon))
    }
}

fn property_value(value: &Value) -> Option<PropertyValue> {
    match value {
        Value::String(text) => Some(PropertyValue::Text(text.clone())),
        Value::Number(n) => n.as_f64().map(PropertyValue::Number),
        Value::Bool(b) => Some(PropertyValue::Text(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse every point feature of a city `FeatureCollection`.
///
/// Features without a point geometry are skipped. The feature id is used as
/// the entity id when present, otherwise the feature's position in the file.
pub fn parse_cities<R: Read>(reader: R) -> Result<Vec<GeoEntity>, FeedError> {
    let collection: FeatureCollection = serde_json::from_reader(reader)?;

    let mut cities = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(location) = feature.geometry.as_ref().and_then(Geometry::point) else {
            warn!("Skipping city feature {index}: not a valid point geometry");
            skipped += 1;
            continue;
        };

        let id = match feature.id {
            Some(Value::String(id)) => id,
            Some(Value::Number(id)) => id.to_string(),
            _ => index.to_string(),
        };

        let mut city = GeoEntity::new(id, location);
        for (name, value) in feature.properties.iter().flatten() {
            if let Some(value) = property_value(value) {
                city.set_property(name.as_str(), value);
            }
        }
        cities.push(city);
    }

    info!("Parsed {} cities ({} skipped)", cities.len(), skipped);
    Ok(cities)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "tokyo",
                "geometry": { "type": "Point", "coordinates": [139.6917, 35.6895] },
                "properties": { "name": "Tokyo", "sov0name": "Japan", "pop_max": 35676000 }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [2.3522, 48.8566] },
                "properties": { "name": "Paris", "pop_max": "unknown", "capital": true, "extra": null }
            },
            {
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
                "properties": { "name": "Not a city" }
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": { "name": "Nowhere" }
            }
        ]
    }"#;

    #[test]
    fn test_parse_cities() {
        let cities = parse_cities(CITIES.as_bytes()).unwrap();
        assert_eq!(cities.len(), 2);

        let tokyo = &cities[0];
        assert_eq!(tokyo.id(), "tokyo");
        assert_eq!(tokyo.string_property("name"), "Tokyo");
        assert_eq!(tokyo.string_property("sov0name"), "Japan");
        assert_eq!(tokyo.integer_property("pop_max"), Some(35_676_000));
        assert!((tokyo.location().lat - 35.6895).abs() < 1e-9);
        assert!((tokyo.location().lon - 139.6917).abs() < 1e-9);
    }

    #[test]
    fn test_city_without_id_uses_index() {
        let cities = parse_cities(CITIES.as_bytes()).unwrap();
        let paris = &cities[1];
        assert_eq!(paris.id(), "1");
        assert_eq!(paris.string_property("capital"), "true");
        assert!(paris.property("extra").is_none());
        assert_eq!(paris.integer_property("pop_max"), None);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = parse_cities("{ not json".as_bytes());
        assert!(matches!(result, Err(FeedError::Json(_))));
    }
}
