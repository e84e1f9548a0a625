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

use super::{Marker, MarkerFlags};
use crate::entity::GeoEntity;
use crate::geo::{Location, MapView, ScreenPoint};

/// Half-size of the city triangle in pixels.
pub const TRI_SIZE: f32 = 5.0;

/// Marker for a city from the populated-places feed.
#[derive(Debug, Clone)]
pub struct CityMarker {
    entity: GeoEntity,
    flags: MarkerFlags,
}

impl CityMarker {
    #[must_use]
    pub fn new(entity: GeoEntity) -> Self {
        Self {
            entity,
            flags: MarkerFlags::default(),
        }
    }

    #[must_use]
    pub fn entity(&self) -> &GeoEntity {
        &self.entity
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.entity.string_property("name")
    }

    /// Sovereign country name
    #[must_use]
    pub fn country(&self) -> String {
        self.entity.string_property("sov0name")
    }

    /// Maximum population estimate, 0 when missing or unparsable.
    #[must_use]
    pub fn population(&self) -> i64 {
        self.entity.integer_property("pop_max").unwrap_or(0)
    }

    #[must_use]
    pub fn title_lines(&self) -> [String; 2] {
        [
            format!("Loc: {}, {}", self.name(), self.country()),
            format!("Pop: {}", self.population()),
        ]
    }
}

impl Marker for CityMarker {
    fn location(&self) -> Location {
        self.entity.location()
    }

    fn flags(&self) -> &MarkerFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut MarkerFlags {
        &mut self.flags
    }

    /// The triangle's bounding square.
    fn hit_test<V: MapView + ?Sized>(&self, view: &V, pointer: ScreenPoint) -> bool {
        let center = view.project(self.location());
        (pointer.x - center.x).abs() <= TRI_SIZE && (pointer.y - center.y).abs() <= TRI_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, GridView};

    #[test]
    fn test_city_title() {
        let marker = CityMarker::new(testing::city("Quito", -0.22, -78.5));
        assert_eq!(
            marker.title_lines(),
            ["Loc: Quito, Nowhere".to_string(), "Pop: 100000".to_string()]
        );
    }

    #[test]
    fn test_population_defaults_to_zero() {
        let unparsable = GeoEntity::new("x", Location::new(0.0, 0.0)).with_property("pop_max", "lots");
        assert_eq!(CityMarker::new(unparsable).population(), 0);

        let missing = GeoEntity::new("y", Location::new(0.0, 0.0));
        let marker = CityMarker::new(missing);
        assert_eq!(marker.population(), 0);
        assert_eq!(marker.country(), "");
    }

    #[test]
    fn test_hit_test_square() {
        let marker = CityMarker::new(testing::city("Origin", 0.0, 0.0));
        assert!(marker.hit_test(&GridView, ScreenPoint::new(5.0, -5.0)));
        assert!(!marker.hit_test(&GridView, ScreenPoint::new(5.5, 0.0)));
        assert!(!marker.hit_test(&GridView, ScreenPoint::new(0.0, 6.0)));
    }
}
