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

use super::{Marker, MarkerError, MarkerFlags};
use crate::entity::GeoEntity;
use crate::geo::{Location, MapView, ScreenPoint};

/// Upper bound (exclusive) of the low altitude band.
const LOW_BAND_CEILING: i64 = 5000;
/// Upper bound (exclusive) of the medium altitude band.
const MEDIUM_BAND_CEILING: i64 = 10000;

/// Altitude band that decides an airport's color and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltitudeBand {
    /// Below 5000
    Low,
    /// 5000 up to (not including) 10000
    Medium,
    /// 10000 and above
    High,
}

impl AltitudeBand {
    pub const ALL: [AltitudeBand; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub fn from_altitude(altitude: i64) -> Self {
        if altitude < LOW_BAND_CEILING {
            Self::Low
        } else if altitude < MEDIUM_BAND_CEILING {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Marker radius in pixels
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Low => 8.0,
            Self::Medium => 10.0,
            Self::High => 12.0,
        }
    }

    /// Fill color: red, blue, yellow
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Low => (255, 0, 0),
            Self::Medium => (0, 0, 255),
            Self::High => (255, 255, 0),
        }
    }

    /// Legend text for the band
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "< 5000",
            Self::Medium => "< 10 000",
            Self::High => "> 10 000",
        }
    }
}

/// Marker for an airport.
///
/// Built from a geo-entity whose id is the numeric OpenFlights id and whose
/// `altitude` property is an integer. The display properties (`name`, `city`,
/// `country`, `code`) fall back to empty strings.
#[derive(Debug, Clone)]
pub struct AirportMarker {
    entity: GeoEntity,
    airport_id: i64,
    altitude: i64,
    flags: MarkerFlags,
}

impl AirportMarker {
    pub fn new(entity: GeoEntity) -> Result<Self, MarkerError> {
        let airport_id = entity
            .id()
            .trim()
            .parse::<i64>()
            .ok()
            .ok_or_else(|| MarkerError::InvalidValue {
                property: "id",
                value: entity.id().to_string(),
            })?;

        let altitude = match entity.property("altitude") {
            None => return Err(MarkerError::MissingProperty("altitude")),
            Some(value) => value.as_integer().ok_or_else(|| MarkerError::InvalidValue {
                property: "altitude",
                value: value.to_string(),
            })?,
        };

        Ok(Self {
            entity,
            airport_id,
            altitude,
            flags: MarkerFlags::default(),
        })
    }

    #[must_use]
    pub fn entity(&self) -> &GeoEntity {
        &self.entity
    }

    /// Numeric id routes refer to.
    #[must_use]
    pub fn airport_id(&self) -> i64 {
        self.airport_id
    }

    #[must_use]
    pub fn altitude(&self) -> i64 {
        self.altitude
    }

    #[must_use]
    pub fn altitude_band(&self) -> AltitudeBand {
        AltitudeBand::from_altitude(self.altitude)
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.entity.string_property("name")
    }

    #[must_use]
    pub fn city(&self) -> String {
        self.entity.string_property("city")
    }

    #[must_use]
    pub fn country(&self) -> String {
        self.entity.string_property("country")
    }

    #[must_use]
    pub fn code(&self) -> String {
        self.entity.string_property("code")
    }

    /// Tooltip shown while the marker is hovered.
    #[must_use]
    pub fn title_lines(&self) -> [String; 2] {
        [
            format!("Name: {}", self.name()),
            format!("Loc: {}, {}", self.country(), self.city()),
        ]
    }
}

impl Marker for AirportMarker {
    fn location(&self) -> Location {
        self.entity.location()
    }

    fn flags(&self) -> &MarkerFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut MarkerFlags {
        &mut self.flags
    }

    fn hit_test<V: MapView + ?Sized>(&self, view: &V, pointer: ScreenPoint) -> bool {
        view.project(self.location()).distance(pointer) <= self.altitude_band().radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, GridView};

    #[test]
    fn test_altitude_bands() {
        assert_eq!(AltitudeBand::from_altitude(4001), AltitudeBand::Low);
        assert_eq!(AltitudeBand::from_altitude(4999), AltitudeBand::Low);
        assert_eq!(AltitudeBand::from_altitude(5000), AltitudeBand::Medium);
        assert_eq!(AltitudeBand::from_altitude(9999), AltitudeBand::Medium);
        assert_eq!(AltitudeBand::from_altitude(10000), AltitudeBand::High);
        assert_eq!(AltitudeBand::from_altitude(14472), AltitudeBand::High);
    }

    #[test]
    fn test_band_style() {
        assert_eq!(AltitudeBand::Low.rgb(), (255, 0, 0));
        assert!((AltitudeBand::Low.radius() - 8.0).abs() < f32::EPSILON);
        assert_eq!(AltitudeBand::Medium.rgb(), (0, 0, 255));
        assert!((AltitudeBand::Medium.radius() - 10.0).abs() < f32::EPSILON);
        assert_eq!(AltitudeBand::High.rgb(), (255, 255, 0));
        assert!((AltitudeBand::High.radius() - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_new_airport_marker() {
        let marker = AirportMarker::new(testing::airport("2279", 27.7, 85.3, 4390)).unwrap();
        assert_eq!(marker.airport_id(), 2279);
        assert_eq!(marker.altitude(), 4390);
        assert_eq!(marker.flags(), &MarkerFlags::default());
        assert_eq!(
            marker.title_lines(),
            ["Name: Airport 2279".to_string(), "Loc: Nowhere, Somewhere".to_string()]
        );
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let result = AirportMarker::new(testing::airport("LHR", 51.47, -0.45, 83));
        assert!(matches!(result, Err(MarkerError::InvalidValue { property: "id", .. })));
    }

    #[test]
    fn test_bad_altitude_is_rejected() {
        let missing = GeoEntity::new("1", Location::new(0.0, 0.0));
        assert!(matches!(
            AirportMarker::new(missing),
            Err(MarkerError::MissingProperty("altitude"))
        ));

        let malformed = GeoEntity::new("1", Location::new(0.0, 0.0)).with_property("altitude", "high");
        assert!(matches!(
            AirportMarker::new(malformed),
            Err(MarkerError::InvalidValue { property: "altitude", .. })
        ));
    }

    #[test]
    fn test_hit_test_uses_band_radius() {
        let low = AirportMarker::new(testing::airport("1", 0.0, 0.0, 4500)).unwrap();
        let high = AirportMarker::new(testing::airport("2", 0.0, 0.0, 12000)).unwrap();

        // 1.1 degrees east is 11 pixels away under the grid view
        let pointer = testing::screen(0.0, 1.1);
        assert!(!low.hit_test(&GridView, pointer));
        assert!(high.hit_test(&GridView, pointer));
        assert!(low.hit_test(&GridView, testing::screen(0.0, 0.5)));
    }

    #[test]
    fn test_missing_display_properties_are_empty() {
        let bare = GeoEntity::new("7", Location::new(0.0, 0.0)).with_property("altitude", "6000");
        let marker = AirportMarker::new(bare).unwrap();
        assert_eq!(marker.name(), "");
        assert_eq!(marker.title_lines()[1], "Loc: , ");
    }
}
