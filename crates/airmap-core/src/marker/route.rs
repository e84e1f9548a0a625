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

use super::MarkerFlags;
use crate::entity::RouteRecord;
use crate::geo::Location;

/// Line marker for a route. Hidden until its airport is focused.
#[derive(Debug, Clone)]
pub struct RouteMarker {
    record: RouteRecord,
    flags: MarkerFlags,
}

impl RouteMarker {
    #[must_use]
    pub fn new(record: RouteRecord) -> Self {
        Self {
            record,
            flags: MarkerFlags {
                hidden: true,
                ..MarkerFlags::default()
            },
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.record.source
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.record.destination
    }

    /// Source location first, destination second, when linked.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.record.locations
    }

    /// A route draws a segment only once both endpoints resolved.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.record.locations.len() >= 2
    }

    #[must_use]
    pub fn touches(&self, location: Location) -> bool {
        self.record.locations.contains(&location)
    }

    /// The destination-side location (index 1).
    #[must_use]
    pub fn far_end(&self) -> Option<Location> {
        self.record.locations.get(1).copied()
    }

    #[must_use]
    pub fn flags(&self) -> &MarkerFlags {
        &self.flags
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.flags.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.flags.hidden = hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked(from: Location, to: Location) -> RouteMarker {
        let mut record = RouteRecord::new("1", "2");
        record.locations = vec![from, to];
        RouteMarker::new(record)
    }

    #[test]
    fn test_route_hidden_by_default() {
        let route = RouteMarker::new(RouteRecord::new("1", "2"));
        assert!(route.is_hidden());
        assert!(!route.is_linked());
        assert_eq!(route.far_end(), None);
    }

    #[test]
    fn test_far_end_is_destination() {
        let paro = Location::new(27.4, 89.4);
        let lhasa = Location::new(29.3, 90.9);
        let route = linked(paro, lhasa);

        assert!(route.is_linked());
        assert!(route.touches(paro));
        assert!(route.touches(lhasa));
        assert!(!route.touches(Location::new(0.0, 0.0)));
        assert_eq!(route.far_end(), Some(lhasa));
    }
}
