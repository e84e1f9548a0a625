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

//! Resolves route endpoint ids to airport locations.

use std::collections::HashMap;

use log::{debug, info};

use crate::entity::RouteRecord;
use crate::geo::Location;
use crate::marker::{MarkerError, RouteMarker};

/// Outcome counts of a linking pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Both endpoints resolved.
    pub linked: usize,
    /// At least one endpoint id is not a known airport.
    pub unresolved: usize,
    /// At least one endpoint id is not an integer.
    pub malformed: usize,
}

impl LinkStats {
    #[must_use]
    pub fn total(&self) -> usize {
        self.linked + self.unresolved + self.malformed
    }
}

fn parse_endpoint(property: &'static str, value: &str) -> Result<i64, MarkerError> {
    value.trim().parse::<i64>().ok().ok_or_else(|| MarkerError::InvalidValue {
        property,
        value: value.to_string(),
    })
}

/// Turn route records into route markers, resolving endpoints against `airports`.
///
/// When both ids are known the source location and then the destination
/// location are appended to the route. Otherwise the route keeps its location
/// list as it was and is still returned. Output order matches input order.
#[must_use]
pub fn link_routes(
    airports: &HashMap<i64, Location>,
    routes: Vec<RouteRecord>,
) -> (Vec<RouteMarker>, LinkStats) {
    let mut stats = LinkStats::default();

    let markers = routes
        .into_iter()
        .map(|mut route| {
            let endpoints = parse_endpoint("source", &route.source)
                .and_then(|source| Ok((source, parse_endpoint("destination", &route.destination)?)));

            match endpoints {
                Ok((source, destination)) => {
                    match (airports.get(&source), airports.get(&destination)) {
                        (Some(&from), Some(&to)) => {
                            route.locations.push(from);
                            route.locations.push(to);
                            stats.linked += 1;
                        }
                        _ => stats.unresolved += 1,
                    }
                }
                Err(e) => {
                    debug!("Route {} -> {} left unlinked: {}", route.source, route.destination, e);
                    stats.malformed += 1;
                }
            }

            RouteMarker::new(route)
        })
        .collect();

    info!(
        "Linked {} of {} routes ({} unresolved, {} malformed)",
        stats.linked,
        stats.total(),
        stats.unresolved,
        stats.malformed
    );

    (markers, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn airports() -> HashMap<i64, Location> {
        HashMap::from([
            (2965, Location::new(43.449_928, 39.956_589)),
            (2990, Location::new(55.606_186, 49.278_728)),
        ])
    }

    #[test]
    fn test_link_resolved_route() {
        let (routes, stats) = link_routes(&airports(), vec![testing::route("2965", "2990")]);

        assert_eq!(stats.linked, 1);
        assert_eq!(routes[0].locations().len(), 2);
        assert_eq!(routes[0].locations()[0], airports()[&2965]);
        assert_eq!(routes[0].locations()[1], airports()[&2990]);
        assert!(routes[0].is_hidden());
    }

    #[test]
    fn test_unknown_endpoint_leaves_route_unchanged() {
        let mut partial = testing::route("2965", "1");
        let existing = Location::new(1.0, 1.0);
        partial.locations.push(existing);

        let (routes, stats) = link_routes(&airports(), vec![partial, testing::route("7", "2990")]);

        assert_eq!(stats.unresolved, 2);
        assert_eq!(routes[0].locations(), &[existing]);
        assert!(routes[1].locations().is_empty());
    }

    #[test]
    fn test_malformed_id_does_not_abort_the_load() {
        let records = vec![
            testing::route("\\N", "2990"),
            testing::route("2965", "not-a-number"),
            testing::route("2990", "2965"),
        ];

        let (routes, stats) = link_routes(&airports(), records);

        assert_eq!(routes.len(), 3);
        assert_eq!(stats.malformed, 2);
        assert_eq!(stats.linked, 1);
        assert!(routes[0].locations().is_empty());
        assert!(routes[1].locations().is_empty());
        assert_eq!(routes[2].far_end(), Some(airports()[&2965]));
    }

    #[test]
    fn test_output_order_matches_input() {
        let records = vec![
            testing::route("2990", "2965"),
            testing::route("1", "2"),
            testing::route("2965", "2990"),
        ];

        let (routes, stats) = link_routes(&airports(), records);

        let order: Vec<(&str, &str)> = routes.iter().map(|r| (r.source(), r.destination())).collect();
        assert_eq!(order, vec![("2990", "2965"), ("1", "2"), ("2965", "2990")]);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_duplicate_routes_are_kept() {
        let records = vec![testing::route("2965", "2990"), testing::route("2965", "2990")];
        let (routes, stats) = link_routes(&airports(), records);
        assert_eq!(routes.len(), 2);
        assert_eq!(stats.linked, 2);
    }
}
