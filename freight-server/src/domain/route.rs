//! Planned route types.
//!
//! A `PlannedRoute` is one complete itinerary from the origin city to the
//! destination city, through any intermediate cities, as a chain of
//! connected segments.

use super::{DomainError, NodeId, RouteSegment, TransportMode};

/// Tolerance used when checking running totals.
const CUMULATIVE_EPSILON: f64 = 1e-6;

/// A complete itinerary with rollups.
///
/// # Invariants
///
/// - At least one segment
/// - Consecutive segments connect (destination of one = origin of next)
/// - Each segment's cumulative cost/time continues the previous segment's
/// - Totals are the sums of the segment values
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    rank: usize,
    label: String,
    segments: Vec<RouteSegment>,
    total_cost: f64,
    total_time_hours: f64,
    total_distance_km: f64,
    modes_used: Vec<TransportMode>,
}

impl PlannedRoute {
    /// Constructs a route from its segments.
    ///
    /// The route starts unranked (rank 0, empty label); ranking assigns the
    /// final position with [`PlannedRoute::with_rank`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - Segments list is empty
    /// - Segments don't connect
    /// - A segment's cumulative totals don't continue the previous segment's
    pub fn new(segments: Vec<RouteSegment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        for window in segments.windows(2) {
            let prev_dest = window[0].destination().id();
            let next_origin = window[1].origin().id();
            if prev_dest != next_origin {
                return Err(DomainError::SegmentsNotConnected(
                    prev_dest.clone(),
                    next_origin.clone(),
                ));
            }
        }

        let mut cost = 0.0;
        let mut time = 0.0;
        let mut distance = 0.0;
        for (i, segment) in segments.iter().enumerate() {
            cost += segment.cost();
            time += segment.time_hours();
            distance += segment.distance_km();
            if !close(segment.cumulative_cost(), cost)
                || !close(segment.cumulative_time_hours(), time)
            {
                return Err(DomainError::BrokenCumulative(i));
            }
        }

        let modes_used = modes_used(&segments);

        Ok(Self {
            rank: 0,
            label: String::new(),
            segments,
            total_cost: cost,
            total_time_hours: time,
            total_distance_km: distance,
            modes_used,
        })
    }

    /// Returns the route with its final rank and label.
    pub fn with_rank(mut self, rank: usize, label: impl Into<String>) -> Self {
        self.rank = rank;
        self.label = label.into();
        self
    }

    /// 1-based rank position (0 until ranked).
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn total_time_hours(&self) -> f64 {
        self.total_time_hours
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Distinct non-intermodal modes in first-use order.
    ///
    /// Never empty: a route made only of intermodal transfers reports `Sea`.
    pub fn modes_used(&self) -> &[TransportMode] {
        &self.modes_used
    }

    /// Ordered node identifiers visited by the route.
    ///
    /// Two routes with the same node sequence are the same route.
    pub fn node_sequence(&self) -> Vec<&NodeId> {
        let mut ids = Vec::with_capacity(self.segments.len() + 1);
        ids.push(self.segments[0].origin().id());
        ids.extend(self.segments.iter().map(|s| s.destination().id()));
        ids
    }

    /// Number of nodes visited.
    pub fn node_count(&self) -> usize {
        self.segments.len() + 1
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= CUMULATIVE_EPSILON * a.abs().max(b.abs()).max(1.0)
}

fn modes_used(segments: &[RouteSegment]) -> Vec<TransportMode> {
    let mut modes = Vec::new();
    for segment in segments {
        let mode = segment.mode();
        if mode != TransportMode::Intermodal && !modes.contains(&mode) {
            modes.push(mode);
        }
    }
    if modes.is_empty() {
        modes.push(TransportMode::Sea);
    }
    modes
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{EdgeCost, GeoPoint, Totals, TransportNode};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn mode() -> impl Strategy<Value = TransportMode> {
        prop_oneof![
            Just(TransportMode::Sea),
            Just(TransportMode::Air),
            Just(TransportMode::Intermodal),
        ]
    }

    fn legs() -> impl Strategy<Value = Vec<EdgeCost>> {
        prop::collection::vec(
            (mode(), 0.0f64..5000.0, 0.0f64..200.0, 0.0f64..3000.0).prop_map(
                |(mode, cost, time_hours, distance_km)| EdgeCost {
                    mode,
                    cost,
                    time_hours,
                    distance_km,
                },
            ),
            1..8,
        )
    }

    fn build(legs: &[EdgeCost]) -> PlannedRoute {
        let nodes: Vec<Arc<TransportNode>> = (0..=legs.len())
            .map(|i| {
                Arc::new(TransportNode::new(
                    NodeId::parse(&format!("port_{i}")).unwrap(),
                    format!("Port {i}"),
                    "City",
                    "Region",
                    GeoPoint::new(0.0, i as f64),
                    "Major",
                ))
            })
            .collect();

        let mut totals = Totals::zero();
        let mut segments = Vec::new();
        for (i, leg) in legs.iter().enumerate() {
            let (seg, next) =
                RouteSegment::extend(nodes[i].clone(), nodes[i + 1].clone(), leg, totals);
            segments.push(seg);
            totals = next;
        }
        PlannedRoute::new(segments).unwrap()
    }

    proptest! {
        #[test]
        fn total_cost_is_sum_of_segments(legs in legs()) {
            let route = build(&legs);
            let sum: f64 = route.segments().iter().map(|s| s.cost()).sum();
            prop_assert!((route.total_cost() - sum).abs() < 1e-9);
        }

        #[test]
        fn last_cumulative_matches_totals(legs in legs()) {
            let route = build(&legs);
            let last = route.segments().last().unwrap();
            prop_assert!((last.cumulative_cost() - route.total_cost()).abs() < 1e-9);
            prop_assert!((last.cumulative_time_hours() - route.total_time_hours()).abs() < 1e-9);
        }

        #[test]
        fn modes_never_empty_nor_intermodal(legs in legs()) {
            let route = build(&legs);
            prop_assert!(!route.modes_used().is_empty());
            prop_assert!(!route.modes_used().contains(&TransportMode::Intermodal));
        }

        #[test]
        fn consecutive_segments_share_nodes(legs in legs()) {
            let route = build(&legs);
            for w in route.segments().windows(2) {
                prop_assert_eq!(w[0].destination().id(), w[1].origin().id());
            }
            prop_assert_eq!(route.node_count(), legs.len() + 1);
        }
    }
}
