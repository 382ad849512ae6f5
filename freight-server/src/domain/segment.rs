//! Route segment types.
//!
//! A `RouteSegment` is one traversed leg between two transport nodes,
//! carrying both its own cost/time/distance and the running totals of the
//! itinerary as of the end of the leg.

use std::ops::Add;
use std::sync::Arc;

use super::{TransportMode, TransportNode};

/// Scored cost of moving between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCost {
    pub mode: TransportMode,
    pub cost: f64,
    pub time_hours: f64,
    pub distance_km: f64,
}

/// Running totals along an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub cost: f64,
    pub time_hours: f64,
    pub distance_km: f64,
}

impl Totals {
    /// Totals of an empty itinerary.
    pub fn zero() -> Self {
        Self::default()
    }
}

impl Add<&EdgeCost> for Totals {
    type Output = Totals;

    fn add(self, edge: &EdgeCost) -> Totals {
        Totals {
            cost: self.cost + edge.cost,
            time_hours: self.time_hours + edge.time_hours,
            distance_km: self.distance_km + edge.distance_km,
        }
    }
}

/// One leg of a planned route.
///
/// Segments share their endpoint nodes with other segments and routes
/// through `Arc`; they never own the node data.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    from: Arc<TransportNode>,
    to: Arc<TransportNode>,
    mode: TransportMode,
    distance_km: f64,
    cost: f64,
    time_hours: f64,
    cumulative_cost: f64,
    cumulative_time_hours: f64,
}

impl RouteSegment {
    /// Build the segment that follows an itinerary whose totals are `previous`.
    ///
    /// Returns the segment together with the totals at its end.
    pub fn extend(
        from: Arc<TransportNode>,
        to: Arc<TransportNode>,
        edge: &EdgeCost,
        previous: Totals,
    ) -> (Self, Totals) {
        let totals = previous + edge;
        let segment = Self {
            from,
            to,
            mode: edge.mode,
            distance_km: edge.distance_km,
            cost: edge.cost,
            time_hours: edge.time_hours,
            cumulative_cost: totals.cost,
            cumulative_time_hours: totals.time_hours,
        };
        (segment, totals)
    }

    /// Node the leg departs from.
    pub fn origin(&self) -> &Arc<TransportNode> {
        &self.from
    }

    /// Node the leg arrives at.
    pub fn destination(&self) -> &Arc<TransportNode> {
        &self.to
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn time_hours(&self) -> f64 {
        self.time_hours
    }

    /// Itinerary cost up to and including this leg.
    pub fn cumulative_cost(&self) -> f64 {
        self.cumulative_cost
    }

    /// Itinerary duration up to and including this leg.
    pub fn cumulative_time_hours(&self) -> f64 {
        self.cumulative_time_hours
    }
}
