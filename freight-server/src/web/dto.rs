//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::directory::CitySummary;
use crate::domain::{NodeKind, PlannedRoute, RouteSegment, TransportMode, TransportNode};
use crate::planner::PlanRequest;

/// Query for the city search endpoint.
#[derive(Debug, Deserialize)]
pub struct CitySearchRequest {
    /// Substring of a city or region name; empty lists every city
    #[serde(default)]
    pub q: String,

    /// Maximum results (default 20, capped at 100)
    pub limit: Option<usize>,
}

/// Response for city search.
#[derive(Debug, Serialize)]
pub struct CitySearchResponse {
    pub cities: Vec<CitySummary>,
}

/// Query for the nearest-node endpoint.
#[derive(Debug, Deserialize)]
pub struct NearestNodesRequest {
    pub lat: f64,
    pub lng: f64,

    /// Restrict to ports (`sea`) or airports (`air`)
    pub kind: Option<NodeKind>,

    /// Maximum results (default 5, capped at 50)
    pub limit: Option<usize>,
}

/// Response for nearest-node lookup.
#[derive(Debug, Serialize)]
pub struct NearestNodesResponse {
    pub nodes: Vec<NodeSummary>,
}

/// Request to plan routes.
#[derive(Debug, Deserialize)]
pub struct PlanRoutesRequest {
    /// City the cargo starts from
    pub source_city: String,

    /// City the cargo must reach
    pub dest_city: String,

    /// Cities to pass through, in order
    #[serde(default)]
    pub intermediate_cities: Vec<String>,

    /// Region hint for the source city
    #[serde(default, alias = "source_region")]
    pub source_state: Option<String>,

    /// Region hint for the destination city
    #[serde(default, alias = "dest_region")]
    pub dest_state: Option<String>,

    /// Number of routes wanted
    pub num_routes: Option<usize>,
}

impl PlanRoutesRequest {
    /// Convert to a planner request.
    pub fn into_plan_request(self) -> PlanRequest {
        PlanRequest {
            source_city: self.source_city,
            dest_city: self.dest_city,
            intermediate_cities: self.intermediate_cities,
            source_region: self.source_state,
            dest_region: self.dest_state,
            num_routes: self.num_routes,
        }
    }
}

/// A transport node as shown to clients.
///
/// `kind` uses the same `sea`/`air` vocabulary as the `kind` query parameter
/// of the nearest-node endpoint. `node_type` is the human-facing label.
#[derive(Debug, Serialize)]
pub struct NodeSummary {
    pub node_id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
    pub kind: NodeKind,
    /// "port" or "airport"
    pub node_type: &'static str,
    pub subtype: String,
    pub code: String,
}

/// One leg of a planned route.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub from: NodeSummary,
    pub to: NodeSummary,
    pub transport_mode: TransportMode,
    pub distance_km: f64,
    pub cost_usd: f64,
    pub time_hours: f64,
    pub cumulative_cost: f64,
    pub cumulative_time_hours: f64,
}

/// A ranked route option.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// 1-based rank
    pub route_id: usize,

    /// "Best Route (Lowest Cost)", "Alternative 1", ...
    pub label: String,

    pub segments: Vec<SegmentResult>,
    pub total_cost: f64,
    pub total_time_hours: f64,
    pub total_distance_km: f64,
    pub transport_modes_used: Vec<TransportMode>,
    pub node_count: usize,
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct PlanRoutesResponse {
    /// Ranked routes, best first
    pub routes: Vec<RouteResult>,

    /// Candidate routes built before ranking
    pub candidates_explored: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl NodeSummary {
    /// Create from a domain node.
    pub fn from_node(node: &TransportNode) -> Self {
        Self {
            node_id: node.id().to_string(),
            name: node.name.clone(),
            city: node.city.clone(),
            state: node.region.clone(),
            lat: node.location.lat,
            lng: node.location.lng,
            kind: node.kind(),
            node_type: match node.kind() {
                NodeKind::Sea => "port",
                NodeKind::Air => "airport",
            },
            subtype: node.subtype.clone(),
            code: node.code.clone().unwrap_or_default(),
        }
    }
}

impl SegmentResult {
    /// Create from a domain segment.
    pub fn from_segment(segment: &RouteSegment) -> Self {
        Self {
            from: NodeSummary::from_node(segment.origin()),
            to: NodeSummary::from_node(segment.destination()),
            transport_mode: segment.mode(),
            distance_km: round_to(segment.distance_km(), 1),
            cost_usd: round_to(segment.cost(), 2),
            time_hours: round_to(segment.time_hours(), 1),
            cumulative_cost: round_to(segment.cumulative_cost(), 2),
            cumulative_time_hours: round_to(segment.cumulative_time_hours(), 1),
        }
    }
}

impl RouteResult {
    /// Create from a ranked domain route.
    pub fn from_route(route: &PlannedRoute) -> Self {
        Self {
            route_id: route.rank(),
            label: route.label().to_string(),
            segments: route
                .segments()
                .iter()
                .map(SegmentResult::from_segment)
                .collect(),
            total_cost: round_to(route.total_cost(), 2),
            total_time_hours: round_to(route.total_time_hours(), 1),
            total_distance_km: round_to(route.total_distance_km(), 1),
            transport_modes_used: route.modes_used().to_vec(),
            node_count: route.node_count(),
        }
    }
}

/// Round to a fixed number of decimal places for display.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EdgeCost, GeoPoint, NodeId, Totals};
    use std::sync::Arc;

    fn port() -> Arc<TransportNode> {
        Arc::new(
            TransportNode::new(
                NodeId::parse("port_1").unwrap(),
                "Chennai Port",
                "Chennai",
                "Tamil Nadu",
                GeoPoint::new(13.0964, 80.2921),
                "Major",
            )
            .with_code("INMAA"),
        )
    }

    fn airport() -> Arc<TransportNode> {
        Arc::new(TransportNode::new(
            NodeId::parse("airport_1").unwrap(),
            "Chennai International Airport",
            "Chennai",
            "Tamil Nadu",
            GeoPoint::new(12.9941, 80.1709),
            "International",
        ))
    }

    fn make_route() -> PlannedRoute {
        let edge = EdgeCost {
            mode: TransportMode::Intermodal,
            cost: 2000.0,
            time_hours: 12.0,
            distance_km: 17.456,
        };
        let (first, totals) = RouteSegment::extend(port(), airport(), &edge, Totals::zero());
        let air = EdgeCost {
            mode: TransportMode::Air,
            cost: 516.6666,
            time_hours: 5.06666,
            distance_km: 1033.3333,
        };
        let (second, _) = RouteSegment::extend(airport(), port(), &air, totals);
        PlannedRoute::new(vec![first, second])
            .unwrap()
            .with_rank(2, "Alternative 1")
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(1033.3333, 1), 1033.3);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn node_summary_fields() {
        let summary = NodeSummary::from_node(&port());
        assert_eq!(summary.node_id, "port_1");
        assert_eq!(summary.node_type, "port");
        assert_eq!(summary.state, "Tamil Nadu");
        assert_eq!(summary.code, "INMAA");

        let summary = NodeSummary::from_node(&airport());
        assert_eq!(summary.node_type, "airport");
        assert_eq!(summary.code, "");
    }

    #[test]
    fn route_result_from_route() {
        let result = RouteResult::from_route(&make_route());

        assert_eq!(result.route_id, 2);
        assert_eq!(result.label, "Alternative 1");
        assert_eq!(result.node_count, 3);
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[0].distance_km, 17.5);
        assert_eq!(result.segments[1].cost_usd, 516.67);
        assert_eq!(result.segments[1].time_hours, 5.1);
        assert_eq!(result.segments[1].cumulative_cost, 2516.67);
        assert_eq!(result.total_cost, 2516.67);
        assert_eq!(result.total_time_hours, 17.1);
        assert_eq!(result.transport_modes_used, vec![TransportMode::Air]);
    }

    #[test]
    fn route_json_shape() {
        let json = serde_json::to_value(RouteResult::from_route(&make_route())).unwrap();

        assert_eq!(json["route_id"], 2);
        assert_eq!(json["segments"][0]["transport_mode"], "intermodal");
        assert_eq!(json["segments"][0]["from"]["node_id"], "port_1");
        assert_eq!(json["segments"][0]["to"]["node_type"], "airport");
        assert_eq!(json["segments"][0]["from"]["kind"], "sea");
        assert_eq!(json["segments"][0]["to"]["kind"], "air");
        assert_eq!(json["transport_modes_used"][0], "air");
    }

    #[test]
    fn plan_request_conversion() {
        let json = r#"{
            "source_city": "Chennai",
            "dest_city": "Mumbai",
            "intermediate_cities": ["Kochi"],
            "source_region": "Tamil Nadu",
            "num_routes": 2
        }"#;
        let request: PlanRoutesRequest = serde_json::from_str(json).unwrap();
        let plan = request.into_plan_request();

        assert_eq!(plan.source_city, "Chennai");
        assert_eq!(plan.intermediate_cities, vec!["Kochi".to_string()]);
        assert_eq!(plan.source_region.as_deref(), Some("Tamil Nadu"));
        assert_eq!(plan.dest_region, None);
        assert_eq!(plan.num_routes, Some(2));
    }

    #[test]
    fn plan_request_defaults() {
        let request: PlanRoutesRequest =
            serde_json::from_str(r#"{"source_city": "Chennai", "dest_city": "Mumbai"}"#).unwrap();
        let plan = request.into_plan_request();

        assert!(plan.intermediate_cities.is_empty());
        assert_eq!(plan.num_routes, None);
    }
}
