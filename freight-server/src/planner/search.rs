//! Multimodal route search.
//!
//! A search runs in two phases. Every city in the request is first resolved
//! to candidate nodes through the [`NodeDirectory`]; this is the only part
//! that touches I/O. The resolved node lists then feed a bounded depth-first
//! enumeration that scores each leg with the cost model and keeps every
//! complete path as a candidate for ranking.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::directory::{DirectoryError, NodeDirectory};
use crate::domain::{EdgeCost, NodeId, PlannedRoute, RouteSegment, Totals, TransportNode};

use super::config::SearchConfig;
use super::cost::score_edge;
use super::rank::rank_routes;

/// Error from route planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// No nodes could be found for a city, even by proximity.
    #[error("no transport nodes found for city: {city}")]
    UnresolvableCity { city: String },

    /// The node directory failed.
    #[error("node directory unavailable: {0}")]
    Directory(#[from] DirectoryError),

    /// Invalid plan request
    #[error("invalid route request: {0}")]
    InvalidRequest(String),
}

/// Request for route planning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// City the cargo starts from.
    pub source_city: String,

    /// City the cargo must reach.
    pub dest_city: String,

    /// Cities to pass through, in order.
    pub intermediate_cities: Vec<String>,

    /// Optional region hint for the source city.
    pub source_region: Option<String>,

    /// Optional region hint for the destination city.
    pub dest_region: Option<String>,

    /// Number of routes wanted; the search default applies when unset.
    pub num_routes: Option<usize>,
}

impl PlanRequest {
    /// Create a request between two cities.
    pub fn new(source_city: impl Into<String>, dest_city: impl Into<String>) -> Self {
        Self {
            source_city: source_city.into(),
            dest_city: dest_city.into(),
            intermediate_cities: Vec::new(),
            source_region: None,
            dest_region: None,
            num_routes: None,
        }
    }

    /// Route through these cities between source and destination.
    pub fn with_stops<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intermediate_cities = stops.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source_region(mut self, region: impl Into<String>) -> Self {
        self.source_region = Some(region.into());
        self
    }

    pub fn with_dest_region(mut self, region: impl Into<String>) -> Self {
        self.dest_region = Some(region.into());
        self
    }

    pub fn with_num_routes(mut self, num_routes: usize) -> Self {
        self.num_routes = Some(num_routes);
        self
    }

    /// Validate the plan request.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.source_city.trim().is_empty() {
            return Err(PlanError::InvalidRequest(
                "source city must not be empty".to_string(),
            ));
        }
        if self.dest_city.trim().is_empty() {
            return Err(PlanError::InvalidRequest(
                "destination city must not be empty".to_string(),
            ));
        }
        if self.intermediate_cities.iter().any(|c| c.trim().is_empty()) {
            return Err(PlanError::InvalidRequest(
                "intermediate city names must not be empty".to_string(),
            ));
        }
        if self.num_routes == Some(0) {
            return Err(PlanError::InvalidRequest(
                "num_routes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Cities in travel order, each with its region hint.
    ///
    /// Only the first and last city carry a hint; blank hints are dropped.
    pub fn city_sequence(&self) -> Vec<(&str, Option<&str>)> {
        let mut cities = Vec::with_capacity(self.intermediate_cities.len() + 2);
        cities.push((self.source_city.trim(), region_hint(&self.source_region)));
        cities.extend(self.intermediate_cities.iter().map(|c| (c.trim(), None)));
        cities.push((self.dest_city.trim(), region_hint(&self.dest_region)));
        cities
    }
}

fn region_hint(region: &Option<String>) -> Option<&str> {
    region.as_deref().map(str::trim).filter(|r| !r.is_empty())
}

/// Result of route planning.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Found routes, ranked best-first.
    pub routes: Vec<PlannedRoute>,

    /// Number of complete candidate routes built before ranking.
    pub candidates_explored: usize,
}

impl SearchResult {
    /// Every city resolved but no path connects them.
    pub fn is_no_route(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Resolve one city to its candidate nodes.
///
/// Falls back from the region-qualified lookup to a plain one, then to the
/// nodes nearest the city's reference point.
async fn resolve_city<D: NodeDirectory>(
    directory: &D,
    city: &str,
    region: Option<&str>,
    config: &SearchConfig,
) -> Result<Vec<Arc<TransportNode>>, PlanError> {
    let mut nodes = directory.resolve_city_nodes(city, region).await?;

    if nodes.is_empty() && region.is_some() {
        debug!(city, region, "no nodes in region, retrying without it");
        nodes = directory.resolve_city_nodes(city, None).await?;
    }

    if nodes.is_empty() {
        if let Some(point) = directory.locate_city(city).await? {
            warn!(
                city,
                lat = point.lat,
                lng = point.lng,
                "no nodes matched city name, using nearest nodes"
            );
            nodes = directory
                .nearest_nodes(point, None, config.fallback_limit)
                .await?;
        }
    }

    if nodes.is_empty() {
        return Err(PlanError::UnresolvableCity {
            city: city.to_string(),
        });
    }

    nodes.truncate(config.city_node_cap);
    debug!(city, nodes = nodes.len(), "resolved city");
    Ok(nodes)
}

fn same_stop(a: &(&str, Option<&str>), b: &(&str, Option<&str>)) -> bool {
    let region_eq = match (a.1, b.1) {
        (Some(x), Some(y)) => x.eq_ignore_ascii_case(y),
        (None, None) => true,
        _ => false,
    };
    region_eq && a.0.eq_ignore_ascii_case(b.0)
}

/// Resolve every city of the request, concurrently.
///
/// A city that appears more than once is looked up once. The returned lists
/// follow the request's city order.
pub async fn resolve_cities<D: NodeDirectory>(
    directory: &D,
    request: &PlanRequest,
    config: &SearchConfig,
) -> Result<Vec<Vec<Arc<TransportNode>>>, PlanError> {
    let stops = request.city_sequence();

    let mut unique: Vec<(&str, Option<&str>)> = Vec::with_capacity(stops.len());
    let mut slots = Vec::with_capacity(stops.len());
    for stop in &stops {
        let slot = match unique.iter().position(|u| same_stop(u, stop)) {
            Some(i) => i,
            None => {
                unique.push(*stop);
                unique.len() - 1
            }
        };
        slots.push(slot);
    }

    let resolved = try_join_all(
        unique
            .iter()
            .map(|(city, region)| resolve_city(directory, city, *region, config)),
    )
    .await?;

    Ok(slots.into_iter().map(|i| resolved[i].clone()).collect())
}

/// A partial path on the search stack.
///
/// Each frame owns its state, so sibling branches never see each other's
/// segments or visited nodes.
struct Frame {
    /// Index of the city `node` belongs to.
    depth: usize,
    node: Arc<TransportNode>,
    segments: Vec<RouteSegment>,
    totals: Totals,
    visited: HashSet<NodeId>,
}

impl Frame {
    fn start(node: Arc<TransportNode>) -> Self {
        let mut visited = HashSet::new();
        visited.insert(node.id().clone());
        Self {
            depth: 0,
            node,
            segments: Vec::new(),
            totals: Totals::zero(),
            visited,
        }
    }

    fn extend(&self, target: Arc<TransportNode>, edge: &EdgeCost) -> Self {
        let (segment, totals) =
            RouteSegment::extend(self.node.clone(), target.clone(), edge, self.totals);

        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);

        let mut visited = self.visited.clone();
        visited.insert(target.id().clone());

        Self {
            depth: self.depth + 1,
            node: target,
            segments,
            totals,
            visited,
        }
    }
}

/// Enumerate candidate routes through resolved cities.
///
/// Starts from the first `origin_branching` nodes of the first city. From
/// each node, every unvisited node of the next city is scored and the
/// `branching` cheapest legs are followed. Every path that reaches the last
/// city becomes a candidate; nothing is pruned on cost. Candidates come out
/// in depth-first order with cheaper legs explored first.
pub fn enumerate_routes(
    cities: &[Vec<Arc<TransportNode>>],
    config: &SearchConfig,
) -> Vec<PlannedRoute> {
    let Some(first) = cities.first() else {
        return Vec::new();
    };

    let mut stack: Vec<Frame> = first
        .iter()
        .take(config.origin_branching)
        .rev()
        .map(|node| Frame::start(node.clone()))
        .collect();

    let mut routes = Vec::new();

    while let Some(frame) = stack.pop() {
        let Some(targets) = cities.get(frame.depth + 1) else {
            match PlannedRoute::new(frame.segments) {
                Ok(route) => routes.push(route),
                Err(e) => warn!(error = %e, "discarding malformed candidate"),
            }
            continue;
        };

        let mut legs: Vec<(EdgeCost, &Arc<TransportNode>)> = targets
            .iter()
            .filter(|target| !frame.visited.contains(target.id()))
            .map(|target| (score_edge(&frame.node, target, &config.cost_model), target))
            .collect();

        legs.sort_by(|a, b| a.0.cost.total_cmp(&b.0.cost));
        legs.truncate(config.branching);

        // Reverse so the cheapest leg is popped first
        for (edge, target) in legs.into_iter().rev() {
            stack.push(frame.extend(target.clone(), &edge));
        }
    }

    debug!(
        cities = cities.len(),
        candidates = routes.len(),
        "enumerated candidate routes"
    );
    routes
}

/// Plan routes for a request.
///
/// Resolves every city, enumerates candidates and returns the cheapest
/// distinct routes. An empty result means the cities resolved but could not
/// be connected.
pub async fn plan_routes<D: NodeDirectory>(
    directory: &D,
    request: &PlanRequest,
    config: &SearchConfig,
) -> Result<SearchResult, PlanError> {
    request.validate()?;

    let cities = resolve_cities(directory, request, config).await?;
    let candidates = enumerate_routes(&cities, config);
    let candidates_explored = candidates.len();

    let limit = request.num_routes.unwrap_or(config.max_results);
    let routes = rank_routes(candidates, limit);

    if routes.is_empty() {
        debug!(
            source = %request.source_city,
            dest = %request.dest_city,
            "no route found"
        );
    }

    Ok(SearchResult {
        routes,
        candidates_explored,
    })
}

/// Route planner bound to a directory and configuration.
pub struct Planner<'a, D: NodeDirectory> {
    directory: &'a D,
    config: &'a SearchConfig,
}

impl<'a, D: NodeDirectory> Planner<'a, D> {
    /// Create a new planner.
    pub fn new(directory: &'a D, config: &'a SearchConfig) -> Self {
        Self { directory, config }
    }

    /// Plan routes for a request.
    pub async fn plan(&self, request: &PlanRequest) -> Result<SearchResult, PlanError> {
        plan_routes(self.directory, request, self.config).await
    }
}
