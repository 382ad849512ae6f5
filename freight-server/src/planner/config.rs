//! Cost model and search configuration for the route planner.

/// Constants of the edge cost model.
///
/// `Default` gives the production values; downstream cost expectations
/// depend on them, so only tests should substitute others.
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    /// Sea freight cost per km of sea distance.
    pub sea_cost_per_km: f64,

    /// Air freight cost per km.
    pub air_cost_per_km: f64,

    /// Effective sea speed (km/h).
    pub sea_speed_kmh: f64,

    /// Effective air speed (km/h).
    pub air_speed_kmh: f64,

    /// Dwell time at a sea port per sea leg (hours).
    pub port_handling_hours: f64,

    /// Dwell time at an airport per air leg (hours).
    pub airport_handling_hours: f64,

    /// Flat fee for a port/airport transfer.
    pub intermodal_fee: f64,

    /// Duration of a port/airport transfer (hours).
    pub intermodal_hours: f64,

    /// Port/airport pairs closer than this count as the same city (km).
    pub intermodal_radius_km: f64,

    /// Sea distance as a multiple of great-circle distance.
    pub sea_routing_factor: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            sea_cost_per_km: 0.05,
            air_cost_per_km: 0.50,
            sea_speed_kmh: 30.0,
            air_speed_kmh: 500.0,
            port_handling_hours: 6.0,
            airport_handling_hours: 3.0,
            intermodal_fee: 2000.0,
            intermodal_hours: 12.0, // half a day
            intermodal_radius_km: 100.0,
            sea_routing_factor: 1.4,
        }
    }
}

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Candidate nodes tried as starting points in the first city.
    pub origin_branching: usize,

    /// Cheapest next-city nodes branched into from each node.
    pub branching: usize,

    /// Routes returned when the request doesn't say.
    pub max_results: usize,

    /// Maximum nodes considered per city.
    pub city_node_cap: usize,

    /// Nodes taken from the nearest-node fallback.
    pub fallback_limit: usize,

    /// Edge cost constants.
    pub cost_model: CostModel,
}

impl SearchConfig {
    /// Create a new configuration with the given branching parameters.
    pub fn new(
        origin_branching: usize,
        branching: usize,
        max_results: usize,
        city_node_cap: usize,
        fallback_limit: usize,
    ) -> Self {
        Self {
            origin_branching,
            branching,
            max_results,
            city_node_cap,
            fallback_limit,
            cost_model: CostModel::default(),
        }
    }

    /// Replace the cost model.
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Upper bound on candidate routes for a sequence of `cities` cities.
    pub fn max_candidates(&self, cities: usize) -> usize {
        let later = u32::try_from(cities.saturating_sub(1)).unwrap_or(u32::MAX);
        self.origin_branching
            .saturating_mul(self.branching.saturating_pow(later))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            origin_branching: 4,
            branching: 3,
            max_results: 4,
            city_node_cap: 10,
            fallback_limit: 5,
            cost_model: CostModel::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.origin_branching, 4);
        assert_eq!(config.branching, 3);
        assert_eq!(config.max_results, 4);
        assert_eq!(config.city_node_cap, 10);
        assert_eq!(config.fallback_limit, 5);
    }

    #[test]
    fn default_cost_model() {
        let model = CostModel::default();

        assert_eq!(model.sea_cost_per_km, 0.05);
        assert_eq!(model.air_cost_per_km, 0.50);
        assert_eq!(model.sea_speed_kmh, 30.0);
        assert_eq!(model.air_speed_kmh, 500.0);
        assert_eq!(model.port_handling_hours, 6.0);
        assert_eq!(model.airport_handling_hours, 3.0);
        assert_eq!(model.intermodal_fee, 2000.0);
        assert_eq!(model.intermodal_hours, 12.0);
        assert_eq!(model.intermodal_radius_km, 100.0);
        assert_eq!(model.sea_routing_factor, 1.4);
    }

    #[test]
    fn custom_config() {
        let model = CostModel {
            intermodal_fee: 500.0,
            ..CostModel::default()
        };
        let config = SearchConfig::new(2, 5, 6, 8, 3).with_cost_model(model);

        assert_eq!(config.origin_branching, 2);
        assert_eq!(config.branching, 5);
        assert_eq!(config.max_results, 6);
        assert_eq!(config.city_node_cap, 8);
        assert_eq!(config.fallback_limit, 3);
        assert_eq!(config.cost_model.intermodal_fee, 500.0);
    }

    #[test]
    fn candidate_bound() {
        let config = SearchConfig::default();

        // origin -> destination
        assert_eq!(config.max_candidates(2), 12);
        // origin -> stop -> destination
        assert_eq!(config.max_candidates(3), 36);
    }
}
