//! In-memory node directory.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::{GeoPoint, NodeKind, TransportNode};

use super::NodeDirectory;
use super::dataset::{NodeDataset, Place};
use super::error::DirectoryError;

/// Default cap on nodes returned for one city.
const DEFAULT_CITY_CAP: usize = 10;

/// A city served by at least one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummary {
    pub city: String,
    pub region: String,
    pub lat: f64,
    pub lng: f64,
    pub port_count: usize,
    pub airport_count: usize,
}

impl CitySummary {
    pub fn has_port(&self) -> bool {
        self.port_count > 0
    }

    pub fn has_airport(&self) -> bool {
        self.airport_count > 0
    }
}

/// Node directory over a fully loaded dataset.
///
/// Immutable after construction, so it can be shared across requests
/// without locking.
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    nodes: Vec<Arc<TransportNode>>,
    places: Vec<Place>,
    city_cap: usize,
}

impl InMemoryDirectory {
    /// Create a directory from nodes and gazetteer places.
    pub fn new(nodes: Vec<TransportNode>, places: Vec<Place>) -> Self {
        Self {
            nodes: nodes.into_iter().map(Arc::new).collect(),
            places,
            city_cap: DEFAULT_CITY_CAP,
        }
    }

    /// Build a directory from a parsed dataset.
    pub fn from_dataset(dataset: NodeDataset) -> Result<Self, DirectoryError> {
        let nodes = dataset.to_nodes()?;
        Ok(Self::new(nodes, dataset.places))
    }

    /// Load a dataset file and build a directory from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        Self::from_dataset(NodeDataset::load(path)?)
    }

    /// Set a custom per-city cap.
    pub fn with_city_cap(mut self, cap: usize) -> Self {
        self.city_cap = cap;
        self
    }

    /// Number of nodes in the directory.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in or near `city`.
    ///
    /// Matches the query as a case-insensitive substring of a node's city
    /// or name, keeping only nodes in `region` when one is given. If that
    /// finds nothing, widens to any node whose city, name or region
    /// contains the query. Results keep dataset order and are capped.
    pub fn city_nodes(&self, city: &str, region: Option<&str>) -> Vec<Arc<TransportNode>> {
        let q = city.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        let region = region
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty());

        let mut found: Vec<Arc<TransportNode>> = self
            .nodes
            .iter()
            .filter(|n| {
                n.city.to_lowercase().contains(&q) || n.name.to_lowercase().contains(&q)
            })
            .filter(|n| {
                region
                    .as_ref()
                    .is_none_or(|r| n.region.to_lowercase() == *r)
            })
            .take(self.city_cap)
            .cloned()
            .collect();

        if found.is_empty() {
            found = self
                .nodes
                .iter()
                .filter(|n| {
                    n.city.to_lowercase().contains(&q)
                        || n.name.to_lowercase().contains(&q)
                        || n.region.to_lowercase().contains(&q)
                })
                .take(self.city_cap)
                .cloned()
                .collect();
        }

        found
    }

    /// The `limit` nodes closest to `point`, optionally of one kind.
    pub fn nearest(
        &self,
        point: GeoPoint,
        kind: Option<NodeKind>,
        limit: usize,
    ) -> Vec<Arc<TransportNode>> {
        let mut by_distance: Vec<(f64, &Arc<TransportNode>)> = self
            .nodes
            .iter()
            .filter(|n| kind.is_none_or(|k| n.kind() == k))
            .map(|n| (point.distance_km(&n.location), n))
            .collect();

        by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
        by_distance
            .into_iter()
            .take(limit)
            .map(|(_, n)| n.clone())
            .collect()
    }

    /// Reference coordinates for a city name.
    ///
    /// Prefers a gazetteer place with that exact name (case-insensitive);
    /// otherwise the centroid of nodes whose city is exactly that name.
    pub fn locate(&self, city: &str) -> Option<GeoPoint> {
        let q = city.trim().to_lowercase();
        if q.is_empty() {
            return None;
        }

        if let Some(place) = self.places.iter().find(|p| p.name.to_lowercase() == q) {
            return Some(place.location());
        }

        let matching: Vec<&GeoPoint> = self
            .nodes
            .iter()
            .filter(|n| n.city.to_lowercase() == q)
            .map(|n| &n.location)
            .collect();
        if matching.is_empty() {
            return None;
        }

        let count = matching.len() as f64;
        let lat = matching.iter().map(|p| p.lat).sum::<f64>() / count;
        let lng = matching.iter().map(|p| p.lng).sum::<f64>() / count;
        Some(GeoPoint::new(lat, lng))
    }

    /// Cities with at least one node, optionally filtered by a substring of
    /// the city or region. Sorted by city name.
    pub fn cities(&self, query: &str) -> Vec<CitySummary> {
        let mut cities: BTreeMap<(String, String), CitySummary> = BTreeMap::new();

        for node in &self.nodes {
            let city = if node.city.trim().is_empty() {
                node.name.trim()
            } else {
                node.city.trim()
            };
            let key = (city.to_string(), node.region.clone());
            let entry = cities.entry(key).or_insert_with(|| CitySummary {
                city: city.to_string(),
                region: node.region.clone(),
                lat: node.location.lat,
                lng: node.location.lng,
                port_count: 0,
                airport_count: 0,
            });
            match node.kind() {
                NodeKind::Sea => entry.port_count += 1,
                NodeKind::Air => entry.airport_count += 1,
            }
        }

        let q = query.trim().to_lowercase();
        cities
            .into_values()
            .filter(|c| {
                q.is_empty()
                    || c.city.to_lowercase().contains(&q)
                    || c.region.to_lowercase().contains(&q)
            })
            .collect()
    }
}

impl NodeDirectory for InMemoryDirectory {
    async fn resolve_city_nodes(
        &self,
        city: &str,
        region: Option<&str>,
    ) -> Result<Vec<Arc<TransportNode>>, DirectoryError> {
        Ok(self.city_nodes(city, region))
    }

    async fn nearest_nodes(
        &self,
        point: GeoPoint,
        kind: Option<NodeKind>,
        limit: usize,
    ) -> Result<Vec<Arc<TransportNode>>, DirectoryError> {
        Ok(self.nearest(point, kind, limit))
    }

    async fn locate_city(&self, city: &str) -> Result<Option<GeoPoint>, DirectoryError> {
        Ok(self.locate(city))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeId;

    fn node(id: &str, name: &str, city: &str, region: &str, lat: f64, lng: f64) -> TransportNode {
        TransportNode::new(
            NodeId::parse(id).unwrap(),
            name,
            city,
            region,
            GeoPoint::new(lat, lng),
            "Major",
        )
    }

    fn directory() -> InMemoryDirectory {
        InMemoryDirectory::new(
            vec![
                node("port_1", "Chennai Port", "Chennai", "Tamil Nadu", 13.0964, 80.2921),
                node("port_2", "Kamarajar Port", "Ennore", "Tamil Nadu", 13.2630, 80.3303),
                node("port_3", "Mumbai Port", "Mumbai", "Maharashtra", 18.9438, 72.8464),
                node("airport_1", "Chennai International Airport", "Chennai", "Tamil Nadu", 12.9941, 80.1709),
                node("airport_2", "Chhatrapati Shivaji Maharaj International Airport", "Mumbai", "Maharashtra", 19.0896, 72.8656),
                node("airport_3", "Aurangabad Airport", "Aurangabad", "Maharashtra", 19.8627, 75.3981),
            ],
            vec![Place {
                name: "Thane".into(),
                state: "Maharashtra".into(),
                lat: 19.2183,
                lng: 72.9781,
            }],
        )
    }

    fn ids(nodes: &[Arc<TransportNode>]) -> Vec<&str> {
        nodes.iter().map(|n| n.id().as_str()).collect()
    }

    #[test]
    fn city_match_keeps_dataset_order() {
        let dir = directory();
        assert_eq!(ids(&dir.city_nodes("chennai", None)), vec!["port_1", "airport_1"]);
    }

    #[test]
    fn city_match_includes_node_names() {
        let dir = directory();
        assert_eq!(ids(&dir.city_nodes("Kamarajar", None)), vec!["port_2"]);
    }

    #[test]
    fn region_filters_city_match() {
        let dir = directory();
        assert_eq!(
            ids(&dir.city_nodes("Mumbai", Some("maharashtra"))),
            vec!["port_3", "airport_2"]
        );
    }

    #[test]
    fn wrong_region_widens_to_broad_match() {
        let dir = directory();
        // Region rules out every city match, so the broad match applies.
        assert_eq!(
            ids(&dir.city_nodes("Mumbai", Some("Kerala"))),
            vec!["port_3", "airport_2"]
        );
    }

    #[test]
    fn broad_match_uses_region() {
        let dir = directory();
        assert_eq!(
            ids(&dir.city_nodes("tamil", None)),
            vec!["port_1", "port_2", "airport_1"]
        );
    }

    #[test]
    fn unknown_and_blank_cities_are_empty() {
        let dir = directory();
        assert!(dir.city_nodes("Atlantis", None).is_empty());
        assert!(dir.city_nodes("   ", None).is_empty());
    }

    #[test]
    fn city_cap_applies() {
        let dir = directory().with_city_cap(1);
        assert_eq!(ids(&dir.city_nodes("Chennai", None)), vec!["port_1"]);
    }

    #[test]
    fn nearest_sorted_by_distance() {
        let dir = directory();
        let near = dir.nearest(GeoPoint::new(19.2183, 72.9781), None, 2);
        assert_eq!(ids(&near), vec!["airport_2", "port_3"]);
    }

    #[test]
    fn nearest_filters_kind() {
        let dir = directory();
        let near = dir.nearest(GeoPoint::new(13.0, 80.2), Some(NodeKind::Sea), 5);
        assert_eq!(ids(&near), vec!["port_1", "port_2", "port_3"]);
    }

    #[test]
    fn locate_prefers_gazetteer() {
        let dir = directory();
        assert_eq!(dir.locate("thane"), Some(GeoPoint::new(19.2183, 72.9781)));
    }

    #[test]
    fn locate_falls_back_to_node_centroid() {
        let dir = directory();
        let p = dir.locate("Mumbai").unwrap();
        assert!((p.lat - (18.9438 + 19.0896) / 2.0).abs() < 1e-9);
        assert!((p.lng - (72.8464 + 72.8656) / 2.0).abs() < 1e-9);
        assert_eq!(dir.locate("Atlantis"), None);
    }

    #[test]
    fn cities_summarise_nodes() {
        let dir = directory();
        let all = dir.cities("");
        let names: Vec<&str> = all.iter().map(|c| c.city.as_str()).collect();
        assert_eq!(names, vec!["Aurangabad", "Chennai", "Ennore", "Mumbai"]);

        let chennai = &all[1];
        assert_eq!(chennai.port_count, 1);
        assert_eq!(chennai.airport_count, 1);
        assert!(chennai.has_port() && chennai.has_airport());
    }

    #[test]
    fn cities_filter_by_region() {
        let dir = directory();
        let names: Vec<String> = dir
            .cities("maha")
            .into_iter()
            .map(|c| c.city)
            .collect();
        assert_eq!(names, vec!["Aurangabad", "Mumbai"]);
    }

    #[tokio::test]
    async fn trait_methods_delegate() {
        let dir = directory();
        let nodes = dir.resolve_city_nodes("Mumbai", None).await.unwrap();
        assert_eq!(ids(&nodes), vec!["port_3", "airport_2"]);

        let located = dir.locate_city("Thane").await.unwrap();
        assert!(located.is_some());
    }
}
