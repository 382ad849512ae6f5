//! On-disk node dataset.
//!
//! The dataset is a JSON document holding the port and airport tables plus
//! a small gazetteer of named places. Rows are converted to
//! [`TransportNode`]s once, at load time.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{GeoPoint, NodeId, NodeKind, TransportNode};

use super::error::DirectoryError;

/// A row of the ports table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub port_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub un_locode: Option<String>,
}

/// A row of the airports table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub airport_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub iata_code: Option<String>,
}

/// A named place with reference coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub state: String,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// The full dataset as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeDataset {
    #[serde(default)]
    pub ports: Vec<PortRecord>,
    #[serde(default)]
    pub airports: Vec<AirportRecord>,
    #[serde(default)]
    pub places: Vec<Place>,
}

impl NodeDataset {
    /// Load a dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        serde_json::from_str(json).map_err(|e| DirectoryError::Json {
            message: e.to_string(),
        })
    }

    /// Convert the tables to transport nodes, ports first.
    ///
    /// Rows without coordinates are skipped. Out-of-range coordinates and
    /// duplicate identifiers are rejected.
    pub fn to_nodes(&self) -> Result<Vec<TransportNode>, DirectoryError> {
        let mut nodes = Vec::with_capacity(self.ports.len() + self.airports.len());
        let mut seen = HashSet::new();

        for p in &self.ports {
            let Some(location) = coordinates("ports", p.id, p.latitude, p.longitude)? else {
                continue;
            };
            let id = node_id("ports", NodeKind::Sea, p.id)?;
            if !seen.insert(id.clone()) {
                return Err(duplicate("ports", p.id));
            }
            let node = TransportNode::new(
                id,
                &p.name,
                p.city.clone().unwrap_or_default(),
                &p.state,
                location,
                &p.port_type,
            )
            .with_code(p.un_locode.clone().unwrap_or_default());
            nodes.push(node);
        }

        for a in &self.airports {
            let Some(location) = coordinates("airports", a.id, a.latitude, a.longitude)? else {
                continue;
            };
            let id = node_id("airports", NodeKind::Air, a.id)?;
            if !seen.insert(id.clone()) {
                return Err(duplicate("airports", a.id));
            }
            let node = TransportNode::new(
                id,
                &a.name,
                a.city.clone().unwrap_or_default(),
                &a.state,
                location,
                &a.airport_type,
            )
            .with_code(a.iata_code.clone().unwrap_or_default());
            nodes.push(node);
        }

        Ok(nodes)
    }
}

fn coordinates(
    table: &'static str,
    id: u64,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<Option<GeoPoint>, DirectoryError> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Ok(None);
    };
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(DirectoryError::InvalidRecord {
            table,
            id: id.to_string(),
            reason: format!("coordinates out of range: {lat}, {lng}"),
        });
    }
    Ok(Some(GeoPoint::new(lat, lng)))
}

fn node_id(table: &'static str, kind: NodeKind, id: u64) -> Result<NodeId, DirectoryError> {
    NodeId::new(kind, id).map_err(|e| DirectoryError::InvalidRecord {
        table,
        id: id.to_string(),
        reason: e.to_string(),
    })
}

fn duplicate(table: &'static str, id: u64) -> DirectoryError {
    DirectoryError::InvalidRecord {
        table,
        id: id.to_string(),
        reason: "duplicate id".to_string(),
    }
}
