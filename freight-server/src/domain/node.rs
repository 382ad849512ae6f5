//! Transport node types: identifiers, kinds and the node record itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Error returned when parsing an invalid node identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node id: {reason}")]
pub struct InvalidNodeId {
    reason: &'static str,
}

/// The physical kind of a transport node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A sea port.
    Sea,
    /// An airport.
    Air,
}

impl NodeKind {
    /// Identifier prefix used for nodes of this kind.
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeKind::Sea => "port_",
            NodeKind::Air => "airport_",
        }
    }

    /// Returns the kind as a lowercase string.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Sea => "sea",
            NodeKind::Air => "air",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A globally unique transport node identifier.
///
/// Identifiers have the form `port_<key>` or `airport_<key>`, where the key
/// is non-empty and made of ASCII alphanumerics, `-` or `_`. The prefix fixes
/// the node kind, so an identifier always determines whether the node is a
/// port or an airport.
///
/// # Examples
///
/// ```
/// use freight_server::domain::{NodeId, NodeKind};
///
/// let id = NodeId::parse("port_12").unwrap();
/// assert_eq!(id.kind(), NodeKind::Sea);
/// assert_eq!(id.as_str(), "port_12");
///
/// assert!(NodeId::parse("station_1").is_err());
/// assert!(NodeId::parse("airport_").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    raw: String,
    kind: NodeKind,
}

impl NodeId {
    /// Parse a node identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidNodeId> {
        let (kind, key) = if let Some(key) = s.strip_prefix(NodeKind::Air.id_prefix()) {
            (NodeKind::Air, key)
        } else if let Some(key) = s.strip_prefix(NodeKind::Sea.id_prefix()) {
            (NodeKind::Sea, key)
        } else {
            return Err(InvalidNodeId {
                reason: "must start with port_ or airport_",
            });
        };

        Self::check_key(key)?;

        Ok(Self {
            raw: s.to_string(),
            kind,
        })
    }

    /// Build an identifier from a kind and a per-table key (e.g. a row id).
    pub fn new(kind: NodeKind, key: impl fmt::Display) -> Result<Self, InvalidNodeId> {
        let key = key.to_string();
        Self::check_key(&key)?;

        Ok(Self {
            raw: format!("{}{}", kind.id_prefix(), key),
            kind,
        })
    }

    fn check_key(key: &str) -> Result<(), InvalidNodeId> {
        if key.is_empty() {
            return Err(InvalidNodeId {
                reason: "key after the prefix must not be empty",
            });
        }
        if !key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(InvalidNodeId {
                reason: "key must be ASCII alphanumerics, '-' or '_'",
            });
        }
        Ok(())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the node kind encoded in the identifier.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A physical sea port or airport.
///
/// Nodes are read-only snapshots supplied by the node directory. The kind is
/// derived from the identifier at construction and cannot disagree with it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportNode {
    id: NodeId,
    /// Display name
    pub name: String,
    /// City the node serves
    pub city: String,
    /// Region or state
    pub region: String,
    /// Coordinates
    pub location: GeoPoint,
    /// Free-form classification (e.g. "Major", "International")
    pub subtype: String,
    /// Short code (UN/LOCODE for ports, IATA for airports)
    pub code: Option<String>,
}

impl TransportNode {
    /// Creates a node. The kind comes from `id`.
    pub fn new(
        id: NodeId,
        name: impl Into<String>,
        city: impl Into<String>,
        region: impl Into<String>,
        location: GeoPoint,
        subtype: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            region: region.into(),
            location,
            subtype: subtype.into(),
            code: None,
        }
    }

    /// Attach a short code. Blank codes are dropped.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.code = if code.trim().is_empty() {
            None
        } else {
            Some(code)
        };
        self
    }

    /// Returns the node identifier.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the node kind.
    pub fn kind(&self) -> NodeKind {
        self.id.kind()
    }

    /// Great-circle distance to another node in kilometres.
    pub fn distance_km(&self, other: &TransportNode) -> f64 {
        self.location.distance_km(&other.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert_eq!(NodeId::parse("port_1").unwrap().kind(), NodeKind::Sea);
        assert_eq!(NodeId::parse("airport_42").unwrap().kind(), NodeKind::Air);
        assert_eq!(NodeId::parse("port_INMAA-1").unwrap().kind(), NodeKind::Sea);
    }

    #[test]
    fn reject_unknown_prefix() {
        assert!(NodeId::parse("").is_err());
        assert!(NodeId::parse("1").is_err());
        assert!(NodeId::parse("dock_1").is_err());
        assert!(NodeId::parse("Port_1").is_err());
    }

    #[test]
    fn reject_bad_key() {
        assert!(NodeId::parse("port_").is_err());
        assert!(NodeId::parse("airport_").is_err());
        assert!(NodeId::parse("port_a b").is_err());
        assert!(NodeId::parse("port_ä").is_err());
    }

    #[test]
    fn new_prefixes_key() {
        let id = NodeId::new(NodeKind::Air, 7).unwrap();
        assert_eq!(id.as_str(), "airport_7");
        assert_eq!(id, NodeId::parse("airport_7").unwrap());
        assert!(NodeId::new(NodeKind::Sea, "").is_err());
    }

    #[test]
    fn same_key_different_kind_are_distinct() {
        let port = NodeId::new(NodeKind::Sea, 3).unwrap();
        let airport = NodeId::new(NodeKind::Air, 3).unwrap();
        assert_ne!(port, airport);
    }

    #[test]
    fn display_and_debug() {
        let id = NodeId::parse("port_9").unwrap();
        assert_eq!(format!("{}", id), "port_9");
        assert_eq!(format!("{:?}", id), "NodeId(port_9)");
        assert_eq!(NodeKind::Air.to_string(), "air");
    }

    #[test]
    fn node_kind_follows_id() {
        let node = TransportNode::new(
            NodeId::parse("airport_1").unwrap(),
            "Chennai International Airport",
            "Chennai",
            "Tamil Nadu",
            GeoPoint::new(12.9941, 80.1709),
            "International",
        );
        assert_eq!(node.kind(), NodeKind::Air);
    }

    #[test]
    fn blank_code_dropped() {
        let node = TransportNode::new(
            NodeId::parse("port_1").unwrap(),
            "Chennai Port",
            "Chennai",
            "Tamil Nadu",
            GeoPoint::new(13.0964, 80.2921),
            "Major",
        );
        assert_eq!(node.clone().with_code("  ").code, None);
        assert_eq!(node.with_code("INMAA").code.as_deref(), Some("INMAA"));
    }
}
