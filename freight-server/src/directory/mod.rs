//! Node directory: resolves city names to candidate ports and airports.
//!
//! The planner only talks to the [`NodeDirectory`] trait. The bundled
//! implementation keeps a JSON dataset in memory; [`CachedDirectory`]
//! memoises city lookups in front of any directory.

mod cache;
mod dataset;
mod error;
mod memory;

use std::future::Future;
use std::sync::Arc;

use crate::domain::{GeoPoint, NodeKind, TransportNode};

pub use cache::{CacheConfig, CachedDirectory};
pub use dataset::{AirportRecord, NodeDataset, Place, PortRecord};
pub use error::DirectoryError;
pub use memory::{CitySummary, InMemoryDirectory};

/// Source of transport nodes.
///
/// An empty list is a valid answer; errors mean the directory itself failed
/// and must not be read as "no nodes".
pub trait NodeDirectory: Send + Sync {
    /// Nodes in or near a city, at most ten.
    fn resolve_city_nodes(
        &self,
        city: &str,
        region: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Arc<TransportNode>>, DirectoryError>> + Send;

    /// The `limit` nodes closest to `point`, optionally of one kind.
    fn nearest_nodes(
        &self,
        point: GeoPoint,
        kind: Option<NodeKind>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Arc<TransportNode>>, DirectoryError>> + Send;

    /// Reference coordinates for a city, used by the proximity fallback.
    fn locate_city(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<Option<GeoPoint>, DirectoryError>> + Send;
}
