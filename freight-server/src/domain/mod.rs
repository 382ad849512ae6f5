//! Domain types for the freight route planner.
//!
//! This module contains the core domain model types: transport nodes,
//! the legs between them and complete planned routes. All types enforce
//! their invariants at construction time, so code that receives these
//! types can trust their validity.

mod error;
mod geo;
mod mode;
mod node;
mod route;
mod segment;

pub use error::DomainError;
pub use self::geo::{GeoPoint, great_circle_km};
pub use mode::TransportMode;
pub use node::{InvalidNodeId, NodeId, NodeKind, TransportNode};
pub use route::PlannedRoute;
pub use segment::{EdgeCost, RouteSegment, Totals};
