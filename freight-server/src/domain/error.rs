//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from directory/IO errors.

use super::NodeId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Route has no segments
    #[error("route must have at least one segment")]
    EmptyRoute,

    /// Consecutive segments don't share a node
    #[error("segments are not connected: {0} is followed by {1}")]
    SegmentsNotConnected(NodeId, NodeId),

    /// Running totals of a segment don't continue from the previous one
    #[error("cumulative totals of segment {0} do not continue the previous segment")]
    BrokenCumulative(usize),
}
