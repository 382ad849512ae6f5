//! Route ranking for search results.
//!
//! Orders candidate routes by total cost, collapses routes that visit the
//! same nodes in the same order, and labels the survivors.

use std::collections::HashSet;

use crate::domain::{NodeId, PlannedRoute};

/// Labels for the first ranked positions.
const NAMED_LABELS: [&str; 4] = [
    "Best Route (Lowest Cost)",
    "Alternative 1",
    "Alternative 2",
    "Alternative 3",
];

/// Sort routes by total cost, cheapest first.
///
/// The sort is stable: routes of equal cost keep their candidate order.
/// Time and distance do not affect the order.
pub fn sort_by_cost(mut routes: Vec<PlannedRoute>) -> Vec<PlannedRoute> {
    routes.sort_by(|a, b| a.total_cost().total_cmp(&b.total_cost()));
    routes
}

/// Remove routes whose node sequence has already been seen.
///
/// Keeps the first occurrence, so call after sorting to keep the cheapest.
pub fn deduplicate(routes: Vec<PlannedRoute>) -> Vec<PlannedRoute> {
    let mut seen: HashSet<Vec<NodeId>> = HashSet::with_capacity(routes.len());
    routes
        .into_iter()
        .filter(|route| {
            let key: Vec<NodeId> = route.node_sequence().into_iter().cloned().collect();
            seen.insert(key)
        })
        .collect()
}

/// Display label for a 0-based rank position.
pub fn label_for(index: usize) -> String {
    match NAMED_LABELS.get(index) {
        Some(label) => (*label).to_string(),
        None => format!("Alternative {index}"),
    }
}

/// Rank candidate routes.
///
/// Sorts by cost, drops duplicate node sequences, keeps the first `limit`
/// and assigns each its 1-based rank and label.
pub fn rank_routes(candidates: Vec<PlannedRoute>, limit: usize) -> Vec<PlannedRoute> {
    let mut routes = deduplicate(sort_by_cost(candidates));
    routes.truncate(limit);

    routes
        .into_iter()
        .enumerate()
        .map(|(i, route)| route.with_rank(i + 1, label_for(i)))
        .collect()
}
