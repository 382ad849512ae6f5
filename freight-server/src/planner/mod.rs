//! Multimodal route planner.
//!
//! This module answers: "which ports and airports should cargo pass through
//! to get from this city to that one, and what will it cost?"
//!
//! Cities are resolved to transport nodes up front, then a bounded
//! depth-first search scores sea, air and intermodal legs between them and
//! ranks the complete routes by total cost.

mod config;
mod cost;
mod rank;
mod search;

pub use config::{CostModel, SearchConfig};
pub use cost::score_edge;
pub use rank::{deduplicate, label_for, rank_routes, sort_by_cost};
pub use search::{
    PlanError, PlanRequest, Planner, SearchResult, enumerate_routes, plan_routes, resolve_cities,
};
