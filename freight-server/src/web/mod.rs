//! Web layer for the freight route planner.
//!
//! Provides HTTP endpoints for looking up cities and nodes and for planning
//! routes.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppDirectory, AppState};
