//! Application state for the web layer.

use std::sync::Arc;

use crate::directory::{CachedDirectory, InMemoryDirectory};
use crate::planner::SearchConfig;

/// Directory type served by the application.
pub type AppDirectory = CachedDirectory<InMemoryDirectory>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Node directory with cached city lookups
    pub directory: Arc<AppDirectory>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(directory: AppDirectory, config: SearchConfig) -> Self {
        Self {
            directory: Arc::new(directory),
            config: Arc::new(config),
        }
    }
}
