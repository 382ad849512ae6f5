//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::directory::{DirectoryError, NodeDirectory};
use crate::domain::GeoPoint;
use crate::planner::{PlanError, Planner};

use super::dto::*;
use super::state::AppState;

const DEFAULT_CITY_LIMIT: usize = 20;
const MAX_CITY_LIMIT: usize = 100;
const DEFAULT_NEAREST_LIMIT: usize = 5;
const MAX_NEAREST_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cities/search", get(search_cities))
        .route("/api/nodes/nearest", get(nearest_nodes))
        .route("/api/routes/plan", post(plan_routes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search cities that have at least one port or airport.
async fn search_cities(
    State(state): State<AppState>,
    query: Result<Query<CitySearchRequest>, QueryRejection>,
) -> Result<Json<CitySearchResponse>, AppError> {
    let Query(req) = query?;
    let limit = req.limit.unwrap_or(DEFAULT_CITY_LIMIT).min(MAX_CITY_LIMIT);

    let mut cities = state.directory.inner().cities(&req.q);
    cities.truncate(limit);

    Ok(Json(CitySearchResponse { cities }))
}

/// Nodes closest to a coordinate.
async fn nearest_nodes(
    State(state): State<AppState>,
    query: Result<Query<NearestNodesRequest>, QueryRejection>,
) -> Result<Json<NearestNodesResponse>, AppError> {
    let Query(req) = query?;
    if !(-90.0..=90.0).contains(&req.lat) || !(-180.0..=180.0).contains(&req.lng) {
        return Err(AppError::BadRequest {
            message: format!("coordinates out of range: {}, {}", req.lat, req.lng),
        });
    }

    let limit = req
        .limit
        .unwrap_or(DEFAULT_NEAREST_LIMIT)
        .min(MAX_NEAREST_LIMIT);

    let nodes = state
        .directory
        .nearest_nodes(GeoPoint::new(req.lat, req.lng), req.kind, limit)
        .await?;

    Ok(Json(NearestNodesResponse {
        nodes: nodes.iter().map(|n| NodeSummary::from_node(n)).collect(),
    }))
}

/// Plan ranked routes between cities.
async fn plan_routes(
    State(state): State<AppState>,
    body: Result<Json<PlanRoutesRequest>, JsonRejection>,
) -> Result<Json<PlanRoutesResponse>, AppError> {
    let Json(req) = body?;
    let request = req.into_plan_request();

    info!(
        source = %request.source_city,
        dest = %request.dest_city,
        stops = request.intermediate_cities.len(),
        "planning routes"
    );

    let planner = Planner::new(state.directory.as_ref(), &state.config);
    let result = planner.plan(&request).await?;

    if result.is_no_route() {
        return Err(AppError::NotFound {
            message: format!(
                "no route found from {} to {}",
                request.source_city, request.dest_city
            ),
        });
    }

    info!(
        routes = result.routes.len(),
        candidates = result.candidates_explored,
        "routes planned"
    );

    Ok(Json(PlanRoutesResponse {
        routes: result.routes.iter().map(RouteResult::from_route).collect(),
        candidates_explored: result.candidates_explored,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(e: DirectoryError) -> Self {
        AppError::Unavailable {
            message: e.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            PlanError::UnresolvableCity { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            PlanError::Directory(inner) => inner.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
