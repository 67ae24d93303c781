//! JSON API over the shared planner session
//!
//! Every mutating endpoint answers with a full [`PlannerSnapshot`] taken
//! under the same lock as the mutation, so a client always receives a
//! route, corridor locks and ETA computed from one set of inputs.

use axum::{
    Json, Router,
    error_handling::HandleErrorLayer,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, patch, post, put},
};
use geo::Point;
use geojson::{Feature, FeatureCollection};
use lockroute_core::{
    BoundingBox, EtaResult, Lock, RiverSign, RoutePlanner, Settings, SettingsPatch, Waypoint,
    WaypointId,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower::{BoxError, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

use crate::{
    AppState, ServerConfig,
    error::{ApiError, ApiResult},
};

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/state", get(get_state))
        .route("/api/waypoints", post(add_waypoint).delete(clear_waypoints))
        .route(
            "/api/waypoints/{id}",
            put(move_waypoint).delete(remove_waypoint),
        )
        .route("/api/settings", patch(update_settings))
        .route("/api/locks", get(list_locks))
        .route("/api/signs", get(list_signs))
        .route("/api/route.geojson", get(route_geojson))
        .route("/api/viewport", post(submit_viewport))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .concurrency_limit(config.concurrency_limit)
                .timeout(config.request_timeout())
                .layer(TraceLayer::new_for_http()),
        )
        .layer(CorsLayer::permissive())
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "request timed out" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("unhandled internal error: {err}") })),
        )
    }
}

/// Planner inputs and derived values at one point in time
#[derive(Debug, Serialize)]
pub struct PlannerSnapshot {
    pub waypoints: Vec<Waypoint>,
    /// Route as a `GeoJSON` `LineString` feature
    pub route: Option<Feature>,
    pub locks_on_route: Vec<Lock>,
    pub eta: Option<EtaResult>,
    pub settings: Settings,
    /// Number of lock candidates currently loaded
    pub lock_candidates: usize,
    pub guidance: Option<&'static str>,
}

impl PlannerSnapshot {
    pub fn capture(planner: &RoutePlanner) -> ApiResult<Self> {
        let route = planner.route().map(|route| route.to_feature()).transpose()?;
        Ok(Self {
            waypoints: planner.waypoints().to_vec(),
            route,
            locks_on_route: planner.locks_on_route().to_vec(),
            eta: planner.eta().cloned(),
            settings: *planner.settings(),
            lock_candidates: planner.all_locks().len(),
            guidance: planner.guidance(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WaypointBody {
    #[serde(with = "lockroute_core::model::lnglat")]
    coordinates: Point<f64>,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Serialize)]
struct WaypointCreated {
    id: WaypointId,
    #[serde(flatten)]
    state: PlannerSnapshot,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_state(State(state): State<AppState>) -> ApiResult<Json<PlannerSnapshot>> {
    let planner = state.planner();
    Ok(Json(PlannerSnapshot::capture(&planner)?))
}

async fn add_waypoint(
    State(state): State<AppState>,
    Json(body): Json<WaypointBody>,
) -> ApiResult<(StatusCode, Json<WaypointCreated>)> {
    let mut planner = state.planner();
    let id = match body.label {
        Some(label) => planner.add_labeled_waypoint(body.coordinates, label),
        None => planner.add_waypoint(body.coordinates),
    };
    debug!("Added waypoint {id}");

    let created = WaypointCreated {
        id,
        state: PlannerSnapshot::capture(&planner)?,
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn move_waypoint(
    State(state): State<AppState>,
    Path(id): Path<WaypointId>,
    Json(body): Json<WaypointBody>,
) -> ApiResult<Json<PlannerSnapshot>> {
    let mut planner = state.planner();
    if !planner.update_waypoint_position(id, body.coordinates) {
        return Err(ApiError::WaypointNotFound(id));
    }
    Ok(Json(PlannerSnapshot::capture(&planner)?))
}

async fn remove_waypoint(
    State(state): State<AppState>,
    Path(id): Path<WaypointId>,
) -> ApiResult<Json<PlannerSnapshot>> {
    let mut planner = state.planner();
    if !planner.remove_waypoint(id) {
        return Err(ApiError::WaypointNotFound(id));
    }
    Ok(Json(PlannerSnapshot::capture(&planner)?))
}

async fn clear_waypoints(State(state): State<AppState>) -> ApiResult<Json<PlannerSnapshot>> {
    let mut planner = state.planner();
    planner.clear_waypoints();
    Ok(Json(PlannerSnapshot::capture(&planner)?))
}

async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult<Json<PlannerSnapshot>> {
    patch.validate()?;

    let mut planner = state.planner();
    planner.update_settings(&patch);
    Ok(Json(PlannerSnapshot::capture(&planner)?))
}

async fn list_locks(State(state): State<AppState>) -> Json<Vec<Lock>> {
    Json(state.planner().all_locks().to_vec())
}

async fn list_signs(State(state): State<AppState>) -> Json<Vec<RiverSign>> {
    Json(state.planner().signs().to_vec())
}

async fn route_geojson(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let collection: FeatureCollection = state.planner().to_geojson()?;
    Ok((
        [(header::CONTENT_TYPE, "application/geo+json")],
        Json(collection),
    ))
}

/// Reports the visible map area; the first report triggers the lock load
async fn submit_viewport(
    State(state): State<AppState>,
    Json(bbox): Json<BoundingBox>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    bbox.validate()?;

    if state.submit_viewport(bbox) {
        Ok((StatusCode::ACCEPTED, Json(json!({ "loading": true }))))
    } else {
        Ok((StatusCode::OK, Json(json!({ "loading": false }))))
    }
}
