//! Route definitions for the RefData backend stub.
//!
//! Implements the endpoints that `refdata-client` calls, with responses that
//! deserialize cleanly into the `refdata-core` model types.

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use refdata_core::{
    AddElementsRequest, CreateStructureRequest, Element, ElementPage, LoadSummary, Structure,
    PAGE_SIZE,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::jobs;
use crate::store::AppState;

/// Build the complete router with all stub routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        // Structures
        .route(
            "/api/structures",
            post(create_structure).get(list_structures),
        )
        .route("/api/structures/{id}", get(get_structure))
        // Elements
        .route(
            "/api/structures/{id}/elements",
            post(add_elements).get(search_elements),
        )
        // Jobs
        .route("/api/jobs/load-csv/{structure_name}", post(load_csv))
        .fallback(not_implemented)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────

async fn health() -> StatusCode {
    StatusCode::OK
}

// ── Structures ──────────────────────────────────────────────────────

async fn create_structure(
    State(state): State<AppState>,
    payload: Result<Json<CreateStructureRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Structure>), ApiError> {
    let Json(req) = payload?;
    let structure = state.create_structure(req)?;
    tracing::info!(structure_id = %structure.id, name = %structure.name, "structure created");
    Ok((StatusCode::CREATED, Json(structure)))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    q: String,
}

async fn list_structures(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Structure>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.list_structures(&query.q)))
}

async fn get_structure(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Structure>, ApiError> {
    state.get_structure(&id).map(Json)
}

// ── Elements ────────────────────────────────────────────────────────

async fn add_elements(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AddElementsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Element>>), ApiError> {
    let Json(req) = payload?;
    let batch = req.elements.into_iter().map(|e| e.values).collect();
    let created = state.add_elements(&id, batch)?;
    tracing::info!(structure_id = %id, count = created.len(), "elements added");
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    skip: u64,
    #[serde(default = "default_limit")]
    limit: u64,
}

fn default_limit() -> u64 {
    PAGE_SIZE
}

async fn search_elements(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<ElementPage>, ApiError> {
    let Query(query) = query?;
    state
        .search_elements(&id, &query.q, query.skip, query.limit)
        .map(Json)
}

// ── Jobs ────────────────────────────────────────────────────────────

async fn load_csv(
    State(state): State<AppState>,
    Path(structure_name): Path<String>,
    body: Bytes,
) -> Result<Json<LoadSummary>, ApiError> {
    jobs::load_csv(&state, &structure_name, &body).map(Json)
}

// ── Fallback ────────────────────────────────────────────────────────

async fn not_implemented() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}
