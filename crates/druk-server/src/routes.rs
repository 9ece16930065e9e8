use crate::{
    auth::{self, require_admin},
    error::ApiError,
    seed,
    state::SharedState,
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch, post},
    Json, Router,
};
use druk_core::{validate_submission, FieldMap, Filter, Mode, Record};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

/// Build the full API router. One generic handler set serves every entity
/// registered with the schema registry; reads are public, writes require an
/// admin session.
pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/logout", post(auth::logout))
        .route("/api/seed", post(seed_database))
        .route("/api/clear-database", post(clear_database))
        .route("/api/{entity}", get(list_records).post(create_record))
        .route(
            "/api/{entity}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .route("/api/{entity}/{id}/status", patch(patch_status))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/{entity}` — 200 with a possibly-empty array. At most one
/// equality filter is honored; query parameters that don't name a schema
/// field are ignored.
async fn list_records(
    State(state): State<SharedState>,
    Path(entity): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let schema = state.registry.schema(&entity)?;
    let filter = query
        .iter()
        .find(|(name, _)| schema.field_by_name(name).is_some())
        .map(|(name, value)| Filter::new(name.clone(), value.as_str()));

    let records = state.store.list(&entity, filter.as_ref()).await?;
    Ok(Json(records))
}

/// `GET /api/{entity}/{id}` — 200 | 404 unknown id | 400 malformed id.
async fn get_record(
    State(state): State<SharedState>,
    Path((entity, id)): Path<(String, String)>,
) -> Result<Json<Record>, ApiError> {
    let id = parse_id(&id)?;
    let record = state.store.get(&entity, id).await?;
    Ok(Json(record))
}

/// `POST /api/{entity}` — 201 created record | 400 with field errors.
async fn create_record(
    State(state): State<SharedState>,
    Path(entity): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<FieldMap>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    require_admin(&state, &headers)?;
    let schema = state.registry.schema(&entity)?;
    let fields = validate_submission(schema, &payload, Mode::Create)?;

    let record = state.store.insert(&entity, fields).await?;
    tracing::info!(%entity, id = record.id, "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /api/{entity}/{id}` — partial update; validates present fields.
async fn update_record(
    State(state): State<SharedState>,
    Path((entity, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(payload): Json<FieldMap>,
) -> Result<Json<Record>, ApiError> {
    require_admin(&state, &headers)?;
    let id = parse_id(&id)?;
    let schema = state.registry.schema(&entity)?;
    let fields = validate_submission(schema, &payload, Mode::Update)?;

    let record = state.store.update(&entity, id, fields).await?;
    tracing::info!(%entity, id, "record updated");
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: String,
}

/// `PATCH /api/{entity}/{id}/status` — enumerated-status transition. Any
/// status may move to any other; the only guard is membership in the
/// entity's status set.
async fn patch_status(
    State(state): State<SharedState>,
    Path((entity, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<StatusBody>,
) -> Result<Json<Record>, ApiError> {
    require_admin(&state, &headers)?;
    let id = parse_id(&id)?;
    let schema = state.registry.schema(&entity)?;
    let Some(options) = schema.status_options() else {
        return Err(ApiError::BadRequest(format!(
            "{} does not have a status field",
            schema.title
        )));
    };
    if !options.iter().any(|o| *o == body.status) {
        return Err(ApiError::BadRequest(format!(
            "`{}` is not a recognized status for {}",
            body.status, entity
        )));
    }

    let mut fields = FieldMap::new();
    fields.insert("status".to_string(), body.status.into());
    let record = state.store.update(&entity, id, fields).await?;
    tracing::info!(%entity, id, status = %record.value("status"), "status changed");
    Ok(Json(record))
}

/// `DELETE /api/{entity}/{id}` — 200 `{message}` | 404. No undo.
async fn delete_record(
    State(state): State<SharedState>,
    Path((entity, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;
    let id = parse_id(&id)?;
    let title = state.registry.schema(&entity)?.title.clone();

    state.store.delete(&entity, id).await?;
    tracing::info!(%entity, id, "record deleted");
    Ok(Json(json!({ "message": format!("{title} deleted") })))
}

/// `POST /api/seed` — bulk-insert the static catalogs; responds with the
/// per-entity insert counts.
async fn seed_database(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;

    let mut counts = serde_json::Map::new();
    for entity in seed::SEEDED_ENTITIES {
        let schema = state.registry.schema(entity)?;
        let rows = seed::catalog(schema)?;
        let count = state.store.insert_many(entity, rows).await?;
        counts.insert(entity.to_string(), json!(count));
    }
    tracing::info!(?counts, "database seeded");
    Ok(Json(serde_json::Value::Object(counts)))
}

/// `POST /api/clear-database` — remove every record of every entity.
async fn clear_database(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;
    state.store.clear_all().await?;
    tracing::warn!("database cleared");
    Ok(Json(json!({ "message": "Database cleared" })))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("`{raw}` is not a well-formed id")))
}
