//! Categories API endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{Category, Fields};

use crate::{ServerError, query::path_id, server::ServerState};

const LABEL: &str = "category";

pub async fn list(State(state): State<ServerState>) -> Json<Vec<Category>> {
    let engine = state.engine.read().await;
    Json(engine.list_categories())
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, ServerError> {
    let id = path_id(&id, LABEL)?;
    let engine = state.engine.read().await;
    Ok(Json(engine.category(id)?))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), ServerError> {
    let Json(data) = payload?;
    let mut engine = state.engine.write().await;
    let category = engine.create_category(&data)?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> Result<Json<Category>, ServerError> {
    let id = path_id(&id, LABEL)?;
    let Json(data) = payload?;
    let mut engine = state.engine.write().await;
    Ok(Json(engine.update_category(id, &data)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, ServerError> {
    let id = path_id(&id, LABEL)?;
    let mut engine = state.engine.write().await;
    Ok(Json(engine.delete_category(id)?))
}
