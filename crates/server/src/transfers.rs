//! Transfers API endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use engine::{Fields, Transfer};

use crate::{
    ServerError,
    query::{ListParams, list_query, path_id},
    server::ServerState,
};

const LABEL: &str = "transfer";

/// `categoryIDs` is accepted but ignored: transfers have no category.
pub async fn list(
    State(state): State<ServerState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Transfer>>, ServerError> {
    let query = list_query(params)?;
    let engine = state.engine.read().await;
    Ok(Json(engine.list_transfers(&query)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Transfer>, ServerError> {
    let id = path_id(&id, LABEL)?;
    let engine = state.engine.read().await;
    Ok(Json(engine.transfer(id)?))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> Result<(StatusCode, Json<Transfer>), ServerError> {
    let Json(data) = payload?;
    let mut engine = state.engine.write().await;
    let transfer = engine.create_transfer(&data)?;
    Ok((StatusCode::CREATED, Json(transfer)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> Result<Json<Transfer>, ServerError> {
    let id = path_id(&id, LABEL)?;
    let Json(data) = payload?;
    let mut engine = state.engine.write().await;
    Ok(Json(engine.update_transfer(id, &data)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Transfer>, ServerError> {
    let id = path_id(&id, LABEL)?;
    let mut engine = state.engine.write().await;
    Ok(Json(engine.delete_transfer(id)?))
}
