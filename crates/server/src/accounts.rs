//! Accounts API endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{Account, Fields, MoneyCents};
use serde::Serialize;
use uuid::Uuid;

use crate::{ServerError, query::path_id, server::ServerState};

const LABEL: &str = "account";

#[derive(Serialize)]
pub struct AccountBalance {
    id: Uuid,
    balance: MoneyCents,
}

pub async fn list(State(state): State<ServerState>) -> Json<Vec<Account>> {
    let engine = state.engine.read().await;
    Json(engine.list_accounts())
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Account>, ServerError> {
    let id = path_id(&id, LABEL)?;
    let engine = state.engine.read().await;
    Ok(Json(engine.account(id)?))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> Result<(StatusCode, Json<Account>), ServerError> {
    let Json(data) = payload?;
    let mut engine = state.engine.write().await;
    let account = engine.create_account(&data)?;
    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Fields>, JsonRejection>,
) -> Result<Json<Account>, ServerError> {
    let id = path_id(&id, LABEL)?;
    let Json(data) = payload?;
    let mut engine = state.engine.write().await;
    Ok(Json(engine.update_account(id, &data)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Account>, ServerError> {
    let id = path_id(&id, LABEL)?;
    let mut engine = state.engine.write().await;
    Ok(Json(engine.delete_account(id)?))
}

pub async fn balance(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<AccountBalance>, ServerError> {
    let id = path_id(&id, LABEL)?;
    let engine = state.engine.read().await;
    let balance = engine.account_balance(id)?;
    Ok(Json(AccountBalance { id, balance }))
}
