//! Income and expenses API endpoints.
//!
//! Both resources share their handlers; the route picks the
//! [`TransactionKind`].

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use engine::{Fields, Transaction, TransactionKind};

use crate::{
    ServerError,
    query::{ListParams, list_query, path_id},
    server::ServerState,
};

type Body = Result<Json<Fields>, JsonRejection>;
type Params = Result<Query<ListParams>, QueryRejection>;

async fn list(
    state: ServerState,
    kind: TransactionKind,
    params: Params,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    let query = list_query(params)?;
    let engine = state.engine.read().await;
    Ok(Json(match kind {
        TransactionKind::Income => engine.list_income(&query),
        TransactionKind::Expense => engine.list_expenses(&query),
    }))
}

async fn get(
    state: ServerState,
    kind: TransactionKind,
    id: String,
) -> Result<Json<Transaction>, ServerError> {
    let id = path_id(&id, kind.label())?;
    let engine = state.engine.read().await;
    let transaction = match kind {
        TransactionKind::Income => engine.income(id)?,
        TransactionKind::Expense => engine.expense(id)?,
    };
    Ok(Json(transaction))
}

async fn create(
    state: ServerState,
    kind: TransactionKind,
    payload: Body,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    let Json(data) = payload?;
    let mut engine = state.engine.write().await;
    let transaction = match kind {
        TransactionKind::Income => engine.create_income(&data)?,
        TransactionKind::Expense => engine.create_expense(&data)?,
    };
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn update(
    state: ServerState,
    kind: TransactionKind,
    id: String,
    payload: Body,
) -> Result<Json<Transaction>, ServerError> {
    let id = path_id(&id, kind.label())?;
    let Json(data) = payload?;
    let mut engine = state.engine.write().await;
    let transaction = match kind {
        TransactionKind::Income => engine.update_income(id, &data)?,
        TransactionKind::Expense => engine.update_expense(id, &data)?,
    };
    Ok(Json(transaction))
}

async fn delete(
    state: ServerState,
    kind: TransactionKind,
    id: String,
) -> Result<Json<Transaction>, ServerError> {
    let id = path_id(&id, kind.label())?;
    let mut engine = state.engine.write().await;
    let transaction = match kind {
        TransactionKind::Income => engine.delete_income(id)?,
        TransactionKind::Expense => engine.delete_expense(id)?,
    };
    Ok(Json(transaction))
}

pub async fn list_income(
    State(state): State<ServerState>,
    params: Params,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    list(state, TransactionKind::Income, params).await
}

pub async fn get_income(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ServerError> {
    get(state, TransactionKind::Income, id).await
}

pub async fn create_income(
    State(state): State<ServerState>,
    payload: Body,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    create(state, TransactionKind::Income, payload).await
}

pub async fn update_income(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Body,
) -> Result<Json<Transaction>, ServerError> {
    update(state, TransactionKind::Income, id, payload).await
}

pub async fn delete_income(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ServerError> {
    delete(state, TransactionKind::Income, id).await
}

pub async fn list_expenses(
    State(state): State<ServerState>,
    params: Params,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    list(state, TransactionKind::Expense, params).await
}

pub async fn get_expense(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ServerError> {
    get(state, TransactionKind::Expense, id).await
}

pub async fn create_expense(
    State(state): State<ServerState>,
    payload: Body,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    create(state, TransactionKind::Expense, payload).await
}

pub async fn update_expense(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Body,
) -> Result<Json<Transaction>, ServerError> {
    update(state, TransactionKind::Expense, id, payload).await
}

pub async fn delete_expense(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ServerError> {
    delete(state, TransactionKind::Expense, id).await
}
