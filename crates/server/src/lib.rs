use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod accounts;
mod categories;
mod query;
mod server;
mod statistics;
mod transactions;
mod transfers;

pub enum ServerError {
    Engine(EngineError),
    /// The request body is not a JSON object.
    InvalidJson(String),
    Generic(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    name: &'static str,
    message: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Fatal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Fatal(reason) => {
            tracing::error!("fatal engine error: {reason}");
            "internal server error".to_string()
        }
        EngineError::InvalidRequest(message) | EngineError::NotFound(message) => message,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, name, message) = match self {
            ServerError::Engine(err) => (
                status_for_engine_error(&err),
                err.name(),
                message_for_engine_error(err),
            ),
            ServerError::InvalidJson(message) => (StatusCode::BAD_REQUEST, "InvalidJSON", message),
            ServerError::Generic(message) => {
                (StatusCode::BAD_REQUEST, "InvalidRequestError", message)
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { name, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::InvalidJson(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}
